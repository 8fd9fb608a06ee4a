use sqlx::PgPool;

use crate::dtos::booking::{CreateBookingRequest, UpdateBookingRequest};
use crate::models::Booking;
use crate::query::{Filter, ListQuery, Page, PageRequest, SearchSpec, Sort};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum BookingSort {
        FirstName => "first_name",
        LastName => "last_name",
        Grade => "grade",
        Age => "age",
        DayPerWeek => "day_per_week",
        HrPerDay => "hr_per_day",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const BOOKING_COLUMNS: &str = "id, first_name, last_name, gender, grade, age, address, \
     phone_number, day_per_week, hr_per_day, assigned, created_at, updated_at";

const BOOKING_SEARCH: SearchSpec = SearchSpec {
    columns: &["first_name", "last_name", "phone_number", "address"],
    related: None,
};

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub min_grade: Option<i32>,
    pub max_grade: Option<i32>,
    pub min_day_per_week: Option<i32>,
    pub max_day_per_week: Option<i32>,
    pub min_hr_per_day: Option<i32>,
    pub max_hr_per_day: Option<i32>,
    pub assigned: Option<bool>,
    pub sort: Sort<BookingSort>,
    pub page: PageRequest,
}

impl BookingFilter {
    pub fn to_query(&self) -> ListQuery<BookingSort> {
        ListQuery::new("bookings", BOOKING_COLUMNS, BOOKING_SEARCH)
            .filter(
                Filter::new()
                    .eq("gender", self.gender.clone())
                    .contains("address", self.address.clone())
                    .at_least("grade", self.min_grade)
                    .at_most("grade", self.max_grade)
                    .at_least("day_per_week", self.min_day_per_week)
                    .at_most("day_per_week", self.max_day_per_week)
                    .at_least("hr_per_day", self.min_hr_per_day)
                    .at_most("hr_per_day", self.max_hr_per_day)
                    .eq("assigned", self.assigned)
                    .search(self.search.clone()),
            )
            .sort(self.sort)
            .page(self.page)
    }
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: &CreateBookingRequest) -> Result<Booking, ServiceError> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (first_name, last_name, gender, grade, age, address,
                                  phone_number, day_per_week, hr_per_day)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.gender)
        .bind(input.grade)
        .bind(input.age)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(input.day_per_week)
        .bind(input.hr_per_day)
        .fetch_one(&self.pool)
        .await
        .map_err(ServiceError::on_create("Booking"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, ServiceError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE id = $1 AND deleted_at IS NULL",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &BookingFilter) -> Result<Page<Booking>, ServiceError> {
        Ok(filter.to_query().fetch(&self.pool).await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: &UpdateBookingRequest,
    ) -> Result<Option<Booking>, ServiceError> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                gender = COALESCE($4, gender),
                grade = COALESCE($5, grade),
                age = COALESCE($6, age),
                address = COALESCE($7, address),
                phone_number = COALESCE($8, phone_number),
                day_per_week = COALESCE($9, day_per_week),
                hr_per_day = COALESCE($10, hr_per_day),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.gender)
        .bind(input.grade)
        .bind(input.age)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(input.day_per_week)
        .bind(input.hr_per_day)
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_update("Booking"))
    }

    /// Mark a booking as matched with a tutor.
    pub async fn assign(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE bookings SET assigned = TRUE, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ServiceError::on_update("Booking"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE bookings SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
