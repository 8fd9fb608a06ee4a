use sqlx::PgPool;

use crate::dtos::tutor::{CreateTutorRequest, UpdateTutorRequest};
use crate::models::Tutor;
use crate::query::{Filter, ListQuery, Page, PageRequest, SearchSpec, Sort};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum TutorSort {
        FirstName => "first_name",
        LastName => "last_name",
        EducationLevel => "education_level",
        DayPerWeek => "day_per_week",
        HrPerDay => "hr_per_day",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const TUTOR_COLUMNS: &str = "id, first_name, last_name, education_level, document, image, \
     phone_number, email, address, day_per_week, hr_per_day, verified, created_at, updated_at";

const TUTOR_SEARCH: SearchSpec = SearchSpec {
    columns: &["first_name", "last_name", "email", "phone_number"],
    related: None,
};

#[derive(Debug, Clone, Default)]
pub struct TutorFilter {
    pub search: Option<String>,
    pub education_level: Option<String>,
    pub verified: Option<bool>,
    pub min_day_per_week: Option<i32>,
    pub max_day_per_week: Option<i32>,
    pub min_hr_per_day: Option<i32>,
    pub max_hr_per_day: Option<i32>,
    pub sort: Sort<TutorSort>,
    pub page: PageRequest,
}

impl TutorFilter {
    pub fn to_query(&self) -> ListQuery<TutorSort> {
        ListQuery::new("tutors", TUTOR_COLUMNS, TUTOR_SEARCH)
            .filter(
                Filter::new()
                    .contains("education_level", self.education_level.clone())
                    .eq("verified", self.verified)
                    .at_least("day_per_week", self.min_day_per_week)
                    .at_most("day_per_week", self.max_day_per_week)
                    .at_least("hr_per_day", self.min_hr_per_day)
                    .at_most("hr_per_day", self.max_hr_per_day)
                    .search(self.search.clone()),
            )
            .sort(self.sort)
            .page(self.page)
    }
}

#[derive(Clone)]
pub struct TutorRepository {
    pool: PgPool,
}

impl TutorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: &CreateTutorRequest) -> Result<Tutor, ServiceError> {
        sqlx::query_as::<_, Tutor>(&format!(
            r#"
            INSERT INTO tutors (first_name, last_name, education_level, document, image,
                                phone_number, email, address, day_per_week, hr_per_day)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            TUTOR_COLUMNS
        ))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.education_level)
        .bind(&input.document)
        .bind(&input.image)
        .bind(&input.phone_number)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.day_per_week)
        .bind(input.hr_per_day)
        .fetch_one(&self.pool)
        .await
        .map_err(ServiceError::on_create("Tutor"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Tutor>, ServiceError> {
        let tutor = sqlx::query_as::<_, Tutor>(&format!(
            "SELECT {} FROM tutors WHERE id = $1 AND deleted_at IS NULL",
            TUTOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tutor)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &TutorFilter) -> Result<Page<Tutor>, ServiceError> {
        Ok(filter.to_query().fetch(&self.pool).await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: &UpdateTutorRequest,
    ) -> Result<Option<Tutor>, ServiceError> {
        sqlx::query_as::<_, Tutor>(&format!(
            r#"
            UPDATE tutors SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                education_level = COALESCE($4, education_level),
                document = COALESCE($5, document),
                image = COALESCE($6, image),
                phone_number = COALESCE($7, phone_number),
                email = COALESCE($8, email),
                address = COALESCE($9, address),
                day_per_week = COALESCE($10, day_per_week),
                hr_per_day = COALESCE($11, hr_per_day),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            TUTOR_COLUMNS
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.education_level)
        .bind(&input.document)
        .bind(&input.image)
        .bind(&input.phone_number)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.day_per_week)
        .bind(input.hr_per_day)
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_update("Tutor"))
    }

    /// Mark a tutor as vetted. Returns `false` when no such tutor exists.
    pub async fn verify(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE tutors SET verified = TRUE, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ServiceError::on_update("Tutor"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result =
            sqlx::query("UPDATE tutors SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unverified_filter_is_applied() {
        let filter = TutorFilter {
            verified: Some(false),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query().count_query().sql(),
            "SELECT COUNT(*) FROM tutors WHERE tutors.deleted_at IS NULL AND verified = $1"
        );
    }

    #[test]
    fn test_unset_verified_is_ignored() {
        let sql = TutorFilter::default().to_query().count_query().into_sql();
        assert!(!sql.contains("verified"));
    }

    #[test]
    fn test_full_filter_shape() {
        let filter = TutorFilter {
            search: Some("abe".to_string()),
            education_level: Some("BSc".to_string()),
            min_day_per_week: Some(2),
            max_hr_per_day: Some(4),
            sort: Sort::parse(Some("hr_per_day"), Some("asc")).unwrap(),
            page: PageRequest::new(Some(3), Some(20)),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query().page_query().sql(),
            format!(
                "SELECT {} FROM tutors WHERE tutors.deleted_at IS NULL \
                 AND education_level ILIKE $1 AND day_per_week >= $2 AND hr_per_day <= $3 \
                 AND (tutors.first_name ILIKE $4 OR tutors.last_name ILIKE $5 \
                 OR tutors.email ILIKE $6 OR tutors.phone_number ILIKE $7) \
                 ORDER BY tutors.hr_per_day ASC, tutors.id ASC LIMIT $8 OFFSET $9",
                TUTOR_COLUMNS
            )
        );
    }
}
