use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::booking::BookingFilter;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 32))]
    #[schema(example = "female")]
    pub gender: String,

    #[validate(range(min = 1, max = 12))]
    #[schema(example = 8)]
    pub grade: i32,

    #[validate(range(min = 3, max = 100))]
    #[schema(example = 14)]
    pub age: i32,

    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "Bole, Addis Ababa")]
    pub address: String,

    #[validate(length(min = 7, max = 32, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(range(min = 1, max = 7))]
    pub day_per_week: i32,

    #[validate(range(min = 1, max = 24))]
    pub hr_per_day: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub gender: Option<String>,
    #[validate(range(min = 1, max = 12))]
    pub grade: Option<i32>,
    #[validate(range(min = 3, max = 100))]
    pub age: Option<i32>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 7, max = 32))]
    pub phone_number: Option<String>,
    #[validate(range(min = 1, max = 7))]
    pub day_per_week: Option<i32>,
    #[validate(range(min = 1, max = 24))]
    pub hr_per_day: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Matches first name, last name, phone number or address.
    #[serde(alias = "query")]
    pub search: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub min_grade: Option<i32>,
    pub max_grade: Option<i32>,
    pub min_day_per_week: Option<i32>,
    pub max_day_per_week: Option<i32>,
    pub min_hr_per_day: Option<i32>,
    pub max_hr_per_day: Option<i32>,
    /// Omit for all bookings; `false` selects unassigned ones.
    pub assigned: Option<bool>,
    /// One of first_name, last_name, grade, age, day_per_week, hr_per_day, created_at.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl BookingListParams {
    pub fn into_filter(self) -> Result<BookingFilter, QueryError> {
        Ok(BookingFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            search: self.search,
            gender: self.gender.filter(|g| !g.trim().is_empty()),
            address: self.address,
            min_grade: self.min_grade,
            max_grade: self.max_grade,
            min_day_per_week: self.min_day_per_week,
            max_day_per_week: self.max_day_per_week,
            min_hr_per_day: self.min_hr_per_day,
            max_hr_per_day: self.max_hr_per_day,
            assigned: self.assigned,
        })
    }
}
