use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::tutor::TutorFilter;

/// Public tutor application.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTutorRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    #[schema(example = "Abebe")]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    #[schema(example = "Kebede")]
    pub last_name: String,

    #[validate(length(max = 255))]
    #[schema(example = "BSc Mathematics")]
    #[serde(default)]
    pub education_level: String,

    /// Stored path or URL of the uploaded CV.
    #[serde(default)]
    pub document: String,

    #[serde(default)]
    pub image: String,

    #[validate(length(min = 7, max = 32, message = "Phone number is required"))]
    #[schema(example = "+251911000000")]
    pub phone_number: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "abebe@example.com")]
    pub email: String,

    #[serde(default)]
    pub address: String,

    #[validate(range(min = 1, max = 7))]
    pub day_per_week: i32,

    #[validate(range(min = 1, max = 24))]
    pub hr_per_day: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTutorRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    pub education_level: Option<String>,
    pub document: Option<String>,
    pub image: Option<String>,
    #[validate(length(min = 7, max = 32))]
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 1, max = 7))]
    pub day_per_week: Option<i32>,
    #[validate(range(min = 1, max = 24))]
    pub hr_per_day: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TutorListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Matches first name, last name, email or phone number.
    #[serde(alias = "query")]
    pub search: Option<String>,
    pub education_level: Option<String>,
    /// Omit for all tutors; `false` selects unverified ones.
    pub verified: Option<bool>,
    pub min_day_per_week: Option<i32>,
    pub max_day_per_week: Option<i32>,
    pub min_hr_per_day: Option<i32>,
    pub max_hr_per_day: Option<i32>,
    /// One of first_name, last_name, education_level, day_per_week, hr_per_day, created_at.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl TutorListParams {
    pub fn into_filter(self) -> Result<TutorFilter, QueryError> {
        Ok(TutorFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            search: self.search,
            education_level: self.education_level,
            verified: self.verified,
            min_day_per_week: self.min_day_per_week,
            max_day_per_week: self.max_day_per_week,
            min_hr_per_day: self.min_hr_per_day,
            max_hr_per_day: self.max_hr_per_day,
        })
    }
}
