use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::split_language_codes;
use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::testimonial::TestimonialFilter;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TestimonialTranslationInput {
    #[validate(length(min = 2, max = 8, message = "Language code must be 2-8 characters"))]
    #[schema(example = "en")]
    pub language_code: String,

    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 255))]
    #[serde(default)]
    #[schema(example = "Parent")]
    pub role: String,

    #[serde(default)]
    pub video_url: String,

    #[serde(default)]
    pub thumbnail_url: String,

    #[validate(nested)]
    #[serde(default)]
    pub translations: Vec<TestimonialTranslationInput>,
}

/// Supplied `translations` replace the stored set.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTestimonialRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub role: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[validate(nested)]
    pub translations: Option<Vec<TestimonialTranslationInput>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TestimonialListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Matches name, role or any translation text.
    #[serde(alias = "query")]
    pub search: Option<String>,
    /// Comma separated, e.g. `en,am`. Restricts returned translations.
    pub language_codes: Option<String>,
    /// One of name, role, created_at.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl TestimonialListParams {
    pub fn into_filter(self) -> Result<TestimonialFilter, QueryError> {
        Ok(TestimonialFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            language_codes: split_language_codes(self.language_codes.as_deref()),
            search: self.search,
        })
    }
}
