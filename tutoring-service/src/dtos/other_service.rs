use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::split_language_codes;
use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::other_service::OtherServiceFilter;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OtherServiceTranslationInput {
    #[validate(length(min = 2, max = 8, message = "Language code must be 2-8 characters"))]
    #[schema(example = "am")]
    pub language_code: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tag_line: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOtherServiceRequest {
    #[validate(url(message = "Invalid website URL"))]
    pub website_url: String,

    #[serde(default)]
    pub image_url: String,

    #[validate(nested)]
    #[serde(default)]
    pub translations: Vec<OtherServiceTranslationInput>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOtherServiceRequest {
    #[validate(url)]
    pub website_url: Option<String>,
    pub image_url: Option<String>,
    #[validate(nested)]
    pub translations: Option<Vec<OtherServiceTranslationInput>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OtherServiceListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Matches website URL or any translated name, description or tag line.
    #[serde(alias = "query")]
    pub search: Option<String>,
    pub language_codes: Option<String>,
    /// One of website_url, created_at.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl OtherServiceListParams {
    pub fn into_filter(self) -> Result<OtherServiceFilter, QueryError> {
        Ok(OtherServiceFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            language_codes: split_language_codes(self.language_codes.as_deref()),
            search: self.search,
        })
    }
}
