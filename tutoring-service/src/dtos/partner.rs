use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::partner::PartnerFilter;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Addis Books")]
    pub name: String,

    #[serde(default)]
    pub image_url: String,

    #[validate(url(message = "Invalid website URL"))]
    #[schema(example = "https://addisbooks.example.com")]
    pub website_url: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub image_url: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PartnerListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(alias = "query")]
    pub search: Option<String>,
    /// One of name, created_at.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl PartnerListParams {
    pub fn into_filter(self) -> Result<PartnerFilter, QueryError> {
        Ok(PartnerFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            search: self.search,
        })
    }
}
