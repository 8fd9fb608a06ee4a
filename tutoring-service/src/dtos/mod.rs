pub mod admin;
pub mod booking;
pub mod other_service;
pub mod partner;
pub mod testimonial;
pub mod tutor;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid username or password")]
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Password changed successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Split a comma separated `language_codes` parameter.
pub fn split_language_codes(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// `language_codes` for single-item reads.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LanguageParams {
    pub language_codes: Option<String>,
}

impl LanguageParams {
    pub fn codes(&self) -> Vec<String> {
        split_language_codes(self.language_codes.as_deref())
    }
}
