use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A partner offering listed alongside tutoring.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OtherService {
    pub id: i64,
    pub website_url: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub translations: Vec<OtherServiceTranslation>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OtherServiceTranslation {
    pub id: i64,
    pub other_service_id: i64,
    #[schema(example = "am")]
    pub language_code: String,
    pub name: String,
    pub description: String,
    pub tag_line: String,
}
