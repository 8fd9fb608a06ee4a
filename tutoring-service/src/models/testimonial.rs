use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Loaded separately; filtered by the caller's language codes.
    #[sqlx(skip)]
    pub translations: Vec<TestimonialTranslation>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TestimonialTranslation {
    pub id: i64,
    pub testimonial_id: i64,
    #[schema(example = "en")]
    pub language_code: String,
    pub text: String,
}
