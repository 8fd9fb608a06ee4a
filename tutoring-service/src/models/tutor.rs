use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Tutor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub education_level: String,
    /// Path or URL of the uploaded CV.
    pub document: String,
    pub image: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub day_per_week: i32,
    pub hr_per_day: i32,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
