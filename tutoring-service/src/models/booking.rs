use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A parent's request for a tutor.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub grade: i32,
    pub age: i32,
    pub address: String,
    pub phone_number: String,
    pub day_per_week: i32,
    pub hr_per_day: i32,
    pub assigned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
