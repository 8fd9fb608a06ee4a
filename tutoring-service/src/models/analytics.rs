use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AnalyticsTotals {
    pub bookings: i64,
    pub tutors: i64,
    pub partners: i64,
    pub testimonials: i64,
    pub other_services: i64,
}
