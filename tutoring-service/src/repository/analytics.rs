use sqlx::PgPool;

use crate::models::AnalyticsTotals;
use crate::services::ServiceError;

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counts of live (not soft-deleted) rows per resource, in one round trip.
    #[tracing::instrument(skip(self))]
    pub async fn totals(&self) -> Result<AnalyticsTotals, ServiceError> {
        let totals = sqlx::query_as::<_, AnalyticsTotals>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM bookings WHERE deleted_at IS NULL) AS bookings,
                (SELECT COUNT(*) FROM tutors WHERE deleted_at IS NULL) AS tutors,
                (SELECT COUNT(*) FROM partners WHERE deleted_at IS NULL) AS partners,
                (SELECT COUNT(*) FROM testimonials WHERE deleted_at IS NULL) AS testimonials,
                (SELECT COUNT(*) FROM other_services WHERE deleted_at IS NULL) AS other_services
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
