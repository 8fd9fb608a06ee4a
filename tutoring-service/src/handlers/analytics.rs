use service_core::{
    axum::{extract::State, Json},
    error::AppError,
};

use crate::{models::AnalyticsTotals, AppState};

/// Totals of live records per resource
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    responses(
        (status = 200, description = "Resource totals", body = AnalyticsTotals),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Analytics",
    security(("bearer_auth" = []))
)]
pub async fn get_totals(State(state): State<AppState>) -> Result<Json<AnalyticsTotals>, AppError> {
    Ok(Json(state.analytics.totals().await?))
}
