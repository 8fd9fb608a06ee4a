use service_core::{
    axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
        Json,
    },
    error::AppError,
};

use crate::{
    dtos::{
        booking::{BookingListParams, CreateBookingRequest, UpdateBookingRequest},
        MessageResponse,
    },
    models::Booking,
    query::Page,
    services::ServiceError,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// Request a tutor
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking received", body = Booking),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.bookings.create(&req).await?;
    tracing::info!(booking_id = booking.id, "Booking received");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(BookingListParams),
    responses(
        (status = 200, description = "Page of bookings", body = BookingPage),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 403, description = "Superadmin role required", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<BookingListParams>,
) -> Result<Json<Page<Booking>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.bookings.list(&filter).await?))
}

/// Get a booking by id
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound("Booking"))?;
    Ok(Json(booking))
}

/// Update a booking
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .update(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Booking"))?;
    Ok(Json(booking))
}

/// Mark a booking as assigned to a tutor
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/assign",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking assigned", body = MessageResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
pub async fn assign_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.bookings.assign(id).await? {
        return Err(ServiceError::NotFound("Booking").into());
    }
    tracing::info!(booking_id = id, "Booking assigned");
    Ok(Json(MessageResponse::new("Booking assigned successfully")))
}

/// Soft-delete a booking
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.bookings.soft_delete(id).await? {
        return Err(ServiceError::NotFound("Booking").into());
    }
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}
