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
        tutor::{CreateTutorRequest, TutorListParams, UpdateTutorRequest},
        MessageResponse,
    },
    models::Tutor,
    query::Page,
    services::ServiceError,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// Submit a tutor application
#[utoipa::path(
    post,
    path = "/api/v1/tutors",
    request_body = CreateTutorRequest,
    responses(
        (status = 201, description = "Application received", body = Tutor),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Tutors"
)]
pub async fn create_tutor(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTutorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = state.tutors.create(&req).await?;
    tracing::info!(tutor_id = tutor.id, "Tutor application received");
    Ok((StatusCode::CREATED, Json(tutor)))
}

/// List tutors
#[utoipa::path(
    get,
    path = "/api/v1/tutors",
    params(TutorListParams),
    responses(
        (status = 200, description = "Page of tutors", body = TutorPage),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "Tutors"
)]
pub async fn list_tutors(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TutorListParams>,
) -> Result<Json<Page<Tutor>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.tutors.list(&filter).await?))
}

/// Get a tutor by id
#[utoipa::path(
    get,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor id")),
    responses(
        (status = 200, description = "Tutor", body = Tutor),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    tag = "Tutors"
)]
pub async fn get_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tutor>, AppError> {
    let tutor = state
        .tutors
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound("Tutor"))?;
    Ok(Json(tutor))
}

/// Update a tutor
#[utoipa::path(
    put,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor id")),
    request_body = UpdateTutorRequest,
    responses(
        (status = 200, description = "Tutor updated", body = Tutor),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    tag = "Tutors",
    security(("bearer_auth" = []))
)]
pub async fn update_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTutorRequest>,
) -> Result<Json<Tutor>, AppError> {
    let tutor = state
        .tutors
        .update(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Tutor"))?;
    Ok(Json(tutor))
}

/// Mark a tutor as verified
#[utoipa::path(
    put,
    path = "/api/v1/tutors/{id}/verify",
    params(("id" = i64, Path, description = "Tutor id")),
    responses(
        (status = 200, description = "Tutor verified", body = MessageResponse),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    tag = "Tutors",
    security(("bearer_auth" = []))
)]
pub async fn verify_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.tutors.verify(id).await? {
        return Err(ServiceError::NotFound("Tutor").into());
    }
    tracing::info!(tutor_id = id, "Tutor verified");
    Ok(Json(MessageResponse::new("Tutor verified successfully")))
}

/// Soft-delete a tutor
#[utoipa::path(
    delete,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor id")),
    responses(
        (status = 200, description = "Tutor deleted", body = MessageResponse),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    tag = "Tutors",
    security(("bearer_auth" = []))
)]
pub async fn delete_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.tutors.soft_delete(id).await? {
        return Err(ServiceError::NotFound("Tutor").into());
    }
    Ok(Json(MessageResponse::new("Tutor deleted successfully")))
}
