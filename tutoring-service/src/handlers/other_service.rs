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
        other_service::{
            CreateOtherServiceRequest, OtherServiceListParams, OtherServiceTranslationInput,
            UpdateOtherServiceRequest,
        },
        LanguageParams, MessageResponse,
    },
    models::{OtherService, OtherServiceTranslation},
    query::Page,
    services::ServiceError,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// Create a service listing with its translations
#[utoipa::path(
    post,
    path = "/api/v1/other-services",
    request_body = CreateOtherServiceRequest,
    responses(
        (status = 201, description = "Service created", body = OtherService),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Other Services",
    security(("bearer_auth" = []))
)]
pub async fn create_other_service(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateOtherServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.other_services.create(&req).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// List other services
#[utoipa::path(
    get,
    path = "/api/v1/other-services",
    params(OtherServiceListParams),
    responses(
        (status = 200, description = "Page of services", body = OtherServicePage)
    ),
    tag = "Other Services"
)]
pub async fn list_other_services(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<OtherServiceListParams>,
) -> Result<Json<Page<OtherService>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.other_services.list(&filter).await?))
}

/// Get a service listing by id
#[utoipa::path(
    get,
    path = "/api/v1/other-services/{id}",
    params(("id" = i64, Path, description = "Service id"), LanguageParams),
    responses(
        (status = 200, description = "Service", body = OtherService),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Other Services"
)]
pub async fn get_other_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    QueryParams(params): QueryParams<LanguageParams>,
) -> Result<Json<OtherService>, AppError> {
    let service = state
        .other_services
        .find_by_id(id, &params.codes())
        .await?
        .ok_or(ServiceError::NotFound("Service"))?;
    Ok(Json(service))
}

/// Update a service listing
///
/// Supplying `translations` replaces the stored set.
#[utoipa::path(
    put,
    path = "/api/v1/other-services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    request_body = UpdateOtherServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = OtherService),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Other Services",
    security(("bearer_auth" = []))
)]
pub async fn update_other_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateOtherServiceRequest>,
) -> Result<Json<OtherService>, AppError> {
    let service = state
        .other_services
        .update(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Service"))?;
    Ok(Json(service))
}

/// Add one translation to a service listing
#[utoipa::path(
    post,
    path = "/api/v1/other-services/{id}/translations",
    params(("id" = i64, Path, description = "Service id")),
    request_body = OtherServiceTranslationInput,
    responses(
        (status = 201, description = "Translation added", body = OtherServiceTranslation),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Other Services",
    security(("bearer_auth" = []))
)]
pub async fn add_other_service_translation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<OtherServiceTranslationInput>,
) -> Result<impl IntoResponse, AppError> {
    let translation = state
        .other_services
        .add_translation(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Service"))?;
    Ok((StatusCode::CREATED, Json(translation)))
}

/// Soft-delete a service listing and its translations
#[utoipa::path(
    delete,
    path = "/api/v1/other-services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service deleted", body = MessageResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Other Services",
    security(("bearer_auth" = []))
)]
pub async fn delete_other_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.other_services.soft_delete(id).await? {
        return Err(ServiceError::NotFound("Service").into());
    }
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}
