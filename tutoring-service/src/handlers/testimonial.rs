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
        testimonial::{
            CreateTestimonialRequest, TestimonialListParams, TestimonialTranslationInput,
            UpdateTestimonialRequest,
        },
        LanguageParams, MessageResponse,
    },
    models::{Testimonial, TestimonialTranslation},
    query::Page,
    services::ServiceError,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// Create a testimonial with its translations
#[utoipa::path(
    post,
    path = "/api/v1/testimonials",
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("bearer_auth" = []))
)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTestimonialRequest>,
) -> Result<impl IntoResponse, AppError> {
    let testimonial = state.testimonials.create(&req).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// List testimonials
#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    params(TestimonialListParams),
    responses(
        (status = 200, description = "Page of testimonials", body = TestimonialPage)
    ),
    tag = "Testimonials"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TestimonialListParams>,
) -> Result<Json<Page<Testimonial>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.testimonials.list(&filter).await?))
}

/// Get a testimonial by id
#[utoipa::path(
    get,
    path = "/api/v1/testimonials/{id}",
    params(("id" = i64, Path, description = "Testimonial id"), LanguageParams),
    responses(
        (status = 200, description = "Testimonial", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    ),
    tag = "Testimonials"
)]
pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    QueryParams(params): QueryParams<LanguageParams>,
) -> Result<Json<Testimonial>, AppError> {
    let testimonial = state
        .testimonials
        .find_by_id(id, &params.codes())
        .await?
        .ok_or(ServiceError::NotFound("Testimonial"))?;
    Ok(Json(testimonial))
}

/// Update a testimonial
///
/// Supplying `translations` replaces the stored set.
#[utoipa::path(
    put,
    path = "/api/v1/testimonials/{id}",
    params(("id" = i64, Path, description = "Testimonial id")),
    request_body = UpdateTestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("bearer_auth" = []))
)]
pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTestimonialRequest>,
) -> Result<Json<Testimonial>, AppError> {
    let testimonial = state
        .testimonials
        .update(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Testimonial"))?;
    Ok(Json(testimonial))
}

/// Add one translation to a testimonial
#[utoipa::path(
    post,
    path = "/api/v1/testimonials/{id}/translations",
    params(("id" = i64, Path, description = "Testimonial id")),
    request_body = TestimonialTranslationInput,
    responses(
        (status = 201, description = "Translation added", body = TestimonialTranslation),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("bearer_auth" = []))
)]
pub async fn add_testimonial_translation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<TestimonialTranslationInput>,
) -> Result<impl IntoResponse, AppError> {
    let translation = state
        .testimonials
        .add_translation(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Testimonial"))?;
    Ok((StatusCode::CREATED, Json(translation)))
}

/// Soft-delete a testimonial and its translations
#[utoipa::path(
    delete,
    path = "/api/v1/testimonials/{id}",
    params(("id" = i64, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial deleted", body = MessageResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("bearer_auth" = []))
)]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.testimonials.soft_delete(id).await? {
        return Err(ServiceError::NotFound("Testimonial").into());
    }
    Ok(Json(MessageResponse::new("Testimonial deleted successfully")))
}
