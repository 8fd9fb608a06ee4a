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
        partner::{CreatePartnerRequest, PartnerListParams, UpdatePartnerRequest},
        MessageResponse,
    },
    models::Partner,
    query::Page,
    services::ServiceError,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/partners",
    request_body = CreatePartnerRequest,
    responses(
        (status = 201, description = "Partner created", body = Partner),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Partners",
    security(("bearer_auth" = []))
)]
pub async fn create_partner(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePartnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let partner = state.partners.create(&req).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

#[utoipa::path(
    get,
    path = "/api/v1/partners",
    params(PartnerListParams),
    responses(
        (status = 200, description = "Page of partners", body = PartnerPage)
    ),
    tag = "Partners"
)]
pub async fn list_partners(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PartnerListParams>,
) -> Result<Json<Page<Partner>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.partners.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    responses(
        (status = 200, description = "Partner", body = Partner),
        (status = 404, description = "Partner not found", body = ErrorResponse)
    ),
    tag = "Partners"
)]
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Partner>, AppError> {
    let partner = state
        .partners
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound("Partner"))?;
    Ok(Json(partner))
}

#[utoipa::path(
    put,
    path = "/api/v1/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    request_body = UpdatePartnerRequest,
    responses(
        (status = 200, description = "Partner updated", body = Partner),
        (status = 404, description = "Partner not found", body = ErrorResponse)
    ),
    tag = "Partners",
    security(("bearer_auth" = []))
)]
pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePartnerRequest>,
) -> Result<Json<Partner>, AppError> {
    let partner = state
        .partners
        .update(id, &req)
        .await?
        .ok_or(ServiceError::NotFound("Partner"))?;
    Ok(Json(partner))
}

#[utoipa::path(
    delete,
    path = "/api/v1/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    responses(
        (status = 200, description = "Partner deleted", body = MessageResponse),
        (status = 404, description = "Partner not found", body = ErrorResponse)
    ),
    tag = "Partners",
    security(("bearer_auth" = []))
)]
pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.partners.soft_delete(id).await? {
        return Err(ServiceError::NotFound("Partner").into());
    }
    Ok(Json(MessageResponse::new("Partner deleted successfully")))
}
