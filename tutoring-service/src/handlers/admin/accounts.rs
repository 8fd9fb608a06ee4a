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
        admin::{
            AdminListParams, ChangePasswordRequest, CreateAdminRequest, ResetPasswordRequest,
            UpdateAdminRequest,
        },
        MessageResponse,
    },
    middleware::AuthUser,
    models::AdminResponse,
    query::Page,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// Create an admin account
#[utoipa::path(
    post,
    path = "/api/v1/admin",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminResponse),
        (status = 403, description = "Superadmin role required", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

/// List admin accounts
#[utoipa::path(
    get,
    path = "/api/v1/admin",
    params(AdminListParams),
    responses(
        (status = 200, description = "Page of admins", body = AdminPage),
        (status = 400, description = "Invalid sort order", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AdminListParams>,
) -> Result<Json<Page<AdminResponse>>, AppError> {
    let filter = params.into_filter()?;
    Ok(Json(state.admin_service.list(&filter).await?))
}

/// Profile of the current admin
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Current admin", body = AdminResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<AdminResponse>, AppError> {
    Ok(Json(state.admin_service.me(caller.admin_id).await?))
}

/// Get an admin by id
#[utoipa::path(
    get,
    path = "/api/v1/admin/{id}",
    params(("id" = i64, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin", body = AdminResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AdminResponse>, AppError> {
    Ok(Json(state.admin_service.get(id).await?))
}

/// Update an admin's name or role
#[utoipa::path(
    put,
    path = "/api/v1/admin/{id}",
    params(("id" = i64, Path, description = "Admin id")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin updated", body = AdminResponse),
        (status = 403, description = "Superadmin role required", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateAdminRequest>,
) -> Result<Json<AdminResponse>, AppError> {
    Ok(Json(state.admin_service.update(id, req).await?))
}

/// Soft-delete an admin
///
/// Superadmins, including the bootstrap account, cannot be deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/{id}",
    params(("id" = i64, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 403, description = "Protected account or insufficient role", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.admin_service.delete(id).await?;
    tracing::info!(admin_id = id, deleted_by = caller.admin_id, "Admin removed");
    Ok(Json(MessageResponse::new("Admin deleted successfully")))
}

/// Set a new password for another admin
#[utoipa::path(
    put,
    path = "/api/v1/admin/{id}/reset-password",
    params(("id" = i64, Path, description = "Admin id")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .admin_service
        .reset_password(id, req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successfully")))
}

/// Change the current admin's password
#[utoipa::path(
    put,
    path = "/api/v1/admin/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Current password is wrong", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .admin_service
        .change_password(caller.admin_id, req.old_password, req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}
