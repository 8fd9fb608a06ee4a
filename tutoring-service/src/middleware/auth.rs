use service_core::{
    axum::{
        async_trait,
        extract::{FromRequestParts, Request, State},
        http::{header, request::Parts},
        middleware::Next,
        response::Response,
    },
    error::AppError,
};

use crate::{
    models::Role,
    services::{authorize, Requirement, ServiceError, TokenType},
    AppState,
};

/// Identity bound to a request once its access token has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub admin_id: i64,
    pub username: String,
    pub role: Role,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Unauthorized(anyhow::anyhow!(message.to_string()))
}

/// Require a valid access token in the `Authorization: Bearer` header.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if header_value.is_empty() {
        return Err(unauthorized("Authorization token is required"));
    }

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid authorization header format"))?
        .trim();

    if token.is_empty() {
        return Err(unauthorized("Authorization token is required"));
    }

    let claims = state
        .jwt
        .validate(token, TokenType::Access)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::from(ServiceError::from(e))
        })?;

    req.extensions_mut().insert(AuthContext {
        admin_id: claims.user_id,
        username: claims.username,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

async fn require(requirement: Requirement, req: Request, next: Next) -> Result<Response, AppError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| unauthorized("Authorization token is required"))?;

    if let Err(e) = authorize(context.role, requirement) {
        tracing::warn!(
            admin_id = context.admin_id,
            role = %context.role,
            path = %req.uri().path(),
            "Access denied"
        );
        return Err(e.into());
    }

    Ok(next.run(req).await)
}

/// Layer after [`auth_middleware`]; admits admins and superadmins.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require(Requirement::Admin, req, next).await
}

/// Layer after [`auth_middleware`]; admits superadmins only.
pub async fn require_superadmin(req: Request, next: Next) -> Result<Response, AppError> {
    require(Requirement::SuperAdmin, req, next).await
}

/// Extractor for the authenticated caller.
pub struct AuthUser(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| unauthorized("Authorization token is required"))
    }
}
