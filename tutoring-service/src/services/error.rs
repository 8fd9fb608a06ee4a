use service_core::error::AppError;
use thiserror::Error;

use crate::query::QueryError;
use crate::services::jwt::TokenError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to create {entity}")]
    CreateFailed {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to update {entity}")]
    UpdateFailed {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ServiceError {
    /// Map an insert failure: unique violations become `Conflict`.
    pub fn on_create(entity: &'static str) -> impl FnOnce(sqlx::Error) -> ServiceError {
        move |source| {
            if is_unique_violation(&source) {
                ServiceError::Conflict(format!("{} already exists", entity))
            } else {
                ServiceError::CreateFailed { entity, source }
            }
        }
    }

    pub fn on_update(entity: &'static str) -> impl FnOnce(sqlx::Error) -> ServiceError {
        move |source| {
            if is_unique_violation(&source) {
                ServiceError::Conflict(format!("{} already exists", entity))
            } else {
                ServiceError::UpdateFailed { entity, source }
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::InvalidInput(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ServiceError::InvalidCredentials => {
                AppError::AuthError(anyhow::anyhow!("Invalid username or password"))
            }
            ServiceError::Unauthorized(msg) => AppError::Unauthorized(anyhow::anyhow!(msg)),
            ServiceError::Forbidden(msg) => AppError::Forbidden(anyhow::anyhow!(msg)),
            ServiceError::NotFound(entity) => {
                AppError::NotFound(anyhow::anyhow!("{} not found", entity))
            }
            ServiceError::Conflict(msg) => AppError::Conflict(anyhow::anyhow!(msg)),
            ServiceError::CreateFailed { entity, source } => AppError::InternalError(
                anyhow::Error::new(source).context(format!("Failed to create {}", entity)),
            ),
            ServiceError::UpdateFailed { entity, source } => AppError::InternalError(
                anyhow::Error::new(source).context(format!("Failed to update {}", entity)),
            ),
            ServiceError::Token(TokenError::Signing(e)) => {
                AppError::InternalError(anyhow::anyhow!("Failed to sign token: {}", e))
            }
            ServiceError::Token(e) => AppError::Unauthorized(anyhow::anyhow!(e)),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        ServiceError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_core::axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::NotFound("Tutor"), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ServiceError::Token(TokenError::TokenExpired),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::Token(TokenError::Signing("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::CreateFailed {
                    entity: "Tutor",
                    source: sqlx::Error::RowNotFound,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_sort_order_error_is_bad_request() {
        let err = AppError::from(QueryError::InvalidSortOrder("up".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_create_failure_without_unique_violation() {
        let err = ServiceError::on_create("Partner")(sqlx::Error::RowNotFound);
        assert!(matches!(err, ServiceError::CreateFailed { entity: "Partner", .. }));
    }
}
