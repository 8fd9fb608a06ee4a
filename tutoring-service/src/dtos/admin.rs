use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{AdminResponse, Role};
use crate::query::{PageRequest, QueryError, Sort};
use crate::repository::admin::AdminFilter;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "superadmin")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "superpass123")]
    pub password: String,
}

/// Returned by login and refresh. The refresh token travels only in the
/// `refresh_token` cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: AdminResponse,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password123", min_length = 8)]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    pub role: Role,
}

/// Name and role only; passwords go through the dedicated endpoints.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,

    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, message = "Old password must be at least 8 characters"))]
    pub old_password: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Matches username or name.
    #[serde(alias = "query")]
    pub search: Option<String>,
    pub role: Option<Role>,
    /// One of username, name, role, created_at.
    pub sort_by: Option<String>,
    /// asc or desc.
    pub sort_order: Option<String>,
}

impl AdminListParams {
    pub fn into_filter(self) -> Result<AdminFilter, QueryError> {
        Ok(AdminFilter {
            sort: Sort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())?,
            page: PageRequest::new(self.page, self.limit),
            search: self.search,
            role: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::admin::AdminSort;

    #[test]
    fn test_short_password_fails_validation() {
        let req = CreateAdminRequest {
            username: "jdoe".to_string(),
            password: "short".to_string(),
            name: "Jane".to_string(),
            role: Role::Admin,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_params_into_filter() {
        let params = AdminListParams {
            page: Some(2),
            sort_by: Some("username".to_string()),
            sort_order: Some("ASC".to_string()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.page.offset(), 10);
        assert_eq!(filter.sort.field, AdminSort::Username);
    }

    #[test]
    fn test_list_params_reject_bad_order() {
        let params = AdminListParams {
            sort_order: Some("random".to_string()),
            ..Default::default()
        };
        assert!(params.into_filter().is_err());
    }
}
