//! Role gates evaluated after a bearer token has been accepted.

use crate::models::{Admin, Role};
use crate::services::ServiceError;

/// Role level a route demands on top of authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Admin,
    SuperAdmin,
}

pub fn authorize(role: Role, requirement: Requirement) -> Result<(), ServiceError> {
    let allowed = match requirement {
        Requirement::Admin => role.is_admin(),
        Requirement::SuperAdmin => role.is_superadmin(),
    };

    if allowed {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(match requirement {
            Requirement::Admin => "Admin access required".to_string(),
            Requirement::SuperAdmin => "Superadmin access required".to_string(),
        }))
    }
}

/// The bootstrap account and every superadmin are protected from deletion,
/// whoever the caller is.
pub fn ensure_deletable(target: &Admin, bootstrap_username: &str) -> Result<(), ServiceError> {
    if target.username == bootstrap_username || target.role.is_superadmin() {
        return Err(ServiceError::Forbidden(
            "Superadmin accounts cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn admin(username: &str, role: Role) -> Admin {
        Admin {
            id: 7,
            username: username.to_string(),
            password_hash: String::new(),
            name: username.to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_matrix() {
        assert!(authorize(Role::Admin, Requirement::Admin).is_ok());
        assert!(authorize(Role::SuperAdmin, Requirement::Admin).is_ok());
        assert!(authorize(Role::SuperAdmin, Requirement::SuperAdmin).is_ok());
        assert!(matches!(
            authorize(Role::Admin, Requirement::SuperAdmin),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_protected_delete_targets() {
        assert!(ensure_deletable(&admin("superadmin", Role::Admin), "superadmin").is_err());
        assert!(ensure_deletable(&admin("other", Role::SuperAdmin), "superadmin").is_err());
        assert!(ensure_deletable(&admin("editor", Role::Admin), "superadmin").is_ok());
    }
}
