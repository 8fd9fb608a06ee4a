use std::sync::Arc;

use crate::{
    dtos::admin::{CreateAdminRequest, UpdateAdminRequest},
    models::{Admin, AdminResponse, NewAdmin, Role},
    query::Page,
    repository::{AdminFilter, AdminRepository},
    services::{policy::ensure_deletable, ServiceError},
    utils::{hash_password, verify_password, Password, PasswordHashString},
};

/// Display name given to the seeded superadmin.
const BOOTSTRAP_NAME: &str = "Super Admin";

/// Admin account management on top of an [`AdminRepository`].
#[derive(Clone)]
pub struct AdminService {
    repo: Arc<dyn AdminRepository>,
    bootstrap_username: String,
}

impl AdminService {
    pub fn new(repo: Arc<dyn AdminRepository>, bootstrap_username: impl Into<String>) -> Self {
        Self {
            repo,
            bootstrap_username: bootstrap_username.into(),
        }
    }

    async fn load(&self, id: i64) -> Result<Admin, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Admin"))
    }

    fn hash(password: String) -> Result<String, ServiceError> {
        let hash = hash_password(&Password::new(password))
            .map_err(|e| ServiceError::Internal(e.context("Failed to hash password")))?;
        Ok(hash.into_string())
    }

    pub async fn create(&self, req: CreateAdminRequest) -> Result<AdminResponse, ServiceError> {
        let admin = self
            .repo
            .create(NewAdmin {
                username: req.username,
                password_hash: Self::hash(req.password)?,
                name: req.name,
                role: req.role,
            })
            .await?;

        tracing::info!(admin_id = admin.id, username = %admin.username, role = %admin.role, "Admin created");
        Ok(admin.sanitized())
    }

    pub async fn get(&self, id: i64) -> Result<AdminResponse, ServiceError> {
        Ok(self.load(id).await?.sanitized())
    }

    pub async fn list(&self, filter: &AdminFilter) -> Result<Page<AdminResponse>, ServiceError> {
        Ok(self.repo.list(filter).await?.map(|admin| admin.sanitized()))
    }

    /// Profile of the authenticated caller.
    pub async fn me(&self, caller_id: i64) -> Result<AdminResponse, ServiceError> {
        self.get(caller_id).await
    }

    pub async fn update(
        &self,
        id: i64,
        req: UpdateAdminRequest,
    ) -> Result<AdminResponse, ServiceError> {
        let admin = self
            .repo
            .update_profile(id, req.name, req.role)
            .await?
            .ok_or(ServiceError::NotFound("Admin"))?;

        tracing::info!(admin_id = admin.id, role = %admin.role, "Admin updated");
        Ok(admin.sanitized())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let target = self.load(id).await?;

        if let Err(e) = ensure_deletable(&target, &self.bootstrap_username) {
            tracing::warn!(admin_id = id, username = %target.username, "Refused to delete protected admin");
            return Err(e);
        }

        if !self.repo.soft_delete(id).await? {
            return Err(ServiceError::NotFound("Admin"));
        }

        tracing::info!(admin_id = id, username = %target.username, "Admin deleted");
        Ok(())
    }

    pub async fn reset_password(&self, id: i64, new_password: String) -> Result<(), ServiceError> {
        let hash = Self::hash(new_password)?;
        if !self.repo.update_password_hash(id, &hash).await? {
            return Err(ServiceError::NotFound("Admin"));
        }

        tracing::info!(admin_id = id, "Admin password reset");
        Ok(())
    }

    pub async fn change_password(
        &self,
        caller_id: i64,
        old_password: String,
        new_password: String,
    ) -> Result<(), ServiceError> {
        let admin = self.load(caller_id).await?;

        let matches = verify_password(
            &Password::new(old_password),
            &PasswordHashString::new(admin.password_hash),
        )?;
        if !matches {
            tracing::warn!(admin_id = caller_id, "Password change rejected: wrong current password");
            return Err(ServiceError::InvalidCredentials);
        }

        let hash = Self::hash(new_password)?;
        if !self.repo.update_password_hash(caller_id, &hash).await? {
            return Err(ServiceError::NotFound("Admin"));
        }

        tracing::info!(admin_id = caller_id, "Admin password changed");
        Ok(())
    }

    /// Seed the configured superadmin unless an identity with that username
    /// exists. Returns whether a row was created.
    pub async fn bootstrap(&self, password: &str) -> Result<bool, ServiceError> {
        if self
            .repo
            .find_by_username(&self.bootstrap_username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %self.bootstrap_username, "Bootstrap superadmin already present");
            return Ok(false);
        }

        let created = self
            .repo
            .create(NewAdmin {
                username: self.bootstrap_username.clone(),
                password_hash: Self::hash(password.to_string())?,
                name: BOOTSTRAP_NAME.to_string(),
                role: Role::SuperAdmin,
            })
            .await;

        match created {
            Ok(admin) => {
                tracing::info!(admin_id = admin.id, username = %admin.username, "Bootstrap superadmin created");
                Ok(true)
            }
            // Lost a race with another instance, or the username belongs to a deleted row.
            Err(ServiceError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAdminRepository;

    fn service() -> AdminService {
        AdminService::new(Arc::new(InMemoryAdminRepository::new()), "superadmin")
    }

    fn create_request(username: &str, role: Role) -> CreateAdminRequest {
        CreateAdminRequest {
            username: username.to_string(),
            password: "password123".to_string(),
            name: "Test Admin".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let service = service();
        assert!(service.bootstrap("superpass123").await.unwrap());
        assert!(!service.bootstrap("superpass123").await.unwrap());

        let page = service.list(&AdminFilter::default()).await.unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.data[0].role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_delete_checks_existence_before_protection() {
        let service = service();
        service.bootstrap("superpass123").await.unwrap();

        assert!(matches!(
            service.delete(999).await,
            Err(ServiceError::NotFound("Admin"))
        ));

        let root = service.list(&AdminFilter::default()).await.unwrap().data[0].id;
        assert!(matches!(
            service.delete(root).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(service.get(root).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_regular_admin() {
        let service = service();
        let admin = service
            .create(create_request("editor", Role::Admin))
            .await
            .unwrap();

        service.delete(admin.id).await.unwrap();
        assert!(matches!(
            service.get(admin.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let service = service();
        let admin = service
            .create(create_request("editor", Role::Admin))
            .await
            .unwrap();

        let wrong = service
            .change_password(admin.id, "not-the-password".into(), "newpassword1".into())
            .await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

        service
            .change_password(admin.id, "password123".into(), "newpassword1".into())
            .await
            .unwrap();
        service
            .change_password(admin.id, "newpassword1".into(), "newpassword2".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_touches_profile_only() {
        let service = service();
        let admin = service
            .create(create_request("editor", Role::Admin))
            .await
            .unwrap();

        let updated = service
            .update(
                admin.id,
                UpdateAdminRequest {
                    name: None,
                    role: Some(Role::SuperAdmin),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Test Admin");
        assert_eq!(updated.role, Role::SuperAdmin);
    }
}
