use std::sync::Arc;

use crate::{
    models::{Admin, AdminResponse},
    repository::AdminRepository,
    services::{JwtService, ServiceError, TokenPair, TokenType},
    utils::{verify_password, Password, PasswordHashString},
};

/// Well-formed digest that matches no password. Verified against when the
/// username is unknown so both failure paths pay for one Argon2 run.
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nLWR1bW15LXNsdA$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// A freshly issued token pair and the identity it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AdminResponse,
    pub tokens: TokenPair,
}

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AdminRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AdminRepository>, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    fn session(&self, admin: &Admin) -> Result<AuthSession, ServiceError> {
        Ok(AuthSession {
            user: admin.sanitized(),
            tokens: self.jwt.issue_pair(admin)?,
        })
    }

    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ServiceError> {
        let Some(admin) = self.repo.find_by_username(username).await? else {
            let _ = verify_password(
                &Password::new(password),
                &PasswordHashString::new(UNKNOWN_USER_HASH.to_string()),
            );
            tracing::warn!(username = %username, "Login failed: unknown username");
            return Err(ServiceError::InvalidCredentials);
        };

        let valid = verify_password(
            &Password::new(password),
            &PasswordHashString::new(admin.password_hash.clone()),
        )?;
        if !valid {
            tracing::warn!(admin_id = admin.id, "Login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let session = self.session(&admin)?;
        tracing::info!(admin_id = admin.id, role = %admin.role, "Admin logged in");
        Ok(session)
    }

    /// Exchange a refresh token for a new pair. The identity is reloaded so
    /// deletions and role changes take effect.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, ServiceError> {
        let claims = self.jwt.validate(refresh_token, TokenType::Refresh)?;

        let admin = self
            .repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Account no longer exists".to_string()))?;

        let session = self.session(&admin)?;
        tracing::info!(admin_id = admin.id, "Tokens refreshed");
        Ok(session)
    }
}
