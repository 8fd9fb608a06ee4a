pub mod admin;
pub mod auth;
pub mod error;
pub mod jwt;
pub mod policy;

pub use admin::AdminService;
pub use auth::{AuthService, AuthSession};
pub use error::ServiceError;
pub use jwt::{Claims, JwtService, TokenError, TokenPair, TokenType};
pub use policy::{authorize, ensure_deletable, Requirement};
