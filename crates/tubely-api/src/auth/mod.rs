//! Bearer-token identity: JWT validation, middleware and the `AuthUser` extractor.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtValidator;
pub use models::{AuthUser, JwtClaims};
