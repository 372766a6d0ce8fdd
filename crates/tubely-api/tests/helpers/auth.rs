use super::TEST_JWT_SECRET;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use tubely_api::auth::JwtClaims;
use uuid::Uuid;

/// HS256 token for `user_id`, valid for an hour.
pub fn token_for(user_id: Uuid) -> String {
    sign(user_id, Utc::now().timestamp() + 3600, TEST_JWT_SECRET)
}

pub fn expired_token_for(user_id: Uuid) -> String {
    sign(user_id, Utc::now().timestamp() - 60, TEST_JWT_SECRET)
}

pub fn token_with_secret(user_id: Uuid, secret: &str) -> String {
    sign(user_id, Utc::now().timestamp() + 3600, secret)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn sign(user_id: Uuid, exp: i64, secret: &str) -> String {
    let claims = JwtClaims {
        sub: user_id,
        exp,
        iat: Utc::now().timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}
