pub mod admin;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::Admin;

pub use admin::{authenticate_admin, AuthError};

/// Token `type` claim carried by admin sessions
pub const ADMIN_TOKEN_TYPE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(
        id: String,
        email: String,
        role: String,
        token_type: String,
        expiry_hours: u64,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::ExpiryOutOfRange(expiry_hours))?;

        Ok(Self {
            id,
            email,
            role,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Claims for a freshly authenticated admin
    pub fn for_admin(admin: &Admin, expiry_hours: u64) -> Result<Self, TokenError> {
        Self::new(
            admin.id.to_string(),
            admin.email.clone(),
            admin.role.clone(),
            ADMIN_TOKEN_TYPE.to_string(),
            expiry_hours,
        )
    }
}

/// HS256 key pair derived from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub expiry_hours: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
    #[error("token lifetime of {0} hours is out of range")]
    ExpiryOutOfRange(u64),
}

/// Why a bearer token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature => VerifyError::BadSignature,
            _ => VerifyError::Malformed,
        }
    }
}

pub fn generate_token(claims: &Claims, keys: &JwtKeys) -> Result<String, TokenError> {
    Ok(encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)?)
}

pub fn verify_token(token: &str, keys: &JwtKeys) -> Result<Claims, VerifyError> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(token, &keys.decoding, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret", 1)
    }

    fn admin_claims() -> Claims {
        Claims::new(
            "4b0c1a86-6f0e-4d7e-9a51-0b7d2c4f9e10".to_string(),
            "a@b.com".to_string(),
            "admin".to_string(),
            ADMIN_TOKEN_TYPE.to_string(),
            1,
        )
        .unwrap()
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = admin_claims();
        let token = generate_token(&claims, &keys()).unwrap();
        assert!(!token.is_empty());
        assert_eq!(verify_token(&token, &keys()).unwrap(), claims);
    }

    #[test]
    fn type_claim_is_serialized_as_type() {
        let value = serde_json::to_value(admin_claims()).unwrap();
        assert_eq!(value["type"], "admin");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = admin_claims();
        claims.iat -= 7200;
        claims.exp = Utc::now().timestamp() - 3600;
        let token = generate_token(&claims, &keys()).unwrap();
        assert_eq!(verify_token(&token, &keys()), Err(VerifyError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_token(&admin_claims(), &JwtKeys::new("other-secret", 1)).unwrap();
        assert_eq!(verify_token(&token, &keys()), Err(VerifyError::BadSignature));
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        for hours in [10_000_000_000, u64::MAX] {
            let result = Claims::new("1".into(), "a@b.com".into(), "admin".into(), ADMIN_TOKEN_TYPE.into(), hours);
            assert!(matches!(result, Err(TokenError::ExpiryOutOfRange(h)) if h == hours));
        }
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert_eq!(verify_token("not-a-jwt", &keys()), Err(VerifyError::Malformed));
        assert_eq!(verify_token("", &keys()), Err(VerifyError::Malformed));
    }
}
