//! Authentication Module
//!
//! JWT (JSON Web Token) session tokens: issued at signup/login,
//! validated by middleware on every protected route.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::config::SecurityConfig;
use crate::error::{AppError, Result};

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token not before timestamp
    pub nbf: usize,
    /// Issued at timestamp
    pub iat: usize,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Unique token ID
    pub jti: String,
}

impl Claims {
    /// Create new claims
    pub fn new(
        sub: String,
        username: String,
        expiry_seconds: u64,
        issuer: String,
        audience: String,
    ) -> Self {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = iat + expiry_seconds as usize;

        Self {
            sub,
            username,
            exp,
            nbf: iat,
            iat,
            iss: issuer,
            aud: audience,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if claims are expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() as usize > self.exp
    }

    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::Authentication("Malformed token subject".to_string()))
    }
}

/// JWT based authentication
#[derive(Clone)]
pub struct JwtAuth {
    /// Secret key for encoding
    encoding_key: EncodingKey,
    /// Secret key for decoding
    decoding_key: DecodingKey,
    /// JWT issuer
    issuer: String,
    /// JWT audience
    audience: String,
    /// Token expiry time in seconds
    expiry_seconds: u64,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

impl JwtAuth {
    /// Create new JWT authenticator
    pub fn new(secret: &str, issuer: String, audience: String, expiry_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            expiry_seconds,
        }
    }

    /// Create from security settings
    pub fn from_settings(settings: &SecurityConfig) -> Self {
        Self::new(
            &settings.jwt_secret,
            settings.jwt_issuer.clone(),
            settings.jwt_audience.clone(),
            settings.jwt_expiry_seconds,
        )
    }

    /// Create a development JWT authenticator
    pub fn development() -> Self {
        Self::new(
            "dev-secret-change-in-production-min-32-chars",
            "panacea".to_string(),
            "panacea-api".to_string(),
            3600,
        )
    }

    /// Generate a session token for a user
    pub fn generate_token(&self, user_id: i64, username: &str) -> Result<String> {
        let claims = Claims::new(
            user_id.to_string(),
            username.to_string(),
            self.expiry_seconds,
            self.issuer.clone(),
            self.audience.clone(),
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Authentication(format!("Failed to generate token: {}", e)))
    }

    /// Validate a token and return claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.clone()]);
        validation.set_audience(&[self.audience.clone()]);
        validation.validate_nbf = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| AppError::Authentication(format!("Invalid session token: {}", e)))
    }
}

/// Extract a bearer token from an Authorization header value
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    match auth_header {
        Some(header) if header.starts_with("Bearer ") => Some(&header[7..]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let auth = JwtAuth::development();
        let token = auth.generate_token(42, "alice").unwrap();

        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = JwtAuth::development();
        assert!(matches!(
            auth.validate_token("not-a-token"),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let auth = JwtAuth::development();
        let other = JwtAuth::new(
            "another-secret-that-is-also-32-chars!",
            "panacea".to_string(),
            "panacea-api".to_string(),
            3600,
        );

        let token = other.generate_token(1, "mallory").unwrap();
        assert!(auth.validate_token(&token).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("ApiKey abc")), None);
        assert_eq!(bearer_token(None), None);
    }
}
