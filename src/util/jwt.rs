use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

/// JWT token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin account ID)
    pub sub: String,
    /// Account username
    pub username: String,
    /// Account email
    pub email: String,
    /// Account role (super_admin, admin, editor, viewer)
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
    #[error("Missing JWT secret")]
    MissingSecret,
}

pub trait JwtTokenUtils {
    fn generate_token(
        &self,
        admin_id: &str,
        username: &str,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError>;
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    /// Create JWT utils from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_env().map_err(|_| JwtError::MissingSecret)?;
        jwt_config.validate().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_token(
        &self,
        admin_id: &str,
        username: &str,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        debug!("Generating token for admin: {} with role: {}", admin_id, role);

        let secret = self.jwt_config.jwt_secret.as_str();
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.jwt_config.token_expiration_minutes);

        let claims = Claims {
            sub: admin_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let secret = self.jwt_config.jwt_secret.as_str();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;
                if claims.exp < Utc::now().timestamp() {
                    warn!("Token has expired for admin: {}", claims.sub);
                    return Err(JwtError::TokenExpired);
                }
                Ok(claims)
            }
            Err(err) => {
                debug!("Failed to decode JWT token: {}", err);
                Err(JwtError::DecodingFailed(err.to_string()))
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        if !auth_header.starts_with("Bearer ") {
            return Err(JwtError::InvalidToken);
        }

        let token = auth_header.trim_start_matches("Bearer ").trim();
        if token.is_empty() {
            return Err(JwtError::InvalidToken);
        }

        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_utils() -> JwtTokenUtilsImpl {
        JwtTokenUtilsImpl::new(JwtConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            token_expiration_minutes: 60 * 24,
        })
    }

    #[test]
    fn generated_token_round_trips() {
        let utils = test_utils();
        let token = utils
            .generate_token("65f000000000000000000001", "admin", "admin@solartn.com", "super_admin")
            .unwrap();

        let claims = utils.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "65f000000000000000000001");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "super_admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let utils = test_utils();
        let other = JwtTokenUtilsImpl::new(JwtConfig {
            jwt_secret: "a-different-secret".to_string(),
            token_expiration_minutes: 60,
        });
        let token = other
            .generate_token("id", "admin", "admin@solartn.com", "admin")
            .unwrap();
        assert!(utils.validate_token(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let utils = test_utils();
        assert!(utils.extract_token_from_header("Bearer abc.def.ghi").is_ok());
        assert!(utils.extract_token_from_header("Basic abc").is_err());
        assert!(utils.extract_token_from_header("Bearer   ").is_err());
    }
}
