use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Token expiration time in minutes
    pub token_expiration_minutes: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_TOKEN_EXPIRY: Token expiration in minutes (defaults to 1440 = 24 hours)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
        })?;

        if jwt_secret.len() < 32 {
            error!("JWT_SECRET is too short (minimum 32 characters required)");
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let token_expiration_minutes = env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| {
                warn!("JWT_TOKEN_EXPIRY not set, using default: 1440 minutes (24 hours)");
                "1440".to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_TOKEN_EXPIRY value: {}", e);
                ConfigError::InvalidValue(format!("JWT_TOKEN_EXPIRY: {}", e))
            })?;

        let config = JwtConfig {
            jwt_secret,
            token_expiration_minutes,
        };

        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::InvalidValue(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.token_expiration_minutes <= 0 {
            error!("Token expiration must be greater than 0");
            return Err(ConfigError::InvalidValue(
                "Token expiration must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough".to_string(),
            token_expiration_minutes: 1440,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(JwtConfig::default().validate().is_ok());
    }

    #[test]
    fn short_secret_is_rejected() {
        let config = JwtConfig {
            jwt_secret: "short".to_string(),
            token_expiration_minutes: 60,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_expiry_is_rejected() {
        let config = JwtConfig {
            token_expiration_minutes: 0,
            ..JwtConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
