use serde::{Deserialize, Serialize};
use std::env;

/// Bootstrap credentials for the default super admin account, created at
/// startup when no account exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl AdminUserConfig {
    pub fn from_env() -> Self {
        AdminUserConfig {
            username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@solartn.com".to_string()),
            password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            first_name: env::var("ADMIN_FIRST_NAME").unwrap_or_else(|_| "Admin".to_string()),
            last_name: env::var("ADMIN_LAST_NAME").unwrap_or_else(|_| "User".to_string()),
        }
    }
}
