use serde::{Deserialize, Serialize};
use std::env;

/// Destination number for generated WhatsApp deep links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsappConfig {
    /// Business number in international format without '+' (country code first).
    pub number: String,
}

impl WhatsappConfig {
    pub fn from_env() -> Self {
        WhatsappConfig {
            number: env::var("WHATSAPP_NUMBER").unwrap_or_else(|_| "919876543210".to_string()),
        }
    }
}

impl Default for WhatsappConfig {
    fn default() -> Self {
        WhatsappConfig {
            number: "919876543210".to_string(),
        }
    }
}
