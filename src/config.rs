use std::env;

use thiserror::Error;

use crate::domain::storefront::ContactDefaults;
use crate::infrastructure::telegram::DEFAULT_API_URL;

pub const DEFAULT_SUPPORT_PHONE: &str = "+998996448444";
pub const DEFAULT_SUPPORT_TELEGRAM: &str = "https://t.me/akramjon0011";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub support_phone: String,
    pub support_telegram: String,
    /// Chat notified about orders of bots whose owner has no Telegram id.
    pub admin_telegram_id: Option<String>,
    pub telegram_api_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => 8080,
        };

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            support_phone: get("SUPPORT_PHONE").unwrap_or_else(|| DEFAULT_SUPPORT_PHONE.to_string()),
            support_telegram: get("SUPPORT_TELEGRAM")
                .unwrap_or_else(|| DEFAULT_SUPPORT_TELEGRAM.to_string()),
            admin_telegram_id: get("ADMIN_TELEGRAM_ID"),
            telegram_api_url: get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    pub fn contact_defaults(&self) -> ContactDefaults {
        ContactDefaults {
            phone: self.support_phone.clone(),
            telegram: self.support_telegram.clone(),
        }
    }
}
