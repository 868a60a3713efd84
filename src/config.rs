use crate::domain::PaymentMethod;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: Ipv4Addr,
    pub snapshot_path: String,
    pub default_payment_method: PaymentMethod,
    pub ledger_cache: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let bind_addr = env_map
            .get("BIND_ADDR")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<Ipv4Addr>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BIND_ADDR".to_string(),
                    "must be an IPv4 address".to_string(),
                )
            })?;

        let snapshot_path = env_map
            .get("SNAPSHOT_PATH")
            .cloned()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("SNAPSHOT_PATH".to_string()))?;

        let default_payment_method = match env_map.get("DEFAULT_PAYMENT_METHOD") {
            None => PaymentMethod::Cash,
            Some(raw) => raw.parse::<PaymentMethod>().map_err(|_| {
                ConfigError::InvalidValue(
                    "DEFAULT_PAYMENT_METHOD".to_string(),
                    format!("must be cash or transfer, got {}", raw),
                )
            })?,
        };

        let ledger_cache = match env_map
            .get("LEDGER_CACHE")
            .map(|s| s.as_str())
            .unwrap_or("true")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LEDGER_CACHE".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        Ok(Config {
            port,
            bind_addr,
            snapshot_path,
            default_payment_method,
            ledger_cache,
        })
    }
}
