use std::{env, fmt, str::FromStr};

use thiserror::Error;

use crate::services::auth_service::DEFAULT_BCRYPT_COST;

const DEFAULT_DATABASE_URL: &str =
    "mongodb://127.0.0.1:27017/attendance?directConnection=true&serverSelectionTimeoutMS=2000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}', expected mongodb or memory", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::MongoDb => write!(f, "mongodb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Runtime settings, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub storage: StorageBackend,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bcrypt_cost: u32 = parse("BCRYPT_COST", var("BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string()))?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Config {
            host: var("HOST", "0.0.0.0"),
            port: parse("PORT", var("PORT", "5000"))?,
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_name: var("DATABASE_NAME", "attendance"),
            storage: parse("STORAGE_BACKEND", var("STORAGE_BACKEND", "mongodb"))?,
            bcrypt_cost,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.storage, StorageBackend::MongoDb);
        assert_eq!(config.bcrypt_cost, 10);
        assert!(config.database_url.starts_with("mongodb://127.0.0.1:27017"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("STORAGE_BACKEND", "Memory"),
            ("BCRYPT_COST", "12"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "not-a-port")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("STORAGE_BACKEND", "redis")]),
            Err(ConfigError::Invalid { key: "STORAGE_BACKEND", .. })
        ));
        assert!(matches!(
            config_from(&[("BCRYPT_COST", "3")]),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
    }
}
