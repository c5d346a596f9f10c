//! Runtime configuration read from the environment (and `.env` via dotenvy)

use std::net::SocketAddr;

use chrono::{FixedOffset, Offset, Utc};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Ranch local time is UTC-6
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -6;

/// `DATABASE_URL` value selecting the in-process store
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres(String),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {}: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
    pub cors_allow_any: bool,
    pub utc_offset_hours: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let storage = if database_url.trim() == MEMORY_DATABASE_URL {
            StorageBackend::Memory
        } else {
            StorageBackend::Postgres(database_url)
        };

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_value.clone(),
        })?;

        let run_migrations = parse_bool(&lookup, "RUN_MIGRATIONS", true)?;
        let cors_allow_any = parse_bool(&lookup, "CORS_ALLOW_ANY", true)?;

        let utc_offset_hours = match lookup("RANCH_UTC_OFFSET_HOURS") {
            None => DEFAULT_UTC_OFFSET_HOURS,
            Some(value) => match value.trim().parse::<i32>() {
                Ok(hours) if (-12..=14).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RANCH_UTC_OFFSET_HOURS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            storage,
            bind_addr,
            run_migrations,
            cors_allow_any,
            utc_offset_hours,
        })
    }

    /// Offset used to decide what "today" is for date checks
    pub fn timezone(&self) -> FixedOffset {
        offset_from_hours(self.utc_offset_hours)
    }
}

pub fn offset_from_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| {
        tracing::warn!(hours, "UTC offset out of range, using UTC");
        Utc.fix()
    })
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://ranch@localhost/ranch")]).unwrap();

        assert_eq!(
            config.storage,
            StorageBackend::Postgres("postgres://ranch@localhost/ranch".to_string())
        );
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.run_migrations);
        assert!(config.cors_allow_any);
        assert_eq!(config.utc_offset_hours, -6);
        assert_eq!(config.timezone().local_minus_utc(), -6 * 3600);
    }

    #[test]
    fn test_missing_database_url() {
        let result = config_from(&[]);
        assert_eq!(result.unwrap_err(), ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_memory_backend() {
        let config = config_from(&[("DATABASE_URL", "memory://"), ("RUN_MIGRATIONS", "false")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_values() {
        let bad_bool = config_from(&[("DATABASE_URL", "memory://"), ("CORS_ALLOW_ANY", "maybe")]);
        assert!(matches!(bad_bool, Err(ConfigError::Invalid { key: "CORS_ALLOW_ANY", .. })));

        let bad_addr = config_from(&[("DATABASE_URL", "memory://"), ("BIND_ADDR", "nowhere")]);
        assert!(matches!(bad_addr, Err(ConfigError::Invalid { key: "BIND_ADDR", .. })));

        let bad_offset = config_from(&[("DATABASE_URL", "memory://"), ("RANCH_UTC_OFFSET_HOURS", "20")]);
        assert!(matches!(
            bad_offset,
            Err(ConfigError::Invalid { key: "RANCH_UTC_OFFSET_HOURS", .. })
        ));
    }
}
