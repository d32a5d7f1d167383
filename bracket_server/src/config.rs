//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bracket_engine::{store::DatabaseConfig, tournament::ManagerSettings};
use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

/// Default server bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:6969";

/// Where bracket documents are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process map, lost on restart
    Memory,
    /// PostgreSQL `brackets` table
    Postgres,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            _ => Err(ConfigError::Invalid {
                var: "STORE_BACKEND".to_string(),
                reason: format!("Unknown backend '{}', expected memory or postgres", s),
            }),
        }
    }
}

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Bracket document backend
    pub store: StoreBackend,
    /// Database configuration (used by the postgres backend)
    pub database: DatabaseConfig,
    /// Tournament manager settings
    pub tournaments: ManagerSettings,
    /// Prometheus exporter address, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<SocketAddr>,
    pub database_url: Option<String>,
    pub store: Option<StoreBackend>,
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let bind = match overrides.bind {
            Some(bind) => bind,
            None => parse_env_addr("SERVER_BIND")?.unwrap_or_else(default_bind),
        };

        let store = match overrides.store {
            Some(store) => store,
            None => match std::env::var("STORE_BACKEND") {
                Ok(value) => value.parse()?,
                Err(_) => StoreBackend::Memory,
            },
        };

        let database_url = overrides
            .database_url
            .or_else(|| std::env::var("DATABASE_URL").ok());

        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Set DATABASE_URL or pass --db-url when STORE_BACKEND=postgres".to_string(),
            });
        }

        let mut database = DatabaseConfig::from_env();
        if let Some(url) = database_url {
            database.database_url = url;
        }

        let defaults = ManagerSettings::default();
        // 0 keeps idle actors running
        let idle_secs = parse_env_or(
            "ACTOR_IDLE_TIMEOUT_SECS",
            defaults.idle_timeout.map_or(0, |d| d.as_secs()),
        );
        let tournaments = ManagerSettings {
            min_participants: parse_env_or("MIN_PARTICIPANTS", defaults.min_participants),
            inbox_capacity: parse_env_or("TOURNAMENT_INBOX_CAPACITY", defaults.inbox_capacity),
            event_buffer: parse_env_or("EVENT_BUFFER", defaults.event_buffer),
            idle_timeout: (idle_secs > 0).then(|| Duration::from_secs(idle_secs)),
        };

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => parse_env_addr("METRICS_BIND")?,
        };

        Ok(ServerConfig {
            bind,
            store,
            database,
            tournaments,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournaments.min_participants < 2 {
            return Err(ConfigError::Invalid {
                var: "MIN_PARTICIPANTS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.tournaments.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.tournaments.event_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "EVENT_BUFFER".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.store == StoreBackend::Postgres
            && self.database.min_connections > self.database.max_connections
        {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6969))
}

/// Parse an optional socket address, rejecting malformed values
fn parse_env_addr(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{}' is not a valid IP:PORT address", value),
        }),
        Err(_) => Ok(None),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:8080".parse().unwrap(),
            store: StoreBackend::Memory,
            database: DatabaseConfig::development(),
            tournaments: ManagerSettings::default(),
            metrics_bind: None,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "DATABASE_URL".to_string(),
            hint: "Pass --db-url".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DATABASE_URL"));
        assert!(msg.contains("Pass --db-url"));
    }

    #[test]
    fn test_default_bind_matches_constant() {
        assert_eq!(default_bind(), DEFAULT_BIND.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("Postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!(matches!(
            "redis".parse::<StoreBackend>(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_config_validation_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_min_participants() {
        let mut config = base_config();
        config.tournaments.min_participants = 1;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "MIN_PARTICIPANTS"));
    }

    #[test]
    fn test_config_validation_event_buffer_zero() {
        let mut config = base_config();
        config.tournaments.event_buffer = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_metrics_bind_collision() {
        let mut config = base_config();
        config.metrics_bind = Some(config.bind);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides_win() {
        let config = ServerConfig::from_env(ConfigOverrides {
            bind: Some("0.0.0.0:9000".parse().unwrap()),
            database_url: Some("postgres://override/db".to_string()),
            store: Some(StoreBackend::Postgres),
            metrics_bind: None,
        })
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.database.database_url, "postgres://override/db");
    }
}
