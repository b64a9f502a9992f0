use std::env;

use sqlx::postgres::PgConnectOptions;

/// Failure to assemble [`AppConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_user: String,
    pub db_host: String,
    pub db_name: String,
    pub db_pass: String,
    pub db_port: u16,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));
        let port = |var: &'static str, default: u16| match lookup(var) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var, value }),
            None => Ok(default),
        };

        Ok(Self {
            db_user: required("DB_USER")?,
            db_host: required("DB_HOST")?,
            db_name: required("DB_NAME")?,
            db_pass: lookup("DB_PASS").unwrap_or_default(),
            db_port: port("DB_PORT", 5432)?,
            host: lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: port("BACKEND_PORT", 3000)?,
        })
    }

    /// Connection parameters for the external PostgreSQL store.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_pass)
            .database(&self.db_name)
    }
}
