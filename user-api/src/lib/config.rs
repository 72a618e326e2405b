use std::env;
use std::fmt::Display;

use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Placeholder secret accepted only outside production.
pub const INSECURE_JWT_SECRET: &str = "insecure-development-secret-change-me";

const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("LOG_LEVEL must be one of debug, info, warn, error, got {0}")]
    InvalidLogLevel(String),

    #[error("JWT_SECRET must be set to a non-default value in production")]
    InsecureJwtSecret,

    #[error("DATABASE_URL is required in production")]
    MissingDatabaseUrl,

    #[error("DATABASE_NAME must not be empty")]
    MissingDatabaseName,
}

/// Runtime settings, read from flat keys (`PORT`, `JWT_SECRET`, ...).
#[derive(Clone, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub log_level: String,
    pub rate_limit_rpm: u32,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("port", &self.port)
            .field("database_url", &"***")
            .field("database_name", &self.database_name)
            .field("jwt_secret", &"***")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("log_level", &self.log_level)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PORT, DATABASE_URL, JWT_SECRET, etc.)
    /// 2. Environment-specific config file (config/{ENVIRONMENT}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// # Errors
    /// * `Source` - A source could not be read or a value has the wrong type
    /// * Any validation error from [`Config::validate`]
    pub fn load() -> Result<Self, ConfigLoadError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self::from_builder(Self::layered(&environment, Environment::default())?)
    }

    /// Defaults, then config files for `environment`, then `variables`.
    ///
    /// Variables are kept as strings; typed fields are converted when the
    /// result is deserialized, so string settings such as `JWT_SECRET`
    /// arrive exactly as given.
    pub fn layered(
        environment: &str,
        variables: Environment,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(variables))
    }

    /// Builder pre-populated with the built-in defaults.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", "development")?
            .set_default("port", 8080)?
            .set_default("database_url", "")?
            .set_default("database_name", "userapi")?
            .set_default("jwt_secret", INSECURE_JWT_SECRET)?
            .set_default("jwt_expiry_hours", 5)?
            .set_default("log_level", "info")?
            .set_default("rate_limit_rpm", 50)?
            .set_default("bcrypt_cost", 12)
    }

    /// Build, deserialize and validate.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigLoadError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// * `OutOfRange` - A numeric setting is outside its allowed range
    /// * `InvalidLogLevel` - LOG_LEVEL is not a known level
    /// * `MissingDatabaseName` - DATABASE_NAME is empty
    /// * `InsecureJwtSecret` - Production with an empty or placeholder secret
    /// * `MissingDatabaseUrl` - Production without DATABASE_URL
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        check_range("PORT", self.port, 1, u16::MAX)?;
        check_range("JWT_EXPIRY_HOURS", self.jwt_expiry_hours, 1, 168)?;
        check_range("RATE_LIMIT_RPM", self.rate_limit_rpm, 1, 10_000)?;
        check_range("BCRYPT_COST", self.bcrypt_cost, 10, 15)?;

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigLoadError::InvalidLogLevel(self.log_level.clone()));
        }

        if self.database_name.trim().is_empty() {
            return Err(ConfigLoadError::MissingDatabaseName);
        }

        if self.is_production() {
            if self.jwt_secret.is_empty() || self.jwt_secret == INSECURE_JWT_SECRET {
                return Err(ConfigLoadError::InsecureJwtSecret);
            }
            if self.database_url.trim().is_empty() {
                return Err(ConfigLoadError::MissingDatabaseUrl);
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Whether error responses may carry internal details.
    pub fn expose_error_details(&self) -> bool {
        !self.is_production()
    }

    /// Access token lifetime taken from `JWT_EXPIRY_HOURS`.
    ///
    /// Replaces the issuer's 24 hour default; refresh tokens keep 168 hours.
    pub fn access_token_ttl(&self) -> Duration {
        Duration::hours(self.jwt_expiry_hours)
    }

    pub fn uses_database(&self) -> bool {
        !self.database_url.trim().is_empty()
    }
}

fn check_range<T>(key: &'static str, value: T, min: T, max: T) -> Result<(), ConfigLoadError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigLoadError::OutOfRange {
            key,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
