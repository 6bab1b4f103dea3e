//! Service configuration.
//!
//! Everything is read once at startup. Parsing goes through a lookup
//! function so the same code serves the process environment and tests.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `BODY_LIMIT_BYTES`: Maximum request body size (default: 10 MiB)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//! - `BFHL_FULL_NAME`, `BFHL_DATE_OF_BIRTH`, `BFHL_EMAIL`, `BFHL_ROLL_NUMBER`:
//!   identity details echoed in every classification response

use std::net::SocketAddr;

use chrono::NaiveDate;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_FULL_NAME: &str = "john_doe";
const DEFAULT_DATE_OF_BIRTH: &str = "17091999";
const DEFAULT_EMAIL: &str = "john@xyz.com";
const DEFAULT_ROLL_NUMBER: &str = "ABCD123";

/// Date layout of `BFHL_DATE_OF_BIRTH`.
const DATE_OF_BIRTH_FORMAT: &str = "%d%m%Y";

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {name}: {message} (got '{value}')")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Error message.
        message: String,
        /// Actual value.
        value: String,
    },

    /// A required value is blank.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: &'static str,
    },

    /// Date of birth is not a real ddmmyyyy date.
    #[error("Invalid BFHL_DATE_OF_BIRTH: expected ddmmyyyy (got '{0}')")]
    InvalidDateOfBirth(String),

    /// Email does not look like an address.
    #[error("Invalid BFHL_EMAIL: expected local@domain (got '{0}')")]
    InvalidEmail(String),

    /// Unknown log format.
    #[error("Invalid LOG_FORMAT: expected 'pretty' or 'json' (got '{0}')")]
    InvalidLogFormat(String),

    /// Host and port do not form a socket address.
    #[error("Invalid server address: {host}:{port}")]
    InvalidAddress {
        /// Host part.
        host: String,
        /// Port part.
        port: u16,
    },
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Complete configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listener and runtime settings.
    pub server: ServerConfig,
    /// Identity details echoed in responses.
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Variables that are unset or not valid unicode fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            identity: IdentityConfig::from_lookup(&lookup)?,
        })
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Result of parsing `WORKER_THREADS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerThreads {
    /// Thread count to configure, `None` for the runtime default.
    pub count: Option<usize>,
    /// Warning to log once logging is up.
    pub warning: Option<String>,
}

impl WorkerThreads {
    /// Interprets a raw `WORKER_THREADS` value.
    ///
    /// Blank or missing means the default. Zero or garbage falls back to the
    /// default with a warning. Anything above four threads per available core
    /// is capped.
    #[must_use]
    pub fn parse(raw: Option<&str>, available_parallelism: usize) -> Self {
        let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::default();
        };

        match trimmed.parse::<usize>() {
            Ok(0) => Self {
                count: None,
                warning: Some("WORKER_THREADS=0 is invalid (must be > 0), using default".into()),
            },
            Ok(requested) => {
                let max_threads = available_parallelism.saturating_mul(4);
                if requested > max_threads {
                    Self {
                        count: Some(max_threads),
                        warning: Some(format!(
                            "WORKER_THREADS={requested} exceeds recommended limit ({max_threads}), capping to {max_threads}"
                        )),
                    }
                } else {
                    Self {
                        count: Some(requested),
                        warning: None,
                    }
                }
            }
            Err(error) => Self {
                count: None,
                warning: Some(format!(
                    "WORKER_THREADS='{trimmed}' is not a valid number ({error}), using default"
                )),
            },
        }
    }
}

/// Listener and runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum accepted request body in bytes.
    pub body_limit_bytes: usize,
    /// Tokio worker thread setting.
    pub worker_threads: WorkerThreads,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            worker_threads: WorkerThreads::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let available_parallelism = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(16);

        let config = Self {
            host: lookup("HOST")
                .filter(|host| !host.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_number(lookup, "PORT", DEFAULT_PORT)?,
            body_limit_bytes: parse_number(lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
            worker_threads: WorkerThreads::parse(
                lookup("WORKER_THREADS").as_deref(),
                available_parallelism,
            ),
            log_format: lookup("LOG_FORMAT")
                .map_or(Ok(LogFormat::default()), |value| value.parse())?,
        };

        if config.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "BODY_LIMIT_BYTES",
                message: "must be greater than zero".to_string(),
                value: "0".to_string(),
            });
        }
        config.socket_addr()?;
        Ok(config)
    }

    /// Returns the address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

/// Parses a number, falling back to `default` when the variable is unset.
fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|error: T::Err| ConfigError::InvalidValue {
                name,
                message: error.to_string(),
                value,
            }),
        None => Ok(default),
    }
}

// =============================================================================
// Identity Configuration
// =============================================================================

/// Identity details returned with every classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Lower-case full name with underscores for spaces.
    pub full_name: String,
    /// Date of birth as ddmmyyyy.
    pub date_of_birth: String,
    /// Contact email.
    pub email: String,
    /// College roll number.
    pub roll_number: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            full_name: DEFAULT_FULL_NAME.to_string(),
            date_of_birth: DEFAULT_DATE_OF_BIRTH.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            roll_number: DEFAULT_ROLL_NUMBER.to_string(),
        }
    }
}

impl IdentityConfig {
    /// Builds and validates identity details.
    ///
    /// The full name is normalized to lower case with runs of whitespace
    /// replaced by a single underscore.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is blank, the date of birth is not a
    /// real ddmmyyyy date, or the email lacks a local part or domain.
    pub fn new(
        full_name: &str,
        date_of_birth: &str,
        email: &str,
        roll_number: &str,
    ) -> Result<Self, ConfigError> {
        let full_name = full_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        if full_name.is_empty() {
            return Err(ConfigError::Empty {
                name: "BFHL_FULL_NAME",
            });
        }

        let date_of_birth = date_of_birth.trim().to_string();
        let is_valid_date = date_of_birth.len() == 8
            && date_of_birth.bytes().all(|byte| byte.is_ascii_digit())
            && NaiveDate::parse_from_str(&date_of_birth, DATE_OF_BIRTH_FORMAT).is_ok();
        if !is_valid_date {
            return Err(ConfigError::InvalidDateOfBirth(date_of_birth));
        }

        let email = email.trim().to_string();
        let is_valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !is_valid_email {
            return Err(ConfigError::InvalidEmail(email));
        }

        let roll_number = roll_number.trim().to_string();
        if roll_number.is_empty() {
            return Err(ConfigError::Empty {
                name: "BFHL_ROLL_NUMBER",
            });
        }

        Ok(Self {
            full_name,
            date_of_birth,
            email,
            roll_number,
        })
    }

    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        Self::new(
            &value("BFHL_FULL_NAME", DEFAULT_FULL_NAME),
            &value("BFHL_DATE_OF_BIRTH", DEFAULT_DATE_OF_BIRTH),
            &value("BFHL_EMAIL", DEFAULT_EMAIL),
            &value("BFHL_ROLL_NUMBER", DEFAULT_ROLL_NUMBER),
        )
    }

    /// Returns `{full_name}_{date_of_birth}`.
    #[must_use]
    pub fn user_id(&self) -> String {
        format!("{}_{}", self.full_name, self.date_of_birth)
    }
}

// =============================================================================
// Tests
// =============================================================================
