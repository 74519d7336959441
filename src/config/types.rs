//! Configuration types and CLI options.
//!
//! This module defines the service configuration. It is parsed once at startup
//! from command-line flags and environment variables, validated, and then
//! passed explicitly to every component that needs it.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum_macros::{Display, EnumString};

use crate::config::constants::{DEFAULT_CMS_API_KEY_HEADER, DEFAULT_DB_PATH, DEFAULT_PORT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Shape of the JSON object posted by an intake surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum IntakeFormat {
    /// A flat object of field name to value, with `Source` and `Dealership` keys.
    Flat,
    /// `{"source": "...", "fields": {...}}` with `Dealership` inside `fields`.
    Wrapped,
}

/// Which inbound field becomes the lead's region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RegionField {
    /// The `Dealership` field.
    Dealership,
    /// The `Province` field.
    Province,
}

/// Which value becomes the lead's source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SourceLabel {
    /// The source code the intake surface sent.
    Inbound,
    /// The canonical source label stored on the dealer route.
    Route,
}

/// How the CMS credential is attached to the forwarded request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CmsAuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `<cms_auth_header>: <key>`
    ApiKey,
}

/// Per-surface mapping choices applied by the intake decoder and lead mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntakeProfile {
    pub format: IntakeFormat,
    pub region_field: RegionField,
    pub source_label: SourceLabel,
}

impl Default for IntakeProfile {
    fn default() -> Self {
        Self {
            format: IntakeFormat::Wrapped,
            region_field: RegionField::Dealership,
            source_label: SourceLabel::Inbound,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

/// Service configuration.
///
/// # Examples
///
/// ```no_run
/// use lead_relay::Config;
///
/// let config = Config {
///     cms_api_url: "https://cms.example.com/api/leads".to_string(),
///     cms_api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// config.validate().unwrap();
/// ```
#[derive(Clone, Parser)]
#[command(name = "lead_relay", version, about)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind the listener to
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// SQLite database file holding dealer routes and the audit trail
    #[arg(long, env = "LEAD_RELAY_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// CMS lead endpoint
    #[arg(long, env = "CMS_API_URL")]
    pub cms_api_url: String,

    /// CMS credential
    #[arg(long, env = "CMS_API_KEY", hide_env_values = true)]
    pub cms_api_key: String,

    /// How the CMS credential is sent
    #[arg(long, env = "CMS_AUTH_SCHEME", value_enum, default_value_t = CmsAuthScheme::Bearer)]
    pub cms_auth_scheme: CmsAuthScheme,

    /// Header carrying the credential when the scheme is `api-key`
    #[arg(long, env = "CMS_AUTH_HEADER", default_value = DEFAULT_CMS_API_KEY_HEADER)]
    pub cms_auth_header: String,

    /// Shape of inbound lead payloads
    #[arg(long, env = "INTAKE_FORMAT", value_enum, default_value_t = IntakeFormat::Wrapped)]
    pub intake_format: IntakeFormat,

    /// Inbound field used as the lead region
    #[arg(long, env = "REGION_FIELD", value_enum, default_value_t = RegionField::Dealership)]
    pub region_field: RegionField,

    /// Where the lead source comes from
    #[arg(long, env = "SOURCE_LABEL", value_enum, default_value_t = SourceLabel::Inbound)]
    pub source_label: SourceLabel,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Checks every field that can be wrong independently of the environment.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with a message describing the
    /// expected value.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(ConfigValidationError {
                field: "port",
                message: "port must be greater than 0".to_string(),
            });
        }

        let url = url::Url::parse(&self.cms_api_url).map_err(|e| ConfigValidationError {
            field: "cms_api_url",
            message: format!(
                "expected an absolute URL such as https://cms.example.com/leads ({e})"
            ),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigValidationError {
                field: "cms_api_url",
                message: format!("scheme must be http or https, got {}", url.scheme()),
            });
        }

        if self.cms_api_key.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "cms_api_key",
                message: "CMS credential must not be empty (set CMS_API_KEY)".to_string(),
            });
        }

        if self.cms_auth_scheme == CmsAuthScheme::ApiKey
            && reqwest::header::HeaderName::from_bytes(self.cms_auth_header.as_bytes()).is_err()
        {
            return Err(ConfigValidationError {
                field: "cms_auth_header",
                message: format!("'{}' is not a valid header name", self.cms_auth_header),
            });
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigValidationError {
                field: "db_path",
                message: "database path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Mapping choices for the configured intake surface.
    pub fn intake_profile(&self) -> IntakeProfile {
        IntakeProfile {
            format: self.intake_format,
            region_field: self.region_field,
            source_label: self.source_label,
        }
    }

    /// `host:port` the server binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            cms_api_url: String::new(),
            cms_api_key: String::new(),
            cms_auth_scheme: CmsAuthScheme::Bearer,
            cms_auth_header: DEFAULT_CMS_API_KEY_HEADER.to_string(),
            intake_format: IntakeFormat::Wrapped,
            region_field: RegionField::Dealership,
            source_label: SourceLabel::Inbound,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

// The credential stays out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_address", &self.bind_address)
            .field("db_path", &self.db_path)
            .field("cms_api_url", &self.cms_api_url)
            .field("cms_api_key", &"<redacted>")
            .field("cms_auth_scheme", &self.cms_auth_scheme)
            .field("cms_auth_header", &self.cms_auth_header)
            .field("intake_format", &self.intake_format)
            .field("region_field", &self.region_field)
            .field("source_label", &self.source_label)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}
