//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the TOML configuration
//! consumed by the fault reporter and the inspector binary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use fault_common::config::{load_fault_config, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = load_fault_config(Path::new("fault.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::DEFAULT_STORE_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "fault-reporter"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Destination for human-readable fault diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SinkKind {
    /// Structured `tracing` event.
    #[default]
    Log = 0,
    /// Formatted text on standard output.
    Text = 1,
    /// Structured event followed by formatted text.
    Both = 2,
    /// No report; persist and halt silently.
    #[serde(rename = "none")]
    Silent = 3,
}

impl SinkKind {
    /// Decode the `repr(u8)` discriminant.
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Log),
            1 => Some(Self::Text),
            2 => Some(Self::Both),
            3 => Some(Self::Silent),
            _ => None,
        }
    }

    /// Whether the structured logger receives the report.
    #[inline]
    pub const fn logs(self) -> bool {
        matches!(self, Self::Log | Self::Both)
    }

    /// Whether the text sink receives the report.
    #[inline]
    pub const fn prints(self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Sink used by the default fault handler.
    #[serde(default)]
    pub sink: SinkKind,
}

/// Where `handle_fault` stashes the fault triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-wide retained word region.
    #[default]
    Retained,
    /// Memory-mapped record file.
    File,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Persistence backend.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Record file for the `file` backend. Defaults to [`DEFAULT_STORE_PATH`].
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Record file path, falling back to the default location.
    pub fn record_path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORE_PATH))
    }
}

/// Complete fault reporter configuration.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "fault-reporter"
///
/// [report]
/// sink = "both"
///
/// [store]
/// backend = "file"
/// path = "/var/lib/fault/record.bin"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaultConfig {
    /// Common fields.
    pub shared: SharedConfig,
    /// Report sink selection.
    #[serde(default)]
    pub report: ReportConfig,
    /// Persistence selection.
    #[serde(default)]
    pub store: StoreConfig,
}

impl FaultConfig {
    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `shared.service_name` is empty
    /// - `store.path` is given but empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "store.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Load and validate a [`FaultConfig`] from a TOML file.
pub fn load_fault_config(path: &Path) -> Result<FaultConfig, ConfigError> {
    let config = FaultConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Trait for loading configuration from TOML files.
///
/// Default implementation for any `serde::de::DeserializeOwned` type.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
