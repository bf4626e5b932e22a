//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

use mes_observability::tracing::DEFAULT_FILTER;
use mes_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "MES_BIND_ADDR";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Process configuration for the MES service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (unset or blank variables use defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                message: e.to_string(),
            })?;

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(v) => v.parse::<LogFormat>().map_err(|message| ConfigError::Invalid {
                var: LOG_FORMAT_VAR,
                message,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            log_filter: get(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            log_format,
        })
    }
}
