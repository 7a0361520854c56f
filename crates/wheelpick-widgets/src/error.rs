#![forbid(unsafe_code)]

//! Error types for selector configuration.

use thiserror::Error;

/// Errors that can occur when loading or checking a [`SelectorConfig`].
///
/// [`SelectorConfig`]: crate::config::SelectorConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more values out of range.
    #[error("invalid selector config: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },
}
