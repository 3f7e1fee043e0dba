//! Errors raised at the configuration boundary.
//!
//! Exploration itself cannot fail; only loading and validating scenarios can.

use thiserror::Error;

/// Scenario configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the scenario file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The scenario parsed but is not usable.
    #[error("validation error: {0}")]
    Validation(String),
}
