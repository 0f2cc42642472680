//! Error types for mech-model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing elastic moduli: {0}")]
    MissingModuli(String),

    #[error("Invalid elastic moduli: {0}")]
    InvalidModuli(String),

    #[error("Invalid time settings: {0}")]
    InvalidTime(String),
}
