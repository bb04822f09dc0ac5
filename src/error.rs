//! Error types for assumption loading, validation and report export

use thiserror::Error;

use crate::assumptions::InputBounds;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("missing configuration key: {key}")]
    MissingKey { key: String },

    #[error("invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("'{key}' = {value} is outside the allowed range {bounds}")]
    OutOfRange {
        key: String,
        value: f64,
        bounds: InputBounds,
    },

    #[error("malformed override '{0}', expected key=value")]
    MalformedOverride(String),

    #[error("unknown assumption key: {0}")]
    UnknownKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RoiError>;
