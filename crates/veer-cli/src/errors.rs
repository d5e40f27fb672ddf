use thiserror::Error;
use veer_core::VeeringError;

/// Errors that can occur while loading or analysing a session file
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file not found: {0}")]
    SessionFileNotFound(String),

    #[error("Session CSV format error at line {line}: {message}")]
    CsvFormat { line: usize, message: String },

    #[error("Session declares total_elapsed_ms={declared} but its samples sum to {computed}")]
    InconsistentTotal { declared: u64, computed: u64 },

    #[error("Unsupported session format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Analysis error: {0}")]
    Analysis(#[from] VeeringError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
