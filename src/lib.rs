pub mod api;
pub mod config;
pub mod model;
pub mod playfair;
pub mod scorer;
pub mod substitution;
// cmd and reports are binary modules (declared in main.rs).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("insufficient text: {got} symbols after normalization, need at least {needed}")]
    InsufficientText { needed: usize, got: usize },

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invariant Violation: {0}")]
    InvariantViolation(String),
}

pub type CfResult<T> = Result<T, CipherForgeError>;
