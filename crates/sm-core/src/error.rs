//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `SmError` as one variant
//! where they need to surface configuration or parse failures.

use thiserror::Error;

/// The base error type for `sm-core`.
#[derive(Debug, Error)]
pub enum SmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sm-core`.
pub type SmResult<T> = Result<T, SmError>;
