//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building LUTs.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid LUT size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// A half-domain LUT must cover every half bit pattern.
    #[error("half-domain LUT must have 65536 entries, got {0}")]
    InvalidHalfDomainSize(usize),
}
