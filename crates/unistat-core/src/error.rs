//! Error types for blank-aware statistics
//!
//! Provides a unified error type for all unistat crates.

use crate::buffer::ElementType;
use thiserror::Error;

/// Core error type for statistical operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed input data (raw storage, tile geometry)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No code path exists for the requested element type
    #[error("Unsupported element type: {0}")]
    UnsupportedElementType(String),

    /// A value was compared against a distribution of another type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },

    /// Nothing usable remains once blanks are removed
    #[error("No usable data for {0}: input is empty or entirely blank")]
    EmptyOrAllBlank(String),

    /// IO error (for configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty (or entirely blank) input
    pub fn empty_input(operation: &str) -> Self {
        Self::EmptyOrAllBlank(operation.to_string())
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for a value/distribution type disagreement
    pub fn type_mismatch(expected: ElementType, actual: ElementType) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create an error for an unknown element type name or code
    pub fn unsupported_type(name: impl std::fmt::Display) -> Self {
        Self::UnsupportedElementType(name.to_string())
    }

    /// Validate a quantile fraction
    pub fn check_quantile(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Self::invalid_quantile(p));
        }
        Ok(())
    }
}
