//! Optimizer error types
//!
//! Bad input (validation, decoding) is kept apart from processing failures
//! (resize, encode) so callers can decide whether to ask the user for a
//! different file or report an internal fault.

use std::fmt;

/// Errors that can occur during a single optimization call
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    // === Input Errors ===
    /// Input failed type or size checks; carries every violated rule
    Validation { errors: Vec<String> },
    /// Input passed validation but its bytes could not be decoded
    Decode { message: String },

    // === Processing Errors ===
    /// Resampling onto a drawing surface failed
    Resize { message: String },
    /// Encoding to the output format failed
    Encode { format: String, message: String },

    // === Configuration Errors ===
    /// The effective configuration is invalid
    Config { message: String },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::Validation { errors } => {
                write!(f, "Invalid image file: {}", errors.join("; "))
            }
            OptimizeError::Decode { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            OptimizeError::Resize { message } => {
                write!(f, "Resize failed: {}", message)
            }
            OptimizeError::Encode { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            OptimizeError::Config { message } => {
                write!(f, "Invalid optimizer configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for OptimizeError {}

impl OptimizeError {
    /// True when the input file is at fault rather than the pipeline
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OptimizeError::Validation { .. } | OptimizeError::Decode { .. }
        )
    }

    /// Short machine-friendly label, used in structured logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizeError::Validation { .. } => "validation",
            OptimizeError::Decode { .. } => "decode",
            OptimizeError::Resize { .. } => "resize",
            OptimizeError::Encode { .. } => "encode",
            OptimizeError::Config { .. } => "config",
        }
    }

    /// Violated rules for a validation error, empty otherwise
    pub fn validation_errors(&self) -> &[String] {
        match self {
            OptimizeError::Validation { errors } => errors,
            _ => &[],
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        OptimizeError::Validation { errors }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        OptimizeError::Decode {
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        OptimizeError::Resize {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        OptimizeError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        OptimizeError::Config {
            message: message.into(),
        }
    }
}
