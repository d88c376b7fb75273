//! Input file validation
//!
//! Runs before any decoding. Every rule is checked and every violation is
//! reported, so an upload form can show the complete list at once.

use serde::Serialize;

use super::config::OptimizationConfig;
use super::input::InputImage;
use crate::constants::ACCEPTED_MIME_TYPES;

/// Outcome of validating an input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Whether the declared MIME type is one the optimizer decodes
pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    ACCEPTED_MIME_TYPES.contains(&normalized.as_str())
}

/// Check declared type and size against the config
pub fn validate_image_file(file: &InputImage, config: &OptimizationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_accepted_mime_type(file.mime_type()) {
        errors.push(format!(
            "Unsupported file type '{}': use JPEG, PNG, WebP or GIF",
            file.mime_type()
        ));
    }

    if file.size() > config.max_file_size {
        errors.push(format!(
            "File is too large ({}): maximum is {}",
            format_bytes(file.size()),
            format_bytes(config.max_file_size)
        ));
    }

    ValidationResult::from_errors(errors)
}

/// Human-readable byte count, e.g. "5.0 MB"
fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} bytes", bytes)
    }
}
