//! Output format negotiation
//!
//! The format is decided once per call, before anything is encoded:
//! WebP when the config asks for it and the runtime can encode it,
//! JPEG otherwise. An encode failure never triggers a second attempt in
//! the other format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::capability::WebPSupport;
use super::config::OptimizationConfig;
use super::error::OptimizeError;
use crate::constants::{THUMBNAIL_JPEG_QUALITY, THUMBNAIL_WEBP_QUALITY};

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    WebP,
    Jpeg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::WebP => "image/webp",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(OutputFormat::WebP),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(OptimizeError::config(format!("unknown output format: {}", s))),
        }
    }
}

/// Format and qualities chosen for one optimization call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingPlan {
    pub format: OutputFormat,
    /// Quality for the delivered image, in (0, 1]
    pub quality: f32,
    /// Quality for the preview thumbnail, in (0, 1]
    pub thumbnail_quality: f32,
}

/// Pick the output format and qualities for a call
pub fn plan_encoding(config: &OptimizationConfig, capabilities: &dyn WebPSupport) -> EncodingPlan {
    // Only probe when the config would actually use the answer
    if config.convert_to_webp && capabilities.supports_webp() {
        EncodingPlan {
            format: OutputFormat::WebP,
            quality: config.webp_quality,
            thumbnail_quality: THUMBNAIL_WEBP_QUALITY,
        }
    } else {
        EncodingPlan {
            format: OutputFormat::Jpeg,
            quality: config.quality,
            thumbnail_quality: THUMBNAIL_JPEG_QUALITY,
        }
    }
}
