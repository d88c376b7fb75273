//! Optimizer configuration
//!
//! `OptimizationConfig` holds the full set of knobs with documented defaults.
//! `OptimizationOverrides` is the partial form callers hand to
//! `ImageOptimizer::optimize`; it is applied as a shallow override where
//! every `Some` field replaces the base value and every `None` keeps it.

use serde::{Deserialize, Serialize};

use super::error::OptimizeError;
use crate::constants::{
    DEFAULT_CONVERT_TO_WEBP, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_HEIGHT,
    DEFAULT_MAX_WIDTH, DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH, DEFAULT_WEBP_QUALITY,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Upper bound on the optimized image width
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Upper bound on the optimized image height
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Encoder quality for the JPEG path, in (0, 1]
    #[serde(default = "default_quality")]
    pub quality: f32,

    /// Encoder quality for the WebP path, in (0, 1]
    #[serde(default = "default_webp_quality")]
    pub webp_quality: f32,

    /// Input size ceiling in bytes, checked before decoding only
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Exact thumbnail width
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,

    /// Exact thumbnail height
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,

    /// Attempt WebP output when the runtime supports it
    #[serde(default = "default_convert_to_webp")]
    pub convert_to_webp: bool,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_JPEG_QUALITY,
            webp_quality: DEFAULT_WEBP_QUALITY,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            convert_to_webp: DEFAULT_CONVERT_TO_WEBP,
        }
    }
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

fn default_quality() -> f32 {
    DEFAULT_JPEG_QUALITY
}

fn default_webp_quality() -> f32 {
    DEFAULT_WEBP_QUALITY
}

fn default_max_file_size() -> usize {
    DEFAULT_MAX_FILE_SIZE
}

fn default_thumbnail_width() -> u32 {
    DEFAULT_THUMBNAIL_WIDTH
}

fn default_thumbnail_height() -> u32 {
    DEFAULT_THUMBNAIL_HEIGHT
}

fn default_convert_to_webp() -> bool {
    DEFAULT_CONVERT_TO_WEBP
}

impl OptimizationConfig {
    /// Apply a partial override on top of this config
    ///
    /// The merge is shallow: each field is taken from `overrides` when set
    /// and from `self` otherwise.
    pub fn with_overrides(&self, overrides: &OptimizationOverrides) -> Self {
        Self {
            max_width: overrides.max_width.unwrap_or(self.max_width),
            max_height: overrides.max_height.unwrap_or(self.max_height),
            quality: overrides.quality.unwrap_or(self.quality),
            webp_quality: overrides.webp_quality.unwrap_or(self.webp_quality),
            max_file_size: overrides.max_file_size.unwrap_or(self.max_file_size),
            thumbnail_width: overrides.thumbnail_width.unwrap_or(self.thumbnail_width),
            thumbnail_height: overrides.thumbnail_height.unwrap_or(self.thumbnail_height),
            convert_to_webp: overrides.convert_to_webp.unwrap_or(self.convert_to_webp),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(OptimizeError::config(format!(
                "max dimensions must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }

        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(OptimizeError::config(format!(
                "thumbnail dimensions must be positive, got {}x{}",
                self.thumbnail_width, self.thumbnail_height
            )));
        }

        if self.max_file_size == 0 {
            return Err(OptimizeError::config("max_file_size must be positive"));
        }

        validate_quality("quality", self.quality)?;
        validate_quality("webp_quality", self.webp_quality)?;

        Ok(())
    }
}

fn validate_quality(name: &str, value: f32) -> Result<(), OptimizeError> {
    // NaN fails both comparisons
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(OptimizeError::config(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )))
    }
}

/// Partial configuration; unset fields fall back to the base config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp_quality: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_to_webp: Option<bool>,
}

impl OptimizationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn webp_quality(mut self, quality: f32) -> Self {
        self.webp_quality = Some(quality);
        self
    }

    pub fn max_file_size(mut self, bytes: usize) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    pub fn thumbnail_dimensions(mut self, width: u32, height: u32) -> Self {
        self.thumbnail_width = Some(width);
        self.thumbnail_height = Some(height);
        self
    }

    pub fn convert_to_webp(mut self, enabled: bool) -> Self {
        self.convert_to_webp = Some(enabled);
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merged_with(&self, other: &OptimizationOverrides) -> Self {
        Self {
            max_width: other.max_width.or(self.max_width),
            max_height: other.max_height.or(self.max_height),
            quality: other.quality.or(self.quality),
            webp_quality: other.webp_quality.or(self.webp_quality),
            max_file_size: other.max_file_size.or(self.max_file_size),
            thumbnail_width: other.thumbnail_width.or(self.thumbnail_width),
            thumbnail_height: other.thumbnail_height.or(self.thumbnail_height),
            convert_to_webp: other.convert_to_webp.or(self.convert_to_webp),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
