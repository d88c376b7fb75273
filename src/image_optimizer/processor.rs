//! Image optimization pipeline
//!
//! validate → decode → resize → thumbnail → encode, for one input image.

use image::io::Reader as ImageReader;
use image::DynamicImage;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use super::capability::{RuntimeWebPSupport, WebPSupport};
use super::config::{OptimizationConfig, OptimizationOverrides};
use super::encoder::{EncoderFactory, EncoderQuality};
use super::error::OptimizeError;
use super::format::{plan_encoding, OutputFormat};
use super::geometry::{cover_crop, fit_within};
use super::input::{ImageBlob, InputImage};
use super::metrics::OptimizationMetrics;
use super::surface::DrawingSurface;
use super::validation::{validate_image_file, ValidationResult};
use crate::constants::THUMBNAIL_BACKGROUND;

/// Result of optimizing one image
#[derive(Debug, Clone)]
pub struct OptimizedImageResult {
    /// The input this result was produced from
    pub original: InputImage,
    /// The resized, re-encoded image
    pub optimized: ImageBlob,
    /// Fixed-size center-cropped preview
    pub thumbnail: ImageBlob,
    /// Optimized image width in pixels
    pub width: u32,
    /// Optimized image height in pixels
    pub height: u32,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub format: OutputFormat,
    /// Optimized image size in bytes
    pub size: usize,
    /// Input size in bytes
    pub original_size: usize,
    /// Percentage reduction, one decimal place (negative if the image grew)
    pub compression_ratio: f64,
    pub metrics: OptimizationMetrics,
}

impl OptimizedImageResult {
    /// Give both encoded buffers back once they have been uploaded
    pub fn release(self) {
        self.optimized.release();
        self.thumbnail.release();
    }
}

/// Optimizes images for upload
///
/// Holds only immutable configuration and a capability provider, so one
/// instance can be shared across threads.
#[derive(Clone)]
pub struct ImageOptimizer {
    config: OptimizationConfig,
    capabilities: Arc<dyn WebPSupport>,
}

impl std::fmt::Debug for ImageOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageOptimizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ImageOptimizer {
    fn default() -> Self {
        Self::with_runtime_support(OptimizationConfig::default())
    }
}

impl ImageOptimizer {
    pub fn new(config: OptimizationConfig, capabilities: Arc<dyn WebPSupport>) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Optimizer that probes the linked WebP encoder
    pub fn with_runtime_support(config: OptimizationConfig) -> Self {
        Self::new(config, Arc::new(RuntimeWebPSupport::new()))
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Base config with `overrides` applied
    pub fn effective_config(&self, overrides: Option<&OptimizationOverrides>) -> OptimizationConfig {
        match overrides {
            Some(overrides) => self.config.with_overrides(overrides),
            None => self.config.clone(),
        }
    }

    /// Check an input against this optimizer's base config
    pub fn validate_image_file(&self, file: &InputImage) -> ValidationResult {
        validate_image_file(file, &self.config)
    }

    /// Optimize one image
    ///
    /// Fails with `Validation` before decoding when the input is rejected,
    /// `Decode` when the bytes are unreadable, and `Resize`/`Encode` when
    /// processing fails.
    pub fn optimize(
        &self,
        file: &InputImage,
        overrides: Option<&OptimizationOverrides>,
    ) -> Result<OptimizedImageResult, OptimizeError> {
        let started = Instant::now();
        let config = self.effective_config(overrides);
        config.validate()?;

        let validation = validate_image_file(file, &config);
        if !validation.is_valid {
            tracing::debug!(
                file = %file.name(),
                errors = ?validation.errors,
                "Rejected image before decoding"
            );
            return Err(OptimizeError::validation(validation.errors));
        }

        // 1. Decode
        let source = DrawingSurface::from_image(&decode_image(file.data())?);
        let (src_width, src_height) = source.dimensions();

        // 2. Resize within bounds
        let (width, height) = fit_within(src_width, src_height, config.max_width, config.max_height);
        let resized = source.resized(width, height)?;

        // 3. Thumbnail from the untouched source
        let thumbnail = render_thumbnail(&source, config.thumbnail_width, config.thumbnail_height)?;
        source.release();

        // 4. Encode both with the planned format
        let plan = plan_encoding(&config, self.capabilities.as_ref());
        let encoder = EncoderFactory::create(plan.format);
        let optimized = encoder.encode(&resized, EncoderQuality::from_fraction(plan.quality))?;
        let thumbnail_blob =
            encoder.encode(&thumbnail, EncoderQuality::from_fraction(plan.thumbnail_quality))?;
        resized.release();
        thumbnail.release();

        let metrics = OptimizationMetrics::builder()
            .original_size(file.size())
            .optimized_size(optimized.len())
            .thumbnail_size(thumbnail_blob.len())
            .original_dimensions(src_width, src_height)
            .optimized_dimensions(width, height)
            .output_format(plan.format)
            .processing_time(started.elapsed())
            .build();
        metrics.log(file.name());

        Ok(OptimizedImageResult {
            original: file.clone(),
            size: optimized.len(),
            original_size: file.size(),
            compression_ratio: metrics.compression_ratio(),
            optimized,
            thumbnail: thumbnail_blob,
            width,
            height,
            thumbnail_width: config.thumbnail_width,
            thumbnail_height: config.thumbnail_height,
            format: plan.format,
            metrics,
        })
    }
}

/// Decode image data, sniffing the container from its bytes
fn decode_image(data: &[u8]) -> Result<DynamicImage, OptimizeError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| OptimizeError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| OptimizeError::decode_failed(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(OptimizeError::decode_failed("image has no pixels"));
    }
    Ok(img)
}

/// Center-crop the source to the thumbnail's aspect ratio and resample
/// the crop straight onto a `tw` x `th` canvas
///
/// The canvas is filled with the thumbnail background first so
/// transparent sources show a neutral gray instead of black.
fn render_thumbnail(
    source: &DrawingSurface,
    thumbnail_width: u32,
    thumbnail_height: u32,
) -> Result<DrawingSurface, OptimizeError> {
    let crop = cover_crop(
        source.width(),
        source.height(),
        thumbnail_width,
        thumbnail_height,
    );
    let scaled = source.resized_region(crop, thumbnail_width, thumbnail_height)?;

    let mut canvas = DrawingSurface::filled(thumbnail_width, thumbnail_height, THUMBNAIL_BACKGROUND);
    canvas.draw(&scaled, 0, 0);
    scaled.release();

    Ok(canvas)
}
