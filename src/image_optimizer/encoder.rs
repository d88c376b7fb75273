//! Image encoder abstraction
//!
//! One encoder per output format behind the `ImageEncoder` trait, so the
//! processor encodes the optimized image and the thumbnail the same way
//! once the format has been planned.

use super::error::OptimizeError;
use super::format::OutputFormat;
use super::input::ImageBlob;
use super::surface::DrawingSurface;

/// Encoder quality as a percentage (1-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    pub percent: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self { percent: 80 }
    }
}

impl EncoderQuality {
    /// Convert a (0, 1] quality fraction into an encoder percentage
    pub fn from_fraction(quality: f32) -> Self {
        let percent = (quality * 100.0).round();
        let percent = if percent.is_nan() {
            1
        } else {
            percent.clamp(1.0, 100.0) as u8
        };
        Self { percent }
    }
}

/// Encodes a drawing surface into a blob of a specific format
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    fn encode(
        &self,
        surface: &DrawingSurface,
        quality: EncoderQuality,
    ) -> Result<ImageBlob, OptimizeError>;
}

/// Baseline JPEG encoder using the image crate
///
/// Alpha is dropped, not composited: a transparent pixel keeps whatever
/// color it stores. Thumbnails are already flattened onto the gray canvas.
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(
        &self,
        surface: &DrawingSurface,
        quality: EncoderQuality,
    ) -> Result<ImageBlob, OptimizeError> {
        let (width, height) = surface.dimensions();
        let rgb = strip_alpha(surface.as_raw());

        // Roughly a tenth of the raw size at typical photo qualities
        let mut jpeg = Vec::with_capacity(rgb.len() / 10);
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality.percent)
            .encode(&rgb, width, height, image::ColorType::Rgb8)
            .map_err(|e| OptimizeError::encode_failed(OutputFormat::Jpeg.as_str(), e.to_string()))?;

        Ok(ImageBlob::new(jpeg, OutputFormat::Jpeg))
    }
}

/// Lossy WebP encoder backed by libwebp
pub struct WebPEncoder;

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::WebP
    }

    fn encode(
        &self,
        surface: &DrawingSurface,
        quality: EncoderQuality,
    ) -> Result<ImageBlob, OptimizeError> {
        let encoder = webp::Encoder::from_rgba(surface.as_raw(), surface.width(), surface.height());

        let memory = encoder
            .encode_simple(false, quality.percent as f32)
            .map_err(|e| OptimizeError::encode_failed(OutputFormat::WebP.as_str(), format!("{:?}", e)))?;

        Ok(ImageBlob::new(memory.to_vec(), OutputFormat::WebP))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::WebP => Box::new(WebPEncoder),
        }
    }
}

/// Packed RGB copy of packed RGBA pixels
fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}
