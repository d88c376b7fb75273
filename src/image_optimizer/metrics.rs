//! Per-call optimization statistics
//!
//! Tracks sizes, dimensions and timing for one optimization so the
//! processor can report compression and emit a structured log event.

use std::time::Duration;

use super::format::OutputFormat;

/// Percentage of bytes saved, rounded to one decimal place
///
/// `(original - optimized) / original * 100`. Negative when the optimized
/// image came out larger than the original; an empty original reports 0.0.
pub fn compression_ratio(original_size: usize, optimized_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let saved = original_size as f64 - optimized_size as f64;
    let percent = saved / original_size as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Statistics for a single optimization
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationMetrics {
    /// Original input size in bytes
    pub original_size: usize,
    /// Optimized image size in bytes
    pub optimized_size: usize,
    /// Thumbnail size in bytes
    pub thumbnail_size: usize,
    /// Source dimensions (width, height)
    pub original_dimensions: (u32, u32),
    /// Optimized dimensions (width, height)
    pub optimized_dimensions: (u32, u32),
    /// Output format used
    pub output_format: OutputFormat,
    /// Wall time spent decoding, resizing and encoding
    pub processing_time: Duration,
}

impl Default for OptimizationMetrics {
    fn default() -> Self {
        Self {
            original_size: 0,
            optimized_size: 0,
            thumbnail_size: 0,
            original_dimensions: (0, 0),
            optimized_dimensions: (0, 0),
            output_format: OutputFormat::Jpeg,
            processing_time: Duration::ZERO,
        }
    }
}

impl OptimizationMetrics {
    pub fn builder() -> OptimizationMetricsBuilder {
        OptimizationMetricsBuilder::default()
    }

    /// Percentage reduction, one decimal place
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.original_size, self.optimized_size)
    }

    /// Bytes saved (negative if the image grew)
    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.optimized_size as i64
    }

    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.optimized_dimensions
    }

    /// Log the outcome for `file`
    pub fn log(&self, file: &str) {
        tracing::info!(
            file = %file,
            format = %self.output_format,
            original_size = self.original_size,
            optimized_size = self.optimized_size,
            thumbnail_size = self.thumbnail_size,
            original_width = self.original_dimensions.0,
            original_height = self.original_dimensions.1,
            width = self.optimized_dimensions.0,
            height = self.optimized_dimensions.1,
            compression_ratio = self.compression_ratio(),
            elapsed_ms = self.processing_time.as_millis() as u64,
            "Image optimized"
        );
    }
}

/// Builder for OptimizationMetrics
#[derive(Debug, Clone, Default)]
pub struct OptimizationMetricsBuilder {
    original_size: usize,
    optimized_size: usize,
    thumbnail_size: usize,
    original_dimensions: (u32, u32),
    optimized_dimensions: (u32, u32),
    output_format: Option<OutputFormat>,
    processing_time: Duration,
}

impl OptimizationMetricsBuilder {
    pub fn original_size(mut self, size: usize) -> Self {
        self.original_size = size;
        self
    }

    pub fn optimized_size(mut self, size: usize) -> Self {
        self.optimized_size = size;
        self
    }

    pub fn thumbnail_size(mut self, size: usize) -> Self {
        self.thumbnail_size = size;
        self
    }

    pub fn original_dimensions(mut self, width: u32, height: u32) -> Self {
        self.original_dimensions = (width, height);
        self
    }

    pub fn optimized_dimensions(mut self, width: u32, height: u32) -> Self {
        self.optimized_dimensions = (width, height);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn processing_time(mut self, time: Duration) -> Self {
        self.processing_time = time;
        self
    }

    pub fn build(self) -> OptimizationMetrics {
        OptimizationMetrics {
            original_size: self.original_size,
            optimized_size: self.optimized_size,
            thumbnail_size: self.thumbnail_size,
            original_dimensions: self.original_dimensions,
            optimized_dimensions: self.optimized_dimensions,
            output_format: self.output_format.unwrap_or(OutputFormat::Jpeg),
            processing_time: self.processing_time,
        }
    }
}
