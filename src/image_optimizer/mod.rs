//! Image optimization module
//!
//! Turns an uploaded image into a size-bounded, re-encoded variant plus a
//! fixed-size thumbnail before it is sent to object storage:
//! - Pre-decode validation of declared type and size
//! - Aspect-preserving downscale with a Lanczos3 filter
//! - Center-cropped "cover" thumbnails on a light gray canvas
//! - WebP output when available, JPEG otherwise
//! - Compression statistics per image
//!
//! # Example
//!
//! ```no_run
//! use feira_optimizer::image_optimizer::{ImageOptimizer, InputImage, OptimizationOverrides};
//!
//! let optimizer = ImageOptimizer::default();
//! let file = InputImage::from_path("banca.jpg").unwrap();
//!
//! let overrides = OptimizationOverrides::new().max_dimensions(1280, 720);
//! let result = optimizer.optimize(&file, Some(&overrides)).unwrap();
//! println!("{}x{} {} ({}% smaller)", result.width, result.height, result.format, result.compression_ratio);
//! ```

pub mod batch;
pub mod capability;
pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod geometry;
pub mod input;
pub mod metrics;
pub mod processor;
pub mod surface;
pub mod validation;

// Re-export commonly used types
pub use batch::{BatchFailure, BatchOutcome};
pub use capability::{RuntimeWebPSupport, StaticWebPSupport, WebPSupport};
pub use config::{OptimizationConfig, OptimizationOverrides};
pub use encoder::{EncoderFactory, EncoderQuality, ImageEncoder};
pub use error::OptimizeError;
pub use format::{plan_encoding, EncodingPlan, OutputFormat};
pub use geometry::{cover_crop, fit_within, CoverCrop};
pub use input::{mime_type_for_path, ImageBlob, InputImage};
pub use metrics::{compression_ratio, OptimizationMetrics, OptimizationMetricsBuilder};
pub use processor::{ImageOptimizer, OptimizedImageResult};
pub use surface::DrawingSurface;
pub use validation::{is_accepted_mime_type, validate_image_file, ValidationResult};
