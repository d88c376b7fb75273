// Constants module - centralized default values for configuration
//
// Default values for the optimizer live here so the config structs,
// serde default functions and the CLI all agree on them.

// =============================================================================
// Optimized image defaults
// =============================================================================

/// Default upper bound on optimized image width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 1920;

/// Default upper bound on optimized image height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Default encoder quality for the JPEG path
pub const DEFAULT_JPEG_QUALITY: f32 = 0.8;

/// Default encoder quality for the WebP path
pub const DEFAULT_WEBP_QUALITY: f32 = 0.85;

/// Default pre-validation ceiling on input size (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// WebP is attempted by default when the runtime can encode it
pub const DEFAULT_CONVERT_TO_WEBP: bool = true;

// =============================================================================
// Thumbnail defaults
// =============================================================================

/// Default thumbnail width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;

/// Default thumbnail height in pixels
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 300;

/// Thumbnail quality on the WebP path
pub const THUMBNAIL_WEBP_QUALITY: f32 = 0.7;

/// Thumbnail quality on the JPEG path
pub const THUMBNAIL_JPEG_QUALITY: f32 = 0.6;

/// Light gray fill behind letterboxed thumbnails (#F0F0F0)
pub const THUMBNAIL_BACKGROUND: [u8; 4] = [240, 240, 240, 255];

// =============================================================================
// Accepted input types
// =============================================================================

/// MIME types the optimizer will decode
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

// =============================================================================
// Batch defaults
// =============================================================================

/// Default number of files optimized at once by the parallel batch
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
