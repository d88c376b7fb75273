// Feira Livre image optimizer library
//
// Prepares product, banca and carousel images for upload: bounded resize,
// WebP/JPEG re-encoding, fixed-size thumbnails and compression stats.

pub mod config;
pub mod constants;
pub mod image_optimizer;
pub mod logging;
pub mod output;
