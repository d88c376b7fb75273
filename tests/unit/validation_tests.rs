// Validation rules for incoming files

use super::support::*;
use feira_optimizer::image_optimizer::{
    validate_image_file, ImageOptimizer, InputImage, OptimizationConfig, OptimizationOverrides,
    OptimizeError, StaticWebPSupport,
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[case("image/jpeg")]
#[case("image/png")]
#[case("image/webp")]
#[case("image/gif")]
fn test_accepted_types_pass(#[case] mime_type: &str) {
    let input = InputImage::new("foto", mime_type, vec![0u8; 128]);
    let result = validate_image_file(&input, &OptimizationConfig::default());

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[rstest]
#[case("image/bmp")]
#[case("image/svg+xml")]
#[case("application/pdf")]
#[case("")]
fn test_other_types_rejected(#[case] mime_type: &str) {
    let input = InputImage::new("arquivo", mime_type, vec![0u8; 128]);
    let result = validate_image_file(&input, &OptimizationConfig::default());

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_size_at_limit_is_valid() {
    let config = OptimizationConfig {
        max_file_size: 1024,
        ..OptimizationConfig::default()
    };

    let at_limit = InputImage::new("a.png", "image/png", vec![0u8; 1024]);
    assert!(validate_image_file(&at_limit, &config).is_valid);

    let over = InputImage::new("b.png", "image/png", vec![0u8; 1025]);
    let result = validate_image_file(&over, &config);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_default_limit_is_five_mebibytes() {
    let config = OptimizationConfig::default();
    let at_limit = InputImage::new("a.jpg", "image/jpeg", vec![0u8; 5 * 1024 * 1024]);
    let over = InputImage::new("b.jpg", "image/jpeg", vec![0u8; 5 * 1024 * 1024 + 1]);

    assert!(validate_image_file(&at_limit, &config).is_valid);
    assert!(!validate_image_file(&over, &config).is_valid);
}

#[test]
fn test_both_violations_reported() {
    let config = OptimizationConfig {
        max_file_size: 10,
        ..OptimizationConfig::default()
    };
    let input = InputImage::new("doc.bmp", "image/bmp", vec![0u8; 11]);

    let result = validate_image_file(&input, &config);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_is_valid_iff_no_errors() {
    let config = OptimizationConfig::default();
    let inputs = [
        InputImage::new("ok.png", "image/png", vec![1, 2, 3]),
        InputImage::new("bad.txt", "text/plain", vec![1, 2, 3]),
    ];

    for input in &inputs {
        let result = validate_image_file(input, &config);
        assert_eq!(result.is_valid, result.errors.is_empty());
    }
}

#[test]
fn test_validation_ignores_content() {
    // Validation only looks at the declared type and size
    let input = corrupt_jpeg_input("quebrada.jpg");
    assert!(validate_image_file(&input, &OptimizationConfig::default()).is_valid);
}

#[test]
fn test_optimizer_validates_against_effective_config() {
    let optimizer = ImageOptimizer::new(
        OptimizationConfig::default(),
        Arc::new(StaticWebPSupport::new(false)),
    );
    let input = jpeg_input("foto.jpg", 32, 32);
    let overrides = OptimizationOverrides::new().max_file_size(input.size() - 1);

    assert!(optimizer.validate_image_file(&input).is_valid);
    let effective = optimizer.effective_config(Some(&overrides));
    assert!(!validate_image_file(&input, &effective).is_valid);

    let err = optimizer.optimize(&input, Some(&overrides)).unwrap_err();
    assert!(matches!(err, OptimizeError::Validation { .. }));
}

#[test]
fn test_oversized_file_rejected_before_decoding() {
    // Bytes are not an image at all; the size rule fires first
    let optimizer = optimizer_with_webp(true);
    let overrides = OptimizationOverrides::new().max_file_size(4);
    let input = InputImage::new("grande.jpg", "image/jpeg", vec![7u8; 64]);

    let err = optimizer.optimize(&input, Some(&overrides)).unwrap_err();
    assert_eq!(err.kind(), "validation");
}
