// Single-image optimization through the public API

use super::support::*;
use feira_optimizer::image_optimizer::{
    compression_ratio, InputImage, OptimizationOverrides, OptimizeError, OutputFormat,
};
use rstest::rstest;

#[rstest]
#[case::landscape(2400, 1600)]
#[case::portrait(900, 2000)]
#[case::panorama(5000, 700)]
#[case::odd(1999, 1001)]
fn test_aspect_ratio_preserved(#[case] width: u32, #[case] height: u32) {
    let input = jpeg_input("foto.jpg", width, height);
    let result = optimizer_with_webp(false).optimize(&input, None).unwrap();

    let (w, h) = decoded_dimensions(result.optimized.as_bytes());
    assert_eq!((w, h), (result.width, result.height));

    let expected_h = w as f64 * height as f64 / width as f64;
    let expected_w = h as f64 * width as f64 / height as f64;
    assert!(
        (h as f64 - expected_h).abs() <= 1.0 || (w as f64 - expected_w).abs() <= 1.0,
        "{}x{} -> {}x{}",
        width,
        height,
        w,
        h
    );
}

#[test]
fn test_no_upscaling_for_small_images() {
    let input = jpeg_input("pequena.jpg", 640, 480);
    let result = optimizer_with_webp(false).optimize(&input, None).unwrap();

    assert_eq!((result.width, result.height), (640, 480));
    assert_eq!(decoded_dimensions(result.optimized.as_bytes()), (640, 480));
}

#[test]
fn test_downscale_respects_bounds() {
    let overrides = OptimizationOverrides::new().max_dimensions(500, 400);
    for (w, h) in [(1000, 1000), (2000, 500), (600, 1200)] {
        let input = jpeg_input("grande.jpg", w, h);
        let result = optimizer_with_webp(false)
            .optimize(&input, Some(&overrides))
            .unwrap();
        assert!(result.width <= 500, "{}x{} -> width {}", w, h, result.width);
        assert!(result.height <= 400, "{}x{} -> height {}", w, h, result.height);
    }
}

#[rstest]
#[case::square(500, 500)]
#[case::wide(1200, 300)]
#[case::tall(200, 900)]
#[case::smaller_than_thumbnail(40, 30)]
fn test_thumbnail_has_fixed_size(#[case] width: u32, #[case] height: u32) {
    let input = InputImage::new("thumb.png", "image/png", png_bytes(width, height));
    let result = optimizer_with_webp(false).optimize(&input, None).unwrap();

    assert_eq!(decoded_dimensions(result.thumbnail.as_bytes()), (300, 300));
    assert_eq!((result.thumbnail_width, result.thumbnail_height), (300, 300));
}

#[test]
fn test_custom_thumbnail_size() {
    let overrides = OptimizationOverrides::new().thumbnail_dimensions(160, 90);
    let input = jpeg_input("slide.jpg", 800, 800);
    let result = optimizer_with_webp(false)
        .optimize(&input, Some(&overrides))
        .unwrap();

    assert_eq!(decoded_dimensions(result.thumbnail.as_bytes()), (160, 90));
}

#[test]
fn test_webp_thumbnail_dimensions() {
    let input = jpeg_input("slide.jpg", 1000, 400);
    let result = optimizer_with_webp(true).optimize(&input, None).unwrap();

    let dims = image::io::Reader::new(std::io::Cursor::new(result.thumbnail.as_bytes()))
        .with_guessed_format()
        .unwrap()
        .into_dimensions()
        .unwrap();
    assert_eq!(dims, (300, 300));
}

#[test]
fn test_compression_ratio_matches_sizes() {
    for webp in [true, false] {
        let input = jpeg_input("banca.jpg", 1600, 1200);
        let result = optimizer_with_webp(webp).optimize(&input, None).unwrap();

        assert_eq!(result.size, result.optimized.len());
        assert_eq!(result.original_size, input.size());
        assert_eq!(
            result.compression_ratio,
            compression_ratio(result.original_size, result.size)
        );
        // One decimal place
        let scaled = result.compression_ratio * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}

#[test]
fn test_compression_ratio_can_be_negative() {
    // A tiny, heavily compressed source grows when re-encoded at higher quality
    let input = InputImage::new("mini.jpg", "image/jpeg", jpeg_bytes(8, 8, 10));
    let overrides = OptimizationOverrides::new().quality(1.0);
    let result = optimizer_with_webp(false)
        .optimize(&input, Some(&overrides))
        .unwrap();

    assert!(result.size > result.original_size);
    assert!(result.compression_ratio < 0.0);
}

#[test]
fn test_convert_to_webp_false_always_jpeg() {
    let overrides = OptimizationOverrides::new().convert_to_webp(false);
    for supported in [true, false] {
        let input = jpeg_input("produto.jpg", 300, 200);
        let result = optimizer_with_webp(supported)
            .optimize(&input, Some(&overrides))
            .unwrap();
        assert_eq!(result.format, OutputFormat::Jpeg);
        assert_eq!(result.optimized.mime_type(), "image/jpeg");
        assert_eq!(result.thumbnail.mime_type(), "image/jpeg");
    }
}

#[test]
fn test_webp_output_when_supported() {
    let input = jpeg_input("produto.jpg", 300, 200);
    let result = optimizer_with_webp(true).optimize(&input, None).unwrap();

    assert_eq!(result.format, OutputFormat::WebP);
    assert_eq!(&result.optimized.as_bytes()[0..4], b"RIFF");
    assert_eq!(&result.thumbnail.as_bytes()[8..12], b"WEBP");
}

#[test]
fn test_accepts_every_input_format() {
    let inputs = vec![
        InputImage::new("a.jpg", "image/jpeg", jpeg_bytes(64, 48, 90)),
        InputImage::new("b.png", "image/png", png_bytes(64, 48)),
        InputImage::new("c.gif", "image/gif", gif_bytes(64, 48)),
        InputImage::new("d.webp", "image/webp", webp_bytes(64, 48)),
    ];

    for input in inputs {
        let result = optimizer_with_webp(false)
            .optimize(&input, None)
            .unwrap_or_else(|e| panic!("{} failed: {}", input.name(), e));
        assert_eq!((result.width, result.height), (64, 48));
    }
}

#[test]
fn test_transparent_png_to_jpeg() {
    let input = InputImage::new("logo.png", "image/png", transparent_png_bytes(200, 100));
    let result = optimizer_with_webp(false).optimize(&input, None).unwrap();

    assert_eq!(result.format, OutputFormat::Jpeg);
    assert_eq!(decoded_dimensions(result.thumbnail.as_bytes()), (300, 300));
}

#[test]
fn test_corrupt_input_is_decode_error() {
    let err = optimizer_with_webp(true)
        .optimize(&corrupt_jpeg_input("quebrada.jpg"), None)
        .unwrap_err();

    assert!(matches!(err, OptimizeError::Decode { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_invalid_input_fails_validation_with_all_errors() {
    let overrides = OptimizationOverrides::new().max_file_size(2);
    let input = InputImage::new("planilha.xlsx", "application/vnd.ms-excel", vec![0u8; 16]);

    let err = optimizer_with_webp(true)
        .optimize(&input, Some(&overrides))
        .unwrap_err();

    assert_eq!(err.validation_errors().len(), 2);
}

#[test]
fn test_large_photo_with_default_config() {
    // 4000x3000 photo: the width pass gives 1920x1440, the height pass
    // then brings it inside 1080
    let input = InputImage::new("feira.jpg", "image/jpeg", jpeg_bytes(4000, 3000, 95));
    let overrides = OptimizationOverrides::new().max_file_size(16 * 1024 * 1024);

    for (supported, format) in [(true, OutputFormat::WebP), (false, OutputFormat::Jpeg)] {
        let result = optimizer_with_webp(supported)
            .optimize(&input, Some(&overrides))
            .unwrap();

        assert_eq!((result.width, result.height), (1440, 1080));
        assert_eq!(result.format, format);
        assert!(result.size < input.size());
        assert!(result.compression_ratio > 0.0);
        assert_eq!(result.metrics.original_dimensions, (4000, 3000));
    }
}

#[rstest]
#[case::horizontal_strip(16000, 1)]
#[case::vertical_strip(1, 16000)]
#[case::thin_band(4000, 2)]
fn test_extreme_aspect_ratio_thumbnail(#[case] width: u32, #[case] height: u32) {
    // A few hundred bytes of PNG, well within the size limit
    let input = InputImage::new("faixa.png", "image/png", png_bytes(width, height));
    let result = optimizer_with_webp(false).optimize(&input, None).unwrap();

    assert_eq!(decoded_dimensions(result.thumbnail.as_bytes()), (300, 300));
    assert!(result.width <= 1920 && result.height <= 1080);
}
