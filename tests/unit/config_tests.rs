// Configuration file loading and override layering

use feira_optimizer::config::{Config, ConfigError};
use feira_optimizer::image_optimizer::{OptimizationConfig, OptimizationOverrides};
use feira_optimizer::logging::LogFormat;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_can_load_full_config() {
    let yaml = r#"
optimizer:
  max_width: 1280
  max_height: 720
  quality: 0.75
  webp_quality: 0.9
  max_file_size: 10485760
  thumbnail_width: 200
  thumbnail_height: 150
  convert_to_webp: false
logging:
  level: debug
  format: pretty
batch:
  max_concurrency: 8
"#;
    let config = Config::from_yaml_with_env(yaml).expect("Failed to load config");
    let optimization = config.optimization_config();

    assert_eq!(optimization.max_width, 1280);
    assert_eq!(optimization.max_height, 720);
    assert_eq!(optimization.quality, 0.75);
    assert_eq!(optimization.webp_quality, 0.9);
    assert_eq!(optimization.max_file_size, 10 * 1024 * 1024);
    assert_eq!(optimization.thumbnail_width, 200);
    assert_eq!(optimization.thumbnail_height, 150);
    assert!(!optimization.convert_to_webp);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.batch.max_concurrency, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let yaml = r#"
optimizer:
  max_width: 800
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    let optimization = config.optimization_config();

    assert_eq!(optimization.max_width, 800);
    assert_eq!(
        optimization,
        OptimizationConfig {
            max_width: 800,
            ..OptimizationConfig::default()
        }
    );
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.batch.max_concurrency, 4);
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
optimizer:
  max_widht: 800
"#;
    let result = Config::from_yaml_with_env(yaml);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_yaml_rejected() {
    let yaml = r#"
optimizer:
  max_width: [800
"#;
    assert!(Config::from_yaml_with_env(yaml).is_err());
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("FEIRA_CFG_TEST_QUALITY", "0.5");
    let yaml = r#"
optimizer:
  quality: ${FEIRA_CFG_TEST_QUALITY}
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.optimization_config().quality, 0.5);
}

#[test]
fn test_missing_env_var_is_error() {
    let yaml = r#"
optimizer:
  max_width: ${FEIRA_CFG_TEST_NEVER_SET}
"#;
    match Config::from_yaml_with_env(yaml) {
        Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, "FEIRA_CFG_TEST_NEVER_SET"),
        other => panic!("expected MissingEnvVar, got {:?}", other),
    }
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "optimizer:\n  convert_to_webp: false\nbatch:\n  max_concurrency: 2").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(!config.optimization_config().convert_to_webp);
    assert_eq!(config.batch.max_concurrency, 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        "optimizer:\n  quality: 1.5\n",
        "optimizer:\n  max_width: 0\n",
        "optimizer:\n  max_file_size: 0\n",
        "batch:\n  max_concurrency: 0\n",
        "logging:\n  level: feira=verbose\n",
    ];

    for yaml in cases {
        let config = Config::from_yaml_with_env(yaml).unwrap();
        assert!(
            matches!(config.validate(), Err(ConfigError::Invalid(_))),
            "expected invalid: {}",
            yaml
        );
    }
}

#[test]
fn test_overrides_shallow_merge() {
    let base = OptimizationConfig::default();
    let merged = base.with_overrides(&OptimizationOverrides::new().quality(0.5));

    assert_eq!(merged.quality, 0.5);
    assert_eq!(merged.max_width, base.max_width);
    assert_eq!(merged.webp_quality, base.webp_quality);
    assert_eq!(merged.convert_to_webp, base.convert_to_webp);
    // Base is untouched
    assert_eq!(base.quality, 0.8);
}

#[test]
fn test_cli_overrides_win_over_file() {
    let file = OptimizationOverrides::new()
        .max_dimensions(1000, 1000)
        .convert_to_webp(true);
    let cli = OptimizationOverrides::new().convert_to_webp(false);

    let merged = file.merged_with(&cli);
    assert_eq!(merged.max_width, Some(1000));
    assert_eq!(merged.convert_to_webp, Some(false));
    assert!(OptimizationOverrides::new().is_empty());
    assert!(!merged.is_empty());
}
