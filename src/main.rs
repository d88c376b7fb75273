use anyhow::Context;
use clap::{Parser, ValueEnum};
use feira_optimizer::config::Config;
use feira_optimizer::image_optimizer::{ImageOptimizer, InputImage, OptimizationOverrides};
use feira_optimizer::logging::init_subscriber;
use feira_optimizer::output::{batch_reports, FileReport, OutputWriter};
use std::path::PathBuf;

/// Feira Livre image optimizer - resize, re-encode and thumbnail upload images
#[derive(Parser, Debug)]
#[command(name = "feira-optimizer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Images to optimize
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for optimized images and thumbnails
    #[arg(short, long, default_value = "optimized")]
    out_dir: PathBuf,

    /// Files optimized at the same time
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Always produce JPEG
    #[arg(long)]
    no_webp: bool,

    /// Maximum output width
    #[arg(long)]
    max_width: Option<u32>,

    /// Maximum output height
    #[arg(long)]
    max_height: Option<u32>,

    /// JPEG quality, in (0, 1]
    #[arg(long)]
    quality: Option<f32>,

    /// WebP quality, in (0, 1]
    #[arg(long)]
    webp_quality: Option<f32>,

    /// Maximum accepted input size in bytes
    #[arg(long)]
    max_file_size: Option<usize>,

    /// Thumbnail width
    #[arg(long)]
    thumbnail_width: Option<u32>,

    /// Thumbnail height
    #[arg(long)]
    thumbnail_height: Option<u32>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,

    /// Log filter directive (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate inputs and configuration without writing anything
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

impl Args {
    fn overrides(&self) -> OptimizationOverrides {
        OptimizationOverrides {
            max_width: self.max_width,
            max_height: self.max_height,
            quality: self.quality,
            webp_quality: self.webp_quality,
            max_file_size: self.max_file_size,
            thumbnail_width: self.thumbnail_width,
            thumbnail_height: self.thumbnail_height,
            convert_to_webp: self.no_webp.then_some(false),
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    config.optimizer = config.optimizer.merged_with(&args.overrides());
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(jobs) = args.jobs {
        config.batch.max_concurrency = jobs;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<bool> {
    let config = load_config(&args)?;

    init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    let optimizer = ImageOptimizer::with_runtime_support(config.optimization_config());

    tracing::info!(
        files = args.files.len(),
        out_dir = %args.out_dir.display(),
        max_concurrency = config.batch.max_concurrency,
        max_width = optimizer.config().max_width,
        max_height = optimizer.config().max_height,
        convert_to_webp = optimizer.config().convert_to_webp,
        "Configuration loaded successfully"
    );

    let mut reports = Vec::new();
    let mut inputs = Vec::new();
    for path in &args.files {
        match InputImage::from_path(path) {
            Ok(input) => inputs.push(input),
            Err(e) => reports.push(FileReport::failed(path.display().to_string(), "io", e.to_string())),
        }
    }

    if args.check {
        for input in &inputs {
            let validation = optimizer.validate_image_file(input);
            if !validation.is_valid {
                reports.push(FileReport::Failed {
                    file: input.name().to_string(),
                    kind: "validation".to_string(),
                    error: validation.errors.join("; "),
                    errors: validation.errors,
                });
            }
        }
        print_reports(&reports, args.format)?;
        return Ok(reports.iter().all(|r| !r.is_failure()));
    }

    let outcome = optimizer.optimize_multiple_parallel(&inputs, None, config.batch.max_concurrency);

    let mut writer = OutputWriter::new(&args.out_dir);
    for result in &outcome.results {
        match writer.write(result) {
            Ok(written) => reports.push(FileReport::optimized(result, Some(written))),
            Err(e) => reports.push(FileReport::failed(result.original.name(), "io", e.to_string())),
        }
    }
    reports.extend(batch_reports(&outcome).into_iter().filter(FileReport::is_failure));

    print_reports(&reports, args.format)?;

    tracing::info!(
        optimized = outcome.results.len(),
        out_dir = %writer.out_dir().display(),
        failed = reports.iter().filter(|r| r.is_failure()).count(),
        "Batch finished"
    );

    Ok(reports.iter().all(|r| !r.is_failure()))
}

fn print_reports(reports: &[FileReport], format: SummaryFormat) -> anyhow::Result<()> {
    match format {
        SummaryFormat::Text => {
            for report in reports {
                println!("{}", report.to_text());
            }
        }
        SummaryFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}
