//! Writing optimized images to disk and summarising a batch

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::image_optimizer::{BatchOutcome, OptimizedImageResult};

/// Paths written for one optimized image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFiles {
    pub optimized: PathBuf,
    pub thumbnail: PathBuf,
}

/// Writes optimized images of one batch into a directory
///
/// Files are named `<stem>.<ext>` and `<stem>_thumb.<ext>` after the input.
/// When two inputs of the same batch map to the same name, later ones get
/// a numeric suffix (`tomate-1.webp`) instead of overwriting earlier output.
#[derive(Debug)]
pub struct OutputWriter {
    out_dir: PathBuf,
    used: HashSet<String>,
}

impl OutputWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            used: HashSet::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn write(&mut self, result: &OptimizedImageResult) -> std::io::Result<WrittenFiles> {
        std::fs::create_dir_all(&self.out_dir)?;

        let stem = Path::new(result.original.name())
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let ext = result.format.extension();
        let stem = self.claim(&stem, ext);

        let optimized = self.out_dir.join(format!("{}.{}", stem, ext));
        let thumbnail = self.out_dir.join(format!("{}_thumb.{}", stem, ext));

        std::fs::write(&optimized, result.optimized.as_bytes())?;
        std::fs::write(&thumbnail, result.thumbnail.as_bytes())?;

        Ok(WrittenFiles {
            optimized,
            thumbnail,
        })
    }

    /// First stem not yet written in this batch for `ext`
    fn claim(&mut self, stem: &str, ext: &str) -> String {
        let mut candidate = stem.to_string();
        let mut suffix = 0;
        while !self.used.insert(format!("{}.{}", candidate, ext)) {
            suffix += 1;
            candidate = format!("{}-{}", stem, suffix);
        }
        if suffix > 0 {
            tracing::warn!(
                stem = %stem,
                renamed = %candidate,
                "Output name already used in this batch, writing under a new name"
            );
        }
        candidate
    }
}

/// One line of the batch summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileReport {
    Optimized {
        file: String,
        format: String,
        width: u32,
        height: u32,
        original_size: usize,
        size: usize,
        compression_ratio: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        written: Option<WrittenFiles>,
    },
    Failed {
        file: String,
        kind: String,
        error: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        errors: Vec<String>,
    },
}

impl FileReport {
    pub fn optimized(result: &OptimizedImageResult, written: Option<WrittenFiles>) -> Self {
        FileReport::Optimized {
            file: result.original.name().to_string(),
            format: result.format.to_string(),
            width: result.width,
            height: result.height,
            original_size: result.original_size,
            size: result.size,
            compression_ratio: result.compression_ratio,
            written,
        }
    }

    pub fn failed(file: impl Into<String>, kind: impl Into<String>, error: impl Into<String>) -> Self {
        FileReport::Failed {
            file: file.into(),
            kind: kind.into(),
            error: error.into(),
            errors: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileReport::Failed { .. })
    }

    /// Single-line human summary
    pub fn to_text(&self) -> String {
        match self {
            FileReport::Optimized {
                file,
                format,
                width,
                height,
                original_size,
                size,
                compression_ratio,
                ..
            } => format!(
                "ok    {}: {}x{} {} {} -> {} bytes ({:.1}% saved)",
                file, width, height, format, original_size, size, compression_ratio
            ),
            FileReport::Failed { file, error, .. } => format!("error {}: {}", file, error),
        }
    }
}

/// Reports for a whole batch, failures carrying their full rule list
pub fn batch_reports(outcome: &BatchOutcome) -> Vec<FileReport> {
    let mut reports: Vec<FileReport> = outcome
        .results
        .iter()
        .map(|result| FileReport::optimized(result, None))
        .collect();

    reports.extend(outcome.errors.iter().map(|failure| FileReport::Failed {
        file: failure.file.clone(),
        kind: failure.error.kind().to_string(),
        error: failure.error.to_string(),
        errors: failure.error.validation_errors().to_vec(),
    }));

    reports
}
