//! Batch optimization
//!
//! Each file is optimized independently. A failing file is recorded in
//! `errors` and never stops the rest of the batch.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::config::OptimizationOverrides;
use super::error::OptimizeError;
use super::input::InputImage;
use super::processor::{ImageOptimizer, OptimizedImageResult};

/// A file that could not be optimized
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Identifier of the failing input
    pub file: String,
    pub error: OptimizeError,
}

/// Successes and failures of a batch, each in input order
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<OptimizedImageResult>,
    pub errors: Vec<BatchFailure>,
}

impl BatchOutcome {
    fn collect(outcomes: Vec<(String, Result<OptimizedImageResult, OptimizeError>)>) -> Self {
        let mut batch = BatchOutcome::default();
        for (file, outcome) in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(error) => {
                    tracing::warn!(
                        file = %file,
                        kind = error.kind(),
                        error = %error,
                        "Image optimization failed"
                    );
                    batch.errors.push(BatchFailure { file, error });
                }
            }
        }
        batch
    }

    pub fn is_complete_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len()
    }
}

impl ImageOptimizer {
    /// Optimize files one after another
    pub fn optimize_multiple(
        &self,
        files: &[InputImage],
        overrides: Option<&OptimizationOverrides>,
    ) -> BatchOutcome {
        let outcomes = files
            .iter()
            .map(|file| (file.name().to_string(), self.optimize(file, overrides)))
            .collect();
        BatchOutcome::collect(outcomes)
    }

    /// Optimize files on a pool of at most `max_concurrency` threads
    ///
    /// Bounding the pool bounds how many decoded bitmaps are resident at
    /// once. Results keep input order. Falls back to sequential processing
    /// if the pool cannot be built.
    pub fn optimize_multiple_parallel(
        &self,
        files: &[InputImage],
        overrides: Option<&OptimizationOverrides>,
        max_concurrency: usize,
    ) -> BatchOutcome {
        let threads = max_concurrency.max(1);
        if threads == 1 || files.len() <= 1 {
            return self.optimize_multiple(files, overrides);
        }

        let pool = match ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("optimizer-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build optimizer pool, running sequentially");
                return self.optimize_multiple(files, overrides);
            }
        };

        let outcomes = pool.install(|| {
            files
                .par_iter()
                .map(|file| (file.name().to_string(), self.optimize(file, overrides)))
                .collect::<Vec<_>>()
        });
        BatchOutcome::collect(outcomes)
    }
}
