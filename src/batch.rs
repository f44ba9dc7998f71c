//! Directory-level helpers for the command line driver: input discovery, output naming and
//! optional per-image parallelism.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Source extensions picked up by [`collect_inputs`], compared case-insensitively.
pub const INPUT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
}

/// Supported image files directly inside `dir`, sorted by path.
pub fn collect_inputs(dir: &Path) -> ThumbResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read input dir '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list input dir '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_supported_input(&path) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// `image-{n}-{k}.jpg`, both indices 1-based.
pub fn styled_output_name(image_index: usize, style_index: usize) -> String {
    format!("image-{image_index}-{style_index}.jpg")
}

/// `Thumb-{n}.jpg`, 1-based.
pub fn brand_output_name(image_index: usize) -> String {
    format!("Thumb-{image_index}.jpg")
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOpts {
    pub parallel: bool,
    /// Worker threads in parallel mode; rayon's default when `None`.
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub images: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Run `job(n, path)` for every input, `n` starting at 1. `job` returns how many files it
/// wrote.
///
/// Recoverable errors skip the image with a warning; any other error aborts the batch.
pub fn run_batch<F>(inputs: &[PathBuf], opts: BatchOpts, job: F) -> ThumbResult<BatchReport>
where
    F: Fn(usize, &Path) -> ThumbResult<usize> + Sync,
{
    let run_one = |(idx, path): (usize, &PathBuf)| -> ThumbResult<Option<usize>> {
        match job(idx + 1, path) {
            Ok(n) => Ok(Some(n)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(path = %path.display(), %err, "skipping image");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    };

    // Collecting into a `Result` stops at the first fatal error in both modes.
    let results: Vec<Option<usize>> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            inputs
                .par_iter()
                .enumerate()
                .map(run_one)
                .collect::<ThumbResult<Vec<_>>>()
        })?
    } else {
        inputs.iter().enumerate().map(run_one).collect::<ThumbResult<Vec<_>>>()?
    };

    let mut report = BatchReport {
        images: inputs.len(),
        ..BatchReport::default()
    };
    for r in results {
        match r {
            Some(n) => report.written += n,
            None => report.skipped += 1,
        }
    }
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> ThumbResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ThumbError::config("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ThumbError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
