use std::path::Path;
use tracing::info;
use crate::error::Result;
use crate::font::Rasterizer;
use crate::models::{ClassificationBands, Config, FontSample, SkippedFont};
use crate::store::{self, WriteMode};
use super::batch::{classify, measure_batch, merge_bands};

/// What a classification run did
#[derive(Debug)]
pub struct RunSummary {
    pub bands: ClassificationBands,
    pub skipped: Vec<SkippedFont>,
    pub blocked: Vec<String>,
    pub records_written: usize,
}

/// Measure `fonts`, band them and merge the result into the store at `store_path`.
///
/// The store is read before anything is rendered so a malformed store aborts
/// the run without wasted work.
pub fn run_classification<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    fonts: &[FontSample],
    store_path: &Path,
    config: &Config,
) -> Result<RunSummary> {
    let mut records = store::load_or_default(store_path)?;

    let report = measure_batch(rasterizer, fonts, config)?;
    let bands = classify(&report.measurements);
    merge_bands(&mut records, &bands, fonts);

    store::save(store_path, &records, WriteMode::Full)?;

    info!(
        classified = bands.len(),
        skipped = report.skipped.len(),
        blocked = report.blocked.len(),
        "classification finished"
    );

    Ok(RunSummary {
        bands,
        skipped: report.skipped,
        blocked: report.blocked,
        records_written: records.len(),
    })
}

/// Rewrite the store at `store_path` as a publish-ready file at `output`
pub fn publish(store_path: &Path, output: &Path) -> Result<usize> {
    let records = store::load(store_path)?;
    store::save(output, &records, WriteMode::Publish)?;
    Ok(records.len())
}
