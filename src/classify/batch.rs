use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, error, info, warn};
use crate::error::{Error, Result};
use crate::font::{sample_for, Rasterizer};
use crate::models::{
    BandPair, BatchMeasurements, ClassificationBands, ClassificationRecord, Config, FontSample,
    RawMeasurement, RecordSet, SkippedFont,
};
use super::extract::extract;
use super::filter::Blocklist;
use super::normalize::normalize_metric;

/// Outcome of measuring a set of fonts
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Measurements of every font that rendered cleanly
    pub measurements: BatchMeasurements,
    /// Fonts that failed to load, render or measure
    pub skipped: Vec<SkippedFont>,
    /// Ids of fonts left out by the blocklist
    pub blocked: Vec<String>,
}

/// Render and measure a single font
pub fn measure_font<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    font: &FontSample,
    point_size: f32,
) -> Result<RawMeasurement> {
    let sample = sample_for(font);
    debug!(font = %font.id, subset = sample.subset, "measuring");

    let rendered = rasterizer.render(font, sample, point_size)?;
    extract(&rendered.surface, &rendered.metrics)
}

/// Measure every font not on the blocklist.
///
/// Fonts are measured on `config.jobs` workers; a failing font is recorded in
/// the report and does not stop the others. The returned measurements are
/// complete before anything is normalized.
pub fn measure_batch<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    fonts: &[FontSample],
    config: &Config,
) -> Result<BatchReport> {
    let blocklist = Blocklist::new(config.blocklist.iter().cloned());
    let (kept, blocked) = blocklist.partition(fonts);

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .map_err(|e| Error::Config(format!("cannot start {} workers: {}", config.jobs, e)))?;

    let results: Vec<(String, Result<RawMeasurement>)> = pool.install(|| {
        kept.par_iter()
            .map(|font| (font.id.clone(), measure_font(rasterizer, font, config.point_size)))
            .collect()
    });

    let mut report = BatchReport {
        blocked: blocked.into_iter().map(|f| f.id).collect(),
        ..BatchReport::default()
    };

    for (id, result) in results {
        match result {
            Ok(measurement) => {
                debug!(
                    font = %id,
                    darkness = measurement.darkness,
                    relative_width = measurement.relative_width,
                    "measured"
                );
                report.measurements.insert(id, measurement);
            }
            Err(reason) => {
                if reason.is_per_font() {
                    warn!(font = %id, "skipping: {}", reason);
                } else {
                    error!(font = %id, "skipping after unexpected failure: {}", reason);
                }
                report.skipped.push(SkippedFont { id, reason });
            }
        }
    }

    info!(
        measured = report.measurements.len(),
        skipped = report.skipped.len(),
        blocked = report.blocked.len(),
        "batch measured"
    );
    Ok(report)
}

/// Turn a complete batch of measurements into weight and width bands
pub fn classify(batch: &BatchMeasurements) -> ClassificationBands {
    let weights = normalize_metric(batch, "darkness", RawMeasurement::darkness);
    let widths = normalize_metric(batch, "relative width", RawMeasurement::relative_width);

    batch
        .keys()
        .filter_map(|id| {
            let weight = *weights.get(id)?;
            let width = *widths.get(id)?;
            Some((id.clone(), BandPair { weight, width }))
        })
        .collect()
}

/// Write freshly computed bands into `records`.
///
/// Existing records keep their angle band and usage tag. Records of fonts
/// without fresh bands are not touched.
pub fn merge_bands(records: &mut RecordSet, bands: &ClassificationBands, fonts: &[FontSample]) {
    for font in fonts {
        let pair = match bands.get(&font.id) {
            Some(pair) => pair,
            None => continue,
        };

        let record = records
            .entry(font.id.clone())
            .or_insert_with(ClassificationRecord::default);
        record.weight = Some(pair.weight as i64);
        record.width = Some(pair.width as i64);
        record.subsets = Some(font.subset_list());
    }
}
