use std::collections::BTreeMap;
use tracing::info;
use crate::models::{BatchMeasurements, RawMeasurement};

/// Lowest band a font can receive
pub const MIN_BAND: u8 = 1;
/// Highest band a font can receive
pub const MAX_BAND: u8 = 10;
/// Band given to every font when the whole batch ties on a metric
pub const MIDPOINT_BAND: u8 = 5;

/// Bands for one metric across a batch
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub bands: BTreeMap<String, u8>,
    /// Every font had the same value, so all of them got the midpoint band
    pub degenerate: bool,
}

/// Smallest and largest value of `values`, or `None` when empty
pub fn find_extremes(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Map a raw value onto bands 1-10 given the batch extremes.
///
/// The maximum itself evaluates to 11 and is clamped to 10.
pub fn band_for(value: f64, lo: f64, range: f64) -> u8 {
    let band = 1.0 + (10.0 * ((value - lo) / range)).floor();
    band.min(MAX_BAND as f64) as u8
}

/// Assign a band to every font in `batch` from the metric picked by `selector`.
///
/// Bands are relative to this batch only: the lightest font always lands in
/// band 1 and the darkest in band 10, whatever their absolute values.
pub fn normalize<F>(batch: &BatchMeasurements, selector: F) -> Normalized
where
    F: Fn(&RawMeasurement) -> f64,
{
    let (lo, hi) = match find_extremes(batch.values().map(&selector)) {
        Some(extremes) => extremes,
        None => {
            return Normalized {
                bands: BTreeMap::new(),
                degenerate: false,
            }
        }
    };

    let range = hi - lo;
    if range == 0.0 {
        return Normalized {
            bands: batch.keys().map(|id| (id.clone(), MIDPOINT_BAND)).collect(),
            degenerate: true,
        };
    }

    let bands = batch
        .iter()
        .map(|(id, m)| (id.clone(), band_for(selector(m), lo, range)))
        .collect();

    Normalized {
        bands,
        degenerate: false,
    }
}

/// Normalize one metric and log when the batch was degenerate
pub fn normalize_metric<F>(batch: &BatchMeasurements, metric: &str, selector: F) -> BTreeMap<String, u8>
where
    F: Fn(&RawMeasurement) -> f64,
{
    let normalized = normalize(batch, selector);
    if normalized.degenerate {
        info!(
            metric,
            fonts = batch.len(),
            "all fonts share the same {}; assigning band {}",
            metric,
            MIDPOINT_BAND
        );
    }
    normalized.bands
}
