use std::collections::BTreeMap;
use std::path::PathBuf;
use crate::error::Error;

/// A font file selected for measurement
#[derive(Debug, Clone, PartialEq)]
pub struct FontSample {
    /// File name of the font, used as the record key (`GFN`)
    pub id: String,
    /// Location of the font file on disk
    pub path: PathBuf,
    /// Script subsets the font declares, e.g. `latin` or `khmer`
    pub subsets: Vec<String>,
}

impl FontSample {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, subsets: Vec<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            subsets,
        }
    }

    /// Check whether the font declares the given subset
    pub fn has_subset(&self, subset: &str) -> bool {
        self.subsets.iter().any(|s| s == subset)
    }

    /// Subsets in the comma-separated form used by the store
    pub fn subset_list(&self) -> String {
        self.subsets.join(",")
    }
}

/// Darkness and relative width of one rendered font sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    /// Fraction of the surface covered by ink, in `[0, 1]`
    pub darkness: f64,
    /// Rendered text width divided by the x-height
    pub relative_width: f64,
}

impl RawMeasurement {
    pub fn new(darkness: f64, relative_width: f64) -> Self {
        Self {
            darkness,
            relative_width,
        }
    }

    pub fn darkness(&self) -> f64 {
        self.darkness
    }

    pub fn relative_width(&self) -> f64 {
        self.relative_width
    }
}

/// Raw measurements for every font of one classification run, keyed by font id
pub type BatchMeasurements = BTreeMap<String, RawMeasurement>;

/// Weight and width bands assigned to one font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPair {
    pub weight: u8,
    pub width: u8,
}

/// Bands for every font of one classification run, keyed by font id
pub type ClassificationBands = BTreeMap<String, BandPair>;

/// A font that dropped out of the batch, with the reason
#[derive(Debug)]
pub struct SkippedFont {
    pub id: String,
    pub reason: Error,
}
