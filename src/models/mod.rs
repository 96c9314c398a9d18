//! Data types shared across the measurement pipeline

pub mod config;
pub mod font;
pub mod record;

pub use config::Config;
pub use font::{
    BandPair, BatchMeasurements, ClassificationBands, FontSample, RawMeasurement, SkippedFont,
};
pub use record::{ClassificationRecord, RecordSet};
