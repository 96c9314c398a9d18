//! Measurement of fonts and their banding into weight/width classes

pub mod batch;
pub mod extract;
pub mod filter;
pub mod normalize;
pub mod pipeline;

pub use batch::{classify, measure_batch, measure_font, merge_bands, BatchReport};
pub use extract::extract;
pub use filter::Blocklist;
pub use normalize::{band_for, normalize, Normalized, MAX_BAND, MIDPOINT_BAND, MIN_BAND};
pub use pipeline::{publish, run_classification, RunSummary};
