//! Font discovery, sample selection and rasterization

pub mod discovery;
pub mod raster;
pub mod sample;
pub mod subsets;

pub use discovery::{discover_fonts, find_font_files, is_font_file};
pub use raster::{CoverageSurface, LayoutMetrics, RasterEngine, Rasterizer, RenderedSample};
pub use sample::{sample_for, SampleText, KHMER_SAMPLE, LATIN_SAMPLE};
pub use subsets::detect_subsets;
