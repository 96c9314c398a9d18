use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for fontbands
#[derive(Debug, Error)]
pub enum Error {
    /// IO operations errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The rasterization engine could not open or parse the font file
    #[error("Font load error: {0}")]
    FontLoad(String),
    /// Laying out or painting the sample text failed
    #[error("Render error: {0}")]
    Render(String),
    /// The rendered sample has degenerate geometry (zero area, zero x-height)
    #[error("Measurement error: {0}")]
    Measurement(String),
    /// A row of the classification store could not be parsed
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    /// Invalid file or directory path
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// CSV encoding errors raised by the store writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error only disqualifies a single font from the batch
    pub fn is_per_font(&self) -> bool {
        matches!(
            self,
            Error::FontLoad(_) | Error::Render(_) | Error::Measurement(_)
        )
    }
}

/// Result type alias for fontbands operations
pub type Result<T> = std::result::Result<T, Error>;
