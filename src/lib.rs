//! Font weight and width classification.
//!
//! Each font renders a sample string; the ink density and the x-height
//! relative width of the result are banded 1-10 across the whole batch and
//! stored in a CSV catalog.

pub mod classify;
pub mod cli;
pub mod error;
pub mod font;
pub mod models;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
