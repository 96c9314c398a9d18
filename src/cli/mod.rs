//! Command-line interface

mod args;

pub use args::{ClassifyArgs, Cli, Command, PublishArgs};
