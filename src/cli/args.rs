use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

/// Font weight and width classifier
#[derive(Parser, Debug)]
#[command(
    name = "fontbands",
    version,
    about = "Measure font darkness and width and assign 1-10 classification bands"
)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Measure fonts and merge their bands into the store
    Classify(ClassifyArgs),
    /// Write a publish-ready copy of the store
    Publish(PublishArgs),
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Directories containing font files
    pub dirs: Vec<PathBuf>,

    /// Classification store (CSV); created if missing
    #[arg(short, long)]
    pub store: PathBuf,

    /// File listing font directories, one per line
    #[arg(short, long)]
    pub batch: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Point size of the rendered sample
    #[arg(long)]
    pub size: Option<f32>,

    /// Number of measurement workers
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Classification store to read
    #[arg(short, long)]
    pub store: PathBuf,

    /// Where to write the cleaned-up copy
    #[arg(short, long)]
    pub output: PathBuf,
}
