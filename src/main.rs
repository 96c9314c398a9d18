use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing::{error, info, warn};
use fontbands::classify::{publish, run_classification};
use fontbands::cli::{ClassifyArgs, Cli, Command, PublishArgs};
use fontbands::error::{Error, Result};
use fontbands::font::discovery::read_batch_file;
use fontbands::font::{discover_fonts, RasterEngine};
use fontbands::models::Config;
use fontbands::utils::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Classify(args) => build_config(&args, cli.debug).and_then(|config| {
            logging::init(config.debug_mode);
            classify_command(args, config)
        }),
        Command::Publish(args) => {
            logging::init(cli.debug);
            publish_command(args)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // No-op when the subscriber is already installed
            logging::init(cli.debug);
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(args: &ClassifyArgs, debug: bool) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    config.debug_mode |= debug;
    if let Some(size) = args.size {
        config.point_size = size;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    config.validate()?;
    Ok(config)
}

fn classify_command(args: ClassifyArgs, config: Config) -> Result<()> {
    let ClassifyArgs { dirs, store, batch, .. } = args;
    let mut dirs: Vec<PathBuf> = dirs;
    if let Some(batch_file) = batch {
        if !batch_file.is_file() {
            return Err(Error::InvalidPath(batch_file));
        }
        dirs.extend(read_batch_file(&batch_file)?);
    }
    if dirs.is_empty() {
        return Err(Error::Config(
            "no font directories given (pass DIRS or --batch)".to_string(),
        ));
    }

    let fonts = discover_fonts(&dirs)?;
    if fonts.is_empty() {
        return Err(Error::Config(format!("no font files found in {} directories", dirs.len())));
    }
    info!("Found {} fonts in {} directories", fonts.len(), dirs.len());

    let engine = RasterEngine::new(&config);
    let summary = run_classification(&engine, &fonts, &store, &config)?;
    drop(engine);

    for skipped in &summary.skipped {
        warn!("Not classified: {} ({})", skipped.id, skipped.reason);
    }
    println!("Font classification summary:");
    println!("  - {} fonts classified", summary.bands.len());
    println!("  - {} fonts skipped", summary.skipped.len());
    println!("  - {} fonts blocklisted", summary.blocked.len());
    println!("  - {} records in {}", summary.records_written, store.display());
    Ok(())
}

fn publish_command(args: PublishArgs) -> Result<()> {
    if !args.store.is_file() {
        return Err(Error::InvalidPath(args.store));
    }
    let count = publish(&args.store, &args.output)?;
    println!("Published {} records to {}", count, args.output.display());
    Ok(())
}
