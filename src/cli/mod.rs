pub mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pipeline::plot_archive;
use tracing::{debug, error, info};

use crate::{archive::ArchiveError, utils::logging::enable_logging};

#[derive(Parser, Debug)]
#[command(name = "discord-timeplot", version, long_about = None)]
#[command(about = "Plots the date and time of all of your discord messages on a graph", long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = ".",
        help = "The path to the unpacked discord data archive"
    )]
    input: PathBuf,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    enable_logging()?;

    let output = plot_archive(&args.input).await?;
    info!(?output, "Finished");
    Ok(())
}

/// A directory that isn't an archive is a usage mistake, so it only gets the one-line message
/// on stdout. Everything else is logged and printed with its full context chain.
pub fn report_error(error: &anyhow::Error) {
    match invalid_archive(error) {
        Some(invalid) => {
            debug!("Error running cli {error:?}");
            println!("{invalid}");
        }
        None => {
            error!("Error running cli {error:?}");
            eprintln!("Error: {error:#}");
        }
    }
}

fn invalid_archive(error: &anyhow::Error) -> Option<&ArchiveError> {
    error
        .downcast_ref::<ArchiveError>()
        .filter(|error| matches!(error, ArchiveError::InvalidArchive(_)))
}
