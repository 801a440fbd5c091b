use std::{
    future,
    path::{Path, PathBuf},
};

use anyhow::Result;
use futures::TryStreamExt;
use tracing::{debug, info, instrument};

use crate::{
    archive::{entities::Profile, reader::read_messages, Archive, ArchiveError},
    plot::{write_png, write_svg, ScatterPlot, PNG_FILE_NAME, SVG_FILE_NAME},
    timeline::{buckets::Buckets, normalize, parse_timestamp},
};

/// Files produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOutput {
    pub png: PathBuf,
    pub svg: PathBuf,
    pub message_count: usize,
}

/// Reads the archive and prepares the plot without touching the output files.
#[instrument]
pub async fn load_plot(input: &Path) -> Result<(Archive, ScatterPlot)> {
    let archive = Archive::open(input)?;

    let Profile {
        display_name,
        timezone,
    } = archive.load_profile().await?;
    println!("discord user: {display_name}");

    let offset = timezone.offset()?;
    let zone_label = timezone.label();
    debug!("Using offset {offset} ({zone_label})");

    println!("finding messages…");
    let files = archive.message_files()?;

    println!("parsing messages…");
    let message_dates = read_messages(files)
        .and_then(|message| {
            future::ready(
                parse_timestamp(&message.timestamp)
                    .map(|timestamp| normalize(timestamp, offset))
                    .map_err(anyhow::Error::from),
            )
        })
        .try_collect::<Vec<_>>()
        .await?;
    println!("total messages: {}", message_dates.len());

    println!("processing dates…");
    let mut buckets = Buckets::with_capacity(message_dates.len());
    for date in &message_dates {
        buckets.push(date);
    }

    let plot = ScatterPlot::new(&*display_name, zone_label, buckets)
        .ok_or_else(|| ArchiveError::NoMessages(archive.root().to_path_buf()))?;
    Ok((archive, plot))
}

/// Full run: loads the archive and overwrites both images in its root.
pub async fn plot_archive(input: &Path) -> Result<PlotOutput> {
    let (archive, plot) = load_plot(input).await?;

    println!("creating graph…");
    let png = archive.root().join(PNG_FILE_NAME);
    let svg = archive.root().join(SVG_FILE_NAME);

    println!("rendering png…");
    write_png(&plot, &png)?;
    println!("rendering svg…");
    write_svg(&plot, &svg)?;

    println!("done!");
    info!("Plotted {} messages into {png:?} and {svg:?}", plot.point_count());
    Ok(PlotOutput {
        png,
        svg,
        message_count: plot.point_count(),
    })
}
