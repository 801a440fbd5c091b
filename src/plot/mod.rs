pub mod axis;
pub mod style;

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use plotters::{coord::Shift, prelude::*};
use tracing::{debug, instrument};

use crate::timeline::buckets::Buckets;

use axis::{DateAxis, TimeOfDayAxis};
use style::{
    FigureGeometry, Resolution, CAPTION_AREA_IN, FONT_FAMILY, LABEL_FONT_PT, MAJOR_GRID_COLOR,
    MAJOR_GRID_PT, MINOR_GRID_COLOR, MINOR_GRID_PT, PADDING_IN, POINT_COLOR, POINT_RADIUS_PT,
    RIGHT_OVERHANG_IN, TITLE_FONT_PT, X_LABEL_AREA_IN, Y_LABEL_AREA_IN,
};

pub const PNG_FILE_NAME: &str = "out.png";
pub const SVG_FILE_NAME: &str = "out.svg";

/// Everything needed to draw the date / time of day scatter plot.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    user_name: String,
    zone_label: String,
    buckets: Buckets,
    span: (NaiveDateTime, NaiveDateTime),
}

impl ScatterPlot {
    /// Returns [None] if there is nothing to plot.
    pub fn new(
        user_name: impl Into<String>,
        zone_label: impl Into<String>,
        buckets: Buckets,
    ) -> Option<Self> {
        let span = buckets.date_span()?;
        Some(Self {
            user_name: user_name.into(),
            zone_label: zone_label.into(),
            buckets,
            span,
        })
    }

    pub fn title(&self) -> String {
        format!(
            "When does {} post on Discord? ({})",
            self.user_name, self.zone_label
        )
    }

    pub fn geometry(&self) -> FigureGeometry {
        FigureGeometry::for_span(self.span.0, self.span.1)
    }

    pub fn point_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn date_axis(&self) -> DateAxis {
        DateAxis::new(self.span.0, self.span.1)
    }
}

#[instrument(skip(plot), fields(points = plot.point_count()))]
pub fn write_png(plot: &ScatterPlot, path: &Path) -> Result<()> {
    let resolution = Resolution::PNG;
    let size = plot.geometry().canvas_size(resolution);
    debug!("Rendering {size:?} bitmap");
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(plot, &root, resolution)
}

#[instrument(skip(plot), fields(points = plot.point_count()))]
pub fn write_svg(plot: &ScatterPlot, path: &Path) -> Result<()> {
    let resolution = Resolution::SVG;
    let size = plot.geometry().canvas_size(resolution);
    debug!("Rendering {size:?} vector image");
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(plot, &root, resolution)
}

fn draw<DB>(
    plot: &ScatterPlot,
    root: &DrawingArea<DB, Shift>,
    resolution: Resolution,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let padding = resolution.inches(PADDING_IN);
    let overhang = resolution.inches(RIGHT_OVERHANG_IN);
    let area = root.margin(padding, padding, padding, padding + overhang);

    let title_font = (FONT_FAMILY, resolution.points(TITLE_FONT_PT)).into_font();
    let label_font = (FONT_FAMILY, resolution.points(LABEL_FONT_PT)).into_font();

    let mut chart = ChartBuilder::on(&area)
        .caption(plot.title(), title_font)
        .margin_top(resolution.inches(CAPTION_AREA_IN) / 4)
        .x_label_area_size(resolution.inches(X_LABEL_AREA_IN))
        .y_label_area_size(resolution.inches(Y_LABEL_AREA_IN))
        .build_cartesian_2d(plot.date_axis(), TimeOfDayAxis::default())?;

    // The mesh goes first so that it stays beneath the points
    chart
        .configure_mesh()
        .light_line_style(MINOR_GRID_COLOR.stroke_width(resolution.stroke(MINOR_GRID_PT)))
        .bold_line_style(MAJOR_GRID_COLOR.stroke_width(resolution.stroke(MAJOR_GRID_PT)))
        .axis_style(BLACK.stroke_width(resolution.stroke(MAJOR_GRID_PT)))
        .x_label_formatter(&|date| date.format("%Y").to_string())
        .y_label_formatter(&|time| time.format("%H:%M").to_string())
        .label_style(label_font.clone())
        .axis_desc_style(label_font)
        .x_desc("Date")
        .y_desc("Time of Day")
        .draw()?;

    let radius = resolution.points(POINT_RADIUS_PT).max(1.).round() as i32;
    chart.draw_series(
        plot.buckets
            .points()
            .map(|point| Circle::new(point, radius, POINT_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use crate::timeline::buckets::Buckets;

    use super::ScatterPlot;

    #[test]
    fn empty_buckets_make_no_plot() {
        assert!(ScatterPlot::new("someone", "UTC+0", Buckets::default()).is_none());
    }

    #[test]
    fn title_contains_name_and_zone() {
        let offset = FixedOffset::west_opt(330 * 60).unwrap();
        let timestamp = offset.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let plot = ScatterPlot::new(
            "Someone",
            "UTC-5:30",
            Buckets::from_timestamps([&timestamp, &timestamp]),
        )
        .unwrap();

        assert_eq!(plot.title(), "When does Someone post on Discord? (UTC-5:30)");
        assert_eq!(plot.point_count(), 2);
    }
}
