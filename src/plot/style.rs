use chrono::NaiveDateTime;
use plotters::style::RGBColor;

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_FONT_PT: f64 = 12.;
pub const LABEL_FONT_PT: f64 = 10.;

pub const POINT_COLOR: RGBColor = RGBColor(0x58, 0x65, 0xF2);
pub const POINT_RADIUS_PT: f64 = 0.41;

pub const MINOR_GRID_COLOR: RGBColor = RGBColor(191, 191, 191);
pub const MINOR_GRID_PT: f64 = 1. / 3.;
pub const MAJOR_GRID_COLOR: RGBColor = RGBColor(168, 168, 168);
pub const MAJOR_GRID_PT: f64 = 2. / 3.;

pub const PNG_DPI: f64 = 300.;
/// SVG user units are treated as points.
pub const SVG_DPI: f64 = 72.;

const POINTS_PER_INCH: f64 = 72.;

/// Every figure is this tall, regardless of the amount of data.
pub const PLOT_HEIGHT_IN: f64 = 3.;
/// One inch of plot width per this many days of history.
pub const DAYS_PER_INCH: f64 = 200.;
pub const MIN_PLOT_WIDTH_IN: f64 = 1.;

pub const PADDING_IN: f64 = 0.3;
pub const CAPTION_AREA_IN: f64 = 0.35;
pub const X_LABEL_AREA_IN: f64 = 0.5;
pub const Y_LABEL_AREA_IN: f64 = 0.75;
// Year labels are centered on their tick and may stick out past the last one
pub const RIGHT_OVERHANG_IN: f64 = 0.2;

/// Converts physical sizes to backend pixels for one output format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    dpi: f64,
}

impl Resolution {
    pub const PNG: Resolution = Resolution { dpi: PNG_DPI };
    pub const SVG: Resolution = Resolution { dpi: SVG_DPI };

    pub fn inches(&self, inches: f64) -> u32 {
        (inches * self.dpi).round().max(0.) as u32
    }

    /// Converts a typographic size to pixels, keeping fractional precision for fonts.
    pub fn points(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    /// Line widths can't go below a single pixel or they disappear.
    pub fn stroke(&self, points: f64) -> u32 {
        (self.points(points).round() as u32).max(1)
    }
}

/// Physical size of the plotting area, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureGeometry {
    pub plot_width: f64,
    pub plot_height: f64,
}

impl FigureGeometry {
    pub fn for_span(min: NaiveDateTime, max: NaiveDateTime) -> Self {
        let days = (max - min).num_days().abs() as f64;
        Self {
            plot_width: (days / DAYS_PER_INCH).max(MIN_PLOT_WIDTH_IN),
            plot_height: PLOT_HEIGHT_IN,
        }
    }

    /// Size of the whole image: plot area, axis labels, title and padding on every side.
    pub fn canvas_size(&self, resolution: Resolution) -> (u32, u32) {
        let width = self.plot_width + Y_LABEL_AREA_IN + RIGHT_OVERHANG_IN + 2. * PADDING_IN;
        let height = self.plot_height + X_LABEL_AREA_IN + CAPTION_AREA_IN + 2. * PADDING_IN;
        (resolution.inches(width), resolution.inches(height))
    }
}
