//! Score distribution: unit-width bins and PNG rendering.

use std::io::Cursor;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::numeric::{format_number, NumericSeries};
use super::resolver::{resolve_total_column, ColumnIssue, ColumnRef};
use crate::error::{Result, ScorecardError};
use crate::input::DataTable;

/// Height in pixels reserved under the chart for the source caption.
const CAPTION_AREA: u32 = 24;

/// Widest score range that is still drawn, counted in unit bins.
pub const MAX_BINS: usize = 1_000;

/// Family name all chart text is drawn with.
const FONT_FAMILY: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Why a set of values could not be binned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BinningError {
    #[error("no values to bin")]
    Empty,

    #[error("Score range too wide to plot: {min} to {max} needs more than {} bins.", MAX_BINS)]
    TooWide { min: f64, max: f64 },
}

/// Bin layout and counts for a set of scores.
///
/// Bins are one unit wide and centered on integers; the axis extends one
/// unit past the data on both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub min: f64,
    pub max: f64,
    /// Bin boundaries, `floor(min) - 0.5` to `ceil(max) + 0.5` in steps of 1.
    pub edges: Vec<f64>,
    /// Values per bin; `counts.len() == edges.len() - 1`.
    pub counts: Vec<usize>,
    /// Visible x range, `(min - 1, max + 1)`.
    pub axis: (f64, f64),
    /// Every integer inside the axis range.
    pub ticks: Vec<f64>,
}

impl HistogramSpec {
    /// Lay out bins for `values`.
    ///
    /// Fails on empty input and when the range needs more than [`MAX_BINS`]
    /// unit bins.
    pub fn from_values(values: &[f64]) -> std::result::Result<Self, BinningError> {
        if values.is_empty() {
            return Err(BinningError::Empty);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let span = max.ceil() - min.floor();
        if !(span.is_finite() && span < MAX_BINS as f64) {
            return Err(BinningError::TooWide { min, max });
        }

        let first_edge = min.floor() - 0.5;
        let bin_count = span as usize + 1;
        let edges: Vec<f64> = (0..=bin_count).map(|i| first_edge + i as f64).collect();

        // Half-open bins, except the last one which also takes its upper edge
        let mut counts = vec![0usize; bin_count];
        for &v in values {
            let bin = ((v - first_edge).floor() as usize).min(bin_count - 1);
            counts[bin] += 1;
        }

        let axis = (min - 1.0, max + 1.0);
        let first_tick = axis.0.ceil() as i64;
        let last_tick = axis.1.floor() as i64;
        let ticks = (first_tick..=last_tick).map(|t| t as f64).collect();

        Ok(Self {
            min,
            max,
            edges,
            counts,
            axis,
            ticks,
        })
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Tallest bar.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lower edge, upper edge, count)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &count)| (w[0], w[1], count))
    }

    /// Chart title annotated with the axis range.
    pub fn title(&self) -> String {
        format!(
            "Grade Distribution from 'Total' Columns (range: {}–{})",
            format_number(self.axis.0),
            format_number(self.axis.1)
        )
    }
}

/// Raster size and colours for the rendered chart.
#[derive(Debug, Clone)]
pub struct HistogramStyle {
    pub width: u32,
    pub height: u32,
    pub bar_color: RGBColor,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            bar_color: RGBColor(0x4C, 0x78, 0xA8),
        }
    }
}

/// A rendered histogram ready for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramImage {
    /// Column the chart was drawn from.
    pub column: ColumnRef,
    /// Bin layout behind the picture.
    pub spec: HistogramSpec,
    /// PNG bytes (base64 text when serialized).
    #[serde(serialize_with = "serialize_base64")]
    pub png: Vec<u8>,
}

impl HistogramImage {
    /// PNG bytes as standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }

    /// `data:` URI usable as an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.to_base64())
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Why no histogram was produced.
#[derive(Debug, Error)]
pub enum HistogramFailure {
    #[error("{0}")]
    Column(#[from] ColumnIssue),

    #[error("{0}")]
    Binning(BinningError),

    #[error("Could not render the histogram: {0}")]
    Render(String),
}

/// Resolve the total column, bin its values, and render the chart.
pub fn generate_total_histogram(
    table: &DataTable,
    style: &HistogramStyle,
) -> std::result::Result<HistogramImage, HistogramFailure> {
    let column = resolve_total_column(table)?;
    let series = NumericSeries::from_column(table, &column);

    let spec = HistogramSpec::from_values(&series.values).map_err(|e| match e {
        BinningError::Empty => HistogramFailure::Column(ColumnIssue::NoNumericData {
            column: column.name.clone(),
        }),
        too_wide => HistogramFailure::Binning(too_wide),
    })?;

    log::debug!(
        "histogram for '{}': {} bins over {:?}",
        column.name,
        spec.bin_count(),
        spec.axis
    );

    let png = render_png(&spec, &column.name, style).map_err(|e| match e {
        ScorecardError::Render(msg) => HistogramFailure::Render(msg),
        other => HistogramFailure::Render(other.to_string()),
    })?;

    Ok(HistogramImage { column, spec, png })
}

fn render_err<E: std::fmt::Display>(e: E) -> ScorecardError {
    ScorecardError::Render(e.to_string())
}

/// Register the bundled font under [`FONT_FAMILY`] once per process.
fn ensure_font() -> Result<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());

    if registered {
        Ok(())
    } else {
        Err(ScorecardError::Render(
            "bundled chart font could not be loaded".to_string(),
        ))
    }
}

/// Draw `spec` as a bar chart and encode it as PNG.
pub fn render_png(spec: &HistogramSpec, column: &str, style: &HistogramStyle) -> Result<Vec<u8>> {
    let (width, height) = (style.width, style.height);
    if width == 0 || height <= CAPTION_AREA {
        return Err(ScorecardError::Render(format!(
            "image size {}x{} is too small",
            width, height
        )));
    }
    ensure_font()?;

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (plot_area, caption_area) = root.split_vertically((height - CAPTION_AREA) as i32);

        let y_top = (spec.max_count().max(1) as f64 * 1.1).ceil();
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(spec.title(), (FONT_FAMILY, 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(50)
            .build_cartesian_2d(spec.axis.0..spec.axis.1, 0f64..y_top)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.25))
            .light_line_style(TRANSPARENT)
            .x_labels(spec.ticks.len() + 1)
            .x_label_formatter(&|x| format_number(*x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .x_desc("Grade")
            .y_desc("Frequency")
            .draw()
            .map_err(render_err)?;

        let bars: Vec<(f64, f64, usize)> = spec.bins().filter(|(_, _, n)| *n > 0).collect();

        chart
            .draw_series(bars.iter().map(|&(lo, hi, n)| {
                Rectangle::new([(lo, 0.0), (hi, n as f64)], style.bar_color.filled())
            }))
            .map_err(render_err)?;

        chart
            .draw_series(bars.iter().map(|&(lo, hi, n)| {
                Rectangle::new([(lo, 0.0), (hi, n as f64)], BLACK.stroke_width(1))
            }))
            .map_err(render_err)?;

        let caption_style = (FONT_FAMILY, 12)
            .into_font()
            .color(&RGBColor(0x55, 0x55, 0x55))
            .pos(Pos::new(HPos::Right, VPos::Center));
        caption_area
            .draw(&Text::new(
                format!("Column used: {}", column),
                (width as i32 - 12, (CAPTION_AREA / 2) as i32),
                caption_style,
            ))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ScorecardError::Render("pixel buffer has the wrong size".to_string()))?;

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(render_err)?;

    Ok(png.into_inner())
}
