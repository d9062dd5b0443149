use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::Path;

use log::{debug, info};
use plotters::chart::{ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use svg2pdf::usvg;

use super::style::{assign_styles, LineStyle, Marker};
use crate::config::ChartConfig;
use crate::data::model::{Dataset, Series};
use crate::error::{ChartError, Result};

/// Figure sizes are inches; the canvas is laid out in points.
pub const POINTS_PER_INCH: f64 = 72.0;

const FONT: &str = "sans-serif";
const CANVAS_MARGIN: u32 = 6;
const LINE_WIDTH: u32 = 1;
const MARKER_RADIUS: i32 = 4;
const LEGEND_LINE_HALF: i32 = 10;
const DOT_RADIUS: i32 = 1;

/// (dash, gap) in pixels.
const DASHED: (i32, i32) = (5, 4);
const DASH_DOT: (i32, i32) = (8, 6);

type KeyedCoord = Cartesian2d<TickedAxis, TickedAxis>;

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG; every other extension gets PDF.
    pub fn from_path(path: &Path) -> Self {
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            OutputFormat::Svg
        } else {
            OutputFormat::Pdf
        }
    }
}

// ---------------------------------------------------------------------------
// Axis layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log2,
}

impl AxisScale {
    pub fn from_flag(log: bool) -> Self {
        if log {
            AxisScale::Log2
        } else {
            AxisScale::Linear
        }
    }

    /// Map a data value onto the drawing axis. Log axes drop non-positive values.
    pub fn project(self, v: f64) -> Option<f64> {
        match self {
            AxisScale::Linear => Some(v),
            AxisScale::Log2 if v > 0.0 => Some(v.log2()),
            AxisScale::Log2 => None,
        }
    }
}

/// Tick positions on the drawing axis with the text shown at each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

impl AxisTicks {
    fn new(raw: impl IntoIterator<Item = (f64, String)>, scale: AxisScale) -> Self {
        let (positions, labels) = raw
            .into_iter()
            .filter_map(|(v, label)| scale.project(v).map(|p| (p, label)))
            .filter(|(p, _)| p.is_finite())
            .unzip();
        AxisTicks { positions, labels }
    }

    fn label_for(&self, position: f64) -> String {
        let tolerance = 1e-9 * position.abs().max(1.0);
        self.positions
            .iter()
            .position(|p| (p - position).abs() <= tolerance)
            .map(|i| self.labels[i].clone())
            .unwrap_or_else(|| format_tick(position))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub scale: AxisScale,
    pub range: Range<f64>,
    pub ticks: AxisTicks,
}

impl AxisLayout {
    fn coord(&self) -> TickedAxis {
        TickedAxis {
            range: self.range.clone(),
            ticks: self.ticks.positions.clone(),
        }
    }
}

/// Linear axis over already projected values whose grid lines and labels sit
/// exactly on `ticks`.
#[derive(Debug, Clone, PartialEq)]
pub struct TickedAxis {
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        let pixels = limit.1 - limit.0;
        if span == 0.0 || pixels == 0 {
            return limit.0 + pixels / 2;
        }
        let fraction = (value - self.range.start) / span;
        limit.0 + (f64::from(pixels) * fraction).round() as i32
    }

    /// The same fixed positions serve bold and light grid lines.
    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks
            .iter()
            .copied()
            .filter(|t| (self.range.start..=self.range.end).contains(t))
            .collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

/// X axis: one tick per category at its row index, padded by `xmargin`.
pub fn x_axis(categories: &[String], cfg: &ChartConfig) -> AxisLayout {
    let scale = AxisScale::from_flag(cfg.x_log_scale);
    let ticks = AxisTicks::new(
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f64, c.clone())),
        scale,
    );
    let last = categories.len() as f64 - 1.0;
    let range = axis_range(-cfg.x_margin, last + cfg.x_margin, scale, &ticks);
    AxisLayout {
        scale,
        range,
        ticks,
    }
}

/// Y axis: `ynumticks` evenly spaced ticks from `ylimmin` to `ylimmax`, padded
/// by `ymargin`.
pub fn y_axis(cfg: &ChartConfig) -> AxisLayout {
    let scale = AxisScale::from_flag(cfg.y_log_scale);
    let ticks = AxisTicks::new(
        linspace(cfg.y_lim_min, cfg.y_lim_max, cfg.y_num_ticks)
            .into_iter()
            .map(|v| (v, format_tick(v))),
        scale,
    );
    let range = axis_range(
        cfg.y_lim_min - cfg.y_margin,
        cfg.y_lim_max + cfg.y_margin,
        scale,
        &ticks,
    );
    AxisLayout {
        scale,
        range,
        ticks,
    }
}

/// Projected axis limits. A limit a log axis cannot show falls back to one
/// step below the first tick; an empty, inverted or unbounded range is
/// widened to 1.
fn axis_range(lo: f64, hi: f64, scale: AxisScale, ticks: &AxisTicks) -> Range<f64> {
    let lo = scale
        .project(lo)
        .filter(|lo| lo.is_finite())
        .or_else(|| ticks.positions.first().map(|p| p - 1.0))
        .unwrap_or(0.0);
    let hi = scale
        .project(hi)
        .filter(|hi| hi.is_finite() && *hi > lo)
        .unwrap_or(lo + 1.0);
    lo..hi
}

/// `n` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Tick text: at most four decimals, trailing zeros dropped.
pub fn format_tick(v: f64) -> String {
    let text = format!("{v:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Points of `series` on the drawing axes. Missing values are dropped
/// together with their x position, as are values a log axis cannot show.
pub fn project_points(series: &Series, x_scale: AxisScale, y_scale: AxisScale) -> Vec<(f64, f64)> {
    series
        .present_points()
        .into_iter()
        .filter_map(|(i, v)| Some((x_scale.project(i as f64)?, y_scale.project(v)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Canvas size in points for the configured figure size.
pub fn canvas_size(cfg: &ChartConfig) -> (u32, u32) {
    let to_points = |inches: f64| (inches * POINTS_PER_INCH).round().max(1.0) as u32;
    (to_points(cfg.fig_width), to_points(cfg.fig_height))
}

/// Draw the chart and return the SVG document.
pub fn render_svg(dataset: &Dataset, cfg: &ChartConfig) -> Result<String, Box<dyn Error>> {
    let x = x_axis(&dataset.categories, cfg);
    let y = y_axis(cfg);
    let styles = assign_styles(dataset.series.len());
    debug!("x range {:?}, y range {:?}", x.range, y.range);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, canvas_size(cfg)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(CANVAS_MARGIN)
            .x_label_area_size(x_label_area(cfg))
            .y_label_area_size(y_label_area(cfg, &y.ticks));
        if let Some(title) = &cfg.title {
            builder.caption(title, (FONT, cfg.title_size()));
        }
        let mut chart = builder.build_cartesian_2d(x.coord(), y.coord())?;

        draw_grid_and_axes(&mut chart, cfg, &x.ticks, &y.ticks)?;

        for (series, style) in dataset.series.iter().zip(&styles) {
            let points = project_points(series, x.scale, y.scale);
            debug!("{}: {} points, {:?}", series.name, points.len(), style);

            let color = RGBColor(style.color.red, style.color.green, style.color.blue);
            draw_line(&mut chart, &points, style.line, color, &series.name)?;
            draw_markers(&mut chart, &points, style.marker, color)?;
        }

        if !dataset.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerLeft)
                .label_font((FONT, cfg.legend_size))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .draw()?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// Grid at the tick positions, tick labels and the optional axis titles.
///
/// Plotters shares one description style between both axes, so the x and y
/// sides are drawn in two passes to honour `xtitlesize` and `ytitlesize`.
fn draw_grid_and_axes(
    chart: &mut ChartContext<'_, SVGBackend<'_>, KeyedCoord>,
    cfg: &ChartConfig,
    x_ticks: &AxisTicks,
    y_ticks: &AxisTicks,
) -> Result<(), Box<dyn Error>> {
    let x_fmt = |v: &f64| x_ticks.label_for(*v);
    let y_fmt = |v: &f64| y_ticks.label_for(*v);
    let blank = |_: &f64| String::new();

    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .bold_line_style(BLACK.mix(0.15))
            .x_label_style((FONT, cfg.x_font_size))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&blank)
            .axis_desc_style((FONT, cfg.x_title_size));
        if let Some(title) = &cfg.x_title {
            mesh.x_desc(title.as_str());
        }
        mesh.draw()?;
    }
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_label_formatter(&blank)
            .y_label_style((FONT, cfg.y_font_size))
            .y_label_formatter(&y_fmt)
            .axis_desc_style((FONT, cfg.y_title_size));
        if let Some(title) = &cfg.y_title {
            mesh.y_desc(title.as_str());
        }
        mesh.draw()?;
    }
    Ok(())
}

/// One series' connecting line plus its legend entry.
fn draw_line(
    chart: &mut ChartContext<'_, SVGBackend<'_>, KeyedCoord>,
    points: &[(f64, f64)],
    line: LineStyle,
    color: RGBColor,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let stroke = color.stroke_width(LINE_WIDTH);
    let at = points.iter().copied();
    let legend_span = |(lx, ly): (i32, i32)| {
        vec![(lx - LEGEND_LINE_HALF, ly), (lx + LEGEND_LINE_HALF, ly)]
    };

    match line {
        LineStyle::Solid => {
            chart
                .draw_series(LineSeries::new(at, stroke))?
                .label(name)
                .legend(move |c| PathElement::new(legend_span(c), stroke));
        }
        LineStyle::Dashed => {
            let (dash, gap) = DASHED;
            chart
                .draw_series(DashedLineSeries::new(at, dash, gap, stroke))?
                .label(name)
                .legend(move |c| DashedPathElement::new(legend_span(c), dash, gap, stroke));
        }
        LineStyle::DashDot => {
            // A dot centred in every gap between dashes.
            let (dash, gap) = DASH_DOT;
            let dot = color.filled();
            chart.draw_series(DottedLineSeries::new(
                at.clone(),
                dash + gap / 2,
                dash + gap,
                move |c| Circle::new(c, DOT_RADIUS, dot),
            ))?;
            chart
                .draw_series(DashedLineSeries::new(at, dash, gap, stroke))?
                .label(name)
                .legend(move |c| DashedPathElement::new(legend_span(c), dash, gap, stroke));
        }
    }
    Ok(())
}

fn draw_markers(
    chart: &mut ChartContext<'_, SVGBackend<'_>, KeyedCoord>,
    points: &[(f64, f64)],
    marker: Marker,
    color: RGBColor,
) -> Result<(), Box<dyn Error>> {
    let r = MARKER_RADIUS;
    let fill = color.filled();
    let stroke = color.stroke_width(LINE_WIDTH);
    let at = points.iter().copied();

    match marker {
        Marker::Circle => {
            chart.draw_series(at.map(|c| EmptyElement::at(c) + Circle::new((0, 0), r, fill)))?;
        }
        Marker::Square => {
            chart.draw_series(
                at.map(|c| EmptyElement::at(c) + Rectangle::new([(-r, -r), (r, r)], fill)),
            )?;
        }
        Marker::TriangleUp => {
            chart.draw_series(at.map(|c| {
                EmptyElement::at(c) + Polygon::new(vec![(0, -r), (r, r), (-r, r)], fill)
            }))?;
        }
        Marker::TriangleDown => {
            chart.draw_series(at.map(|c| {
                EmptyElement::at(c) + Polygon::new(vec![(0, r), (r, -r), (-r, -r)], fill)
            }))?;
        }
        Marker::Star => {
            let star = star_outline(r + 1);
            chart.draw_series(
                at.map(|c| EmptyElement::at(c) + Polygon::new(star.clone(), fill)),
            )?;
        }
        Marker::Cross => {
            chart.draw_series(at.map(|c| {
                EmptyElement::at(c)
                    + PathElement::new(vec![(-r, -r), (r, r)], stroke)
                    + PathElement::new(vec![(-r, r), (r, -r)], stroke)
            }))?;
        }
        Marker::Plus => {
            chart.draw_series(at.map(|c| {
                EmptyElement::at(c)
                    + PathElement::new(vec![(-r, 0), (r, 0)], stroke)
                    + PathElement::new(vec![(0, -r), (0, r)], stroke)
            }))?;
        }
    }
    Ok(())
}

/// Five-pointed star around the origin, point up (pixel y grows downwards).
fn star_outline(radius: i32) -> Vec<(i32, i32)> {
    let outer = f64::from(radius);
    let inner = outer * 0.4;
    (0..10)
        .map(|k| {
            let angle = std::f64::consts::PI * f64::from(k) / 5.0;
            let len = if k % 2 == 0 { outer } else { inner };
            (
                (len * angle.sin()).round() as i32,
                (-len * angle.cos()).round() as i32,
            )
        })
        .collect()
}

fn x_label_area(cfg: &ChartConfig) -> u32 {
    let mut size = cfg.x_font_size * 1.8;
    if cfg.x_title.is_some() {
        size += cfg.x_title_size * 1.6;
    }
    size.ceil().max(0.0) as u32
}

fn y_label_area(cfg: &ChartConfig, ticks: &AxisTicks) -> u32 {
    let widest = ticks.labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);
    let mut size = cfg.y_font_size * (0.6 * widest as f64 + 1.0);
    if cfg.y_title.is_some() {
        size += cfg.y_title_size * 1.6;
    }
    size.ceil().max(0.0) as u32
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Convert an SVG document into a single-page PDF of the same size.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ChartError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| ChartError::Pdf(format!("{e:?}")))
}

/// Render the chart and write it to `path` in the requested format.
pub fn write_chart(
    dataset: &Dataset,
    cfg: &ChartConfig,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let svg = render_svg(dataset, cfg).map_err(|e| ChartError::Render(e.to_string()))?;
    let bytes = match format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Pdf => svg_to_pdf(&svg)?,
    };
    fs::write(path, &bytes)?;
    info!("wrote {:?} chart ({} bytes) to {}", format, bytes.len(), path.display());
    Ok(())
}
