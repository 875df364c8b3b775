use ndarray::Array2;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::error::Error;
use std::f64::consts::PI;

use crate::colormap::{ColorMap, ColorScale};
use crate::field::{FieldKind, FieldSample};
use crate::geometry::{BoundaryGeometry, InnerBoundary};

pub(crate) type PanelChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const PANEL_MARGIN: i32 = 5;
const X_LABEL_AREA: i32 = 22;
const Y_LABEL_AREA: i32 = 42;
const TITLE_STRIP: i32 = 20;
const CIRCLE_STEPS: usize = 180;
const DASH_ON: usize = 6;
const DASH_OFF: usize = 4;

/// The four views of a complex field. Each panel owns its data transform,
/// color domain, and color map, so the mapping is an explicit table rather
/// than a set of ambient defaults buried in draw calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Real,
    Imaginary,
    Modulus,
    Argument,
}

impl Panel {
    pub const ALL: [Panel; 4] = [
        Panel::Real,
        Panel::Imaginary,
        Panel::Modulus,
        Panel::Argument,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Real => "Real part",
            Panel::Imaginary => "Imaginary part",
            Panel::Modulus => "Modulus",
            Panel::Argument => "Argument",
        }
    }

    pub fn extract(&self, field: &FieldSample) -> Array2<f64> {
        match self {
            Panel::Real => field.real(),
            Panel::Imaginary => field.imag(),
            Panel::Modulus => field.modulus(),
            Panel::Argument => field.argument(),
        }
    }

    /// Real and imaginary parts get domains symmetric about zero, each
    /// derived from its own component so differing magnitudes keep their
    /// own resolution. The argument domain is always the full phase wheel.
    pub fn scale(&self, data: &Array2<f64>) -> ColorScale {
        match self {
            Panel::Real | Panel::Imaginary => ColorScale::symmetric(data),
            Panel::Modulus => ColorScale::positive(data),
            Panel::Argument => ColorScale::phase(),
        }
    }

    pub fn colormap(&self) -> ColorMap {
        match self {
            Panel::Real | Panel::Imaginary => ColorMap::diverging(),
            Panel::Modulus => ColorMap::sequential(),
            Panel::Argument => ColorMap::cyclic(),
        }
    }
}

/// Renders the 2x2 near-field figure: real, imaginary, modulus and
/// argument panels, each with its own color bar and the same boundary
/// overlay, under a single title line.
pub struct NearFieldRenderer {
    width: u32,
    height: u32,
}

impl NearFieldRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render to a PNG file.
    pub fn render_to_file(
        &self,
        path: &str,
        field: &FieldSample,
        geometry: &BoundaryGeometry,
        kind: FieldKind,
        wavenumber: f64,
    ) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(&root, field, geometry, kind, wavenumber)
    }

    /// Render onto an existing drawing area; tests point this at an
    /// in-memory buffer.
    pub fn draw(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        field: &FieldSample,
        geometry: &BoundaryGeometry,
        kind: FieldKind,
        wavenumber: f64,
    ) -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;
        let title = format!("{kind} with k = {wavenumber}");
        let titled = root.clone().titled(&title, ("sans-serif", 24))?;
        let panels = titled.split_evenly((2, 2));
        for (panel, area) in Panel::ALL.iter().zip(panels.iter()) {
            draw_panel(area, *panel, field, geometry)?;
        }
        root.present()?;
        Ok(())
    }
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: Panel,
    field: &FieldSample,
    geometry: &BoundaryGeometry,
) -> Result<(), Box<dyn Error>> {
    let data = panel.extract(field);
    let scale = panel.scale(&data);
    let map = panel.colormap();

    let (w, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally((w as f64 * 0.84) as i32);
    let (title_area, chart_area) = plot_area.split_vertically(TITLE_STRIP);
    title_area.draw(&Text::new(panel.title(), (10, 3), ("sans-serif", 15)))?;

    let (aw, ah) = chart_area.dim_in_pixel();
    let pw = aw as f64 - (Y_LABEL_AREA + 2 * PANEL_MARGIN) as f64;
    let ph = ah as f64 - (X_LABEL_AREA + 2 * PANEL_MARGIN) as f64;
    let (x0, x1) = bounds(field.x());
    let (y0, y1) = bounds(field.y());
    let (x0, x1, y0, y1) = square_ranges(x0, x1, y0, y1, pw, ph);

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(PANEL_MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(5)
        .y_labels(5)
        .label_style(("sans-serif", 11))
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()?;

    draw_mesh(&mut chart, field, &data, &scale, &map)?;
    draw_boundaries(&mut chart, geometry)?;
    draw_colorbar(&bar_area, &scale, &map, &numeric_ticks(&scale), None)?;
    Ok(())
}

/// One filled rectangle per grid cell, colored by the cell's lower-corner
/// sample. Drawn before the overlays so boundary outlines stay visible.
fn draw_mesh(
    chart: &mut PanelChart<'_, '_>,
    field: &FieldSample,
    data: &Array2<f64>,
    scale: &ColorScale,
    map: &ColorMap,
) -> Result<(), Box<dyn Error>> {
    let (rows, cols) = data.dim();
    let x = field.x();
    let y = field.y();
    let mut cells = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let t = scale.normalize(data[[i, j]]);
            cells.push(Rectangle::new(
                [(x[[i, j]], y[[i, j]]), (x[[i + 1, j + 1]], y[[i + 1, j + 1]])],
                map.color_at(t).filled(),
            ));
        }
    }
    chart.draw_series(cells)?;
    Ok(())
}

/// Boundary overlay, identical on every panel: the innermost circle is a
/// filled disk when impenetrable and a dashed outline when penetrable;
/// everything beyond it is always a dashed outline.
fn draw_boundaries(
    chart: &mut PanelChart<'_, '_>,
    geometry: &BoundaryGeometry,
) -> Result<(), Box<dyn Error>> {
    match geometry.inner() {
        InnerBoundary::Impenetrable => {
            let rim = circle_points(geometry.innermost(), CIRCLE_STEPS);
            chart.draw_series(std::iter::once(Polygon::new(
                rim.clone(),
                RGBColor(191, 191, 191).filled(),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                rim,
                BLACK.stroke_width(2),
            )))?;
        }
        InnerBoundary::Penetrable => {
            chart.draw_series(dashed_circle(geometry.innermost()))?;
        }
    }
    for &radius in geometry.outer() {
        chart.draw_series(dashed_circle(radius))?;
    }
    Ok(())
}

pub(crate) fn circle_points(radius: f64, steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|s| {
            let theta = 2.0 * PI * s as f64 / steps as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

fn dashed_circle(radius: f64) -> Vec<PathElement<(f64, f64)>> {
    let points = circle_points(radius, CIRCLE_STEPS);
    let mut dashes = Vec::new();
    let mut start = 0;
    while start < points.len() {
        let end = (start + DASH_ON).min(points.len());
        dashes.push(PathElement::new(
            points[start..end].to_vec(),
            BLACK.stroke_width(2),
        ));
        start += DASH_ON + DASH_OFF;
    }
    dashes
}

/// Expand the data ranges so both axes share one data-unit-per-pixel
/// ratio; physical circles then render as true circles.
pub(crate) fn square_ranges(
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    pw: f64,
    ph: f64,
) -> (f64, f64, f64, f64) {
    if pw <= 0.0 || ph <= 0.0 {
        return (x0, x1, y0, y1);
    }
    let unit = ((x1 - x0) / pw).max((y1 - y0) / ph);
    let cx = 0.5 * (x0 + x1);
    let cy = 0.5 * (y0 + y1);
    (
        cx - 0.5 * unit * pw,
        cx + 0.5 * unit * pw,
        cy - 0.5 * unit * ph,
        cy + 0.5 * unit * ph,
    )
}

fn bounds(data: &Array2<f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in data.iter() {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn numeric_ticks(scale: &ColorScale) -> Vec<(f64, String)> {
    [scale.vmin, scale.midpoint(), scale.vmax]
        .into_iter()
        .map(|v| (v, format_tick(v)))
        .collect()
}

fn format_tick(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 100.0 || v.abs() < 0.01 {
        format!("{v:.1e}")
    } else {
        format!("{v:.2}")
    }
}

/// Vertical color-bar legend: a gradient strip with tick marks, the top of
/// the strip at the domain maximum. Shared by all panels and the far-field
/// figure.
pub(crate) fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, Shift>,
    scale: &ColorScale,
    map: &ColorMap,
    ticks: &[(f64, String)],
    label: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let (w, h) = area.dim_in_pixel();
    let top = 18i32;
    let bottom = 18i32;
    let left = 6i32;
    let bar_w = 14i32.min(w as i32 / 3);
    let bar_h = h as i32 - top - bottom;
    if bar_h <= 0 || bar_w <= 0 {
        return Ok(());
    }
    for step in 0..bar_h {
        let t = 1.0 - step as f64 / bar_h as f64;
        area.draw(&Rectangle::new(
            [(left, top + step), (left + bar_w, top + step + 1)],
            map.color_at(t).filled(),
        ))?;
    }
    area.draw(&Rectangle::new(
        [(left, top), (left + bar_w, top + bar_h)],
        BLACK.stroke_width(1),
    ))?;
    for (value, text) in ticks {
        let t = scale.normalize(*value);
        let y = top + ((1.0 - t) * bar_h as f64).round() as i32;
        area.draw(&PathElement::new(
            vec![(left + bar_w, y), (left + bar_w + 4, y)],
            BLACK.stroke_width(1),
        ))?;
        area.draw(&Text::new(
            text.clone(),
            (left + bar_w + 6, y - 6),
            ("sans-serif", 12),
        ))?;
    }
    if let Some(label) = label {
        let style = ("sans-serif", 13)
            .into_font()
            .transform(FontTransform::Rotate270);
        area.draw(&Text::new(
            label.to_string(),
            (w as i32 - 4, h as i32 / 2 + 24),
            style,
        ))?;
    }
    Ok(())
}
