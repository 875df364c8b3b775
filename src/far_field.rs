use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::f64::consts::PI;

use crate::colormap::{ColorMap, ColorScale};
use crate::field::FarFieldSample;
use crate::visualisation::{circle_points, draw_colorbar, square_ranges, PanelChart};

const MARGIN: i32 = 10;
const TITLE_STRIP: i32 = 26;
const RING_STEPS: usize = 180;

/// Radial axis limit: 5% headroom over the largest modulus so the
/// outermost curve point is not clipped against the plot boundary.
pub fn radial_limit(sample: &FarFieldSample) -> f64 {
    1.05 * sample.max_modulus()
}

/// Renders the far-field pattern as a polar curve: radius is the modulus,
/// stroke color is the local phase, with a fixed [-π, π] color-bar legend.
pub struct FarFieldRenderer {
    width: u32,
    height: u32,
}

impl FarFieldRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn render_to_file(&self, path: &str, sample: &FarFieldSample) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(&root, sample)
    }

    pub fn draw(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        sample: &FarFieldSample,
    ) -> Result<(), Box<dyn Error>> {
        // validates the sample count before anything is drawn
        let segments = sample.segments()?;

        root.fill(&WHITE)?;
        let (w, _) = root.dim_in_pixel();
        let (plot_area, bar_area) = root.split_horizontally((w as f64 * 0.85) as i32);
        let (title_area, chart_area) = plot_area.split_vertically(TITLE_STRIP);
        title_area.draw(&Text::new(
            "Modulus of the Far field",
            (12, 4),
            ("sans-serif", 18),
        ))?;

        // an all-zero pattern still gets a frame to draw in
        let limit = match radial_limit(sample) {
            l if l > 0.0 => l,
            _ => 1.0,
        };

        let (aw, ah) = chart_area.dim_in_pixel();
        let pw = aw as f64 - (2 * MARGIN) as f64;
        let ph = ah as f64 - (2 * MARGIN) as f64;
        let (x0, x1, y0, y1) = square_ranges(-limit, limit, -limit, limit, pw, ph);
        let mut chart = ChartBuilder::on(&chart_area)
            .margin(MARGIN)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        draw_polar_grid(&mut chart, limit)?;

        let map = ColorMap::cyclic();
        let scale = ColorScale::phase();
        for segment in &segments {
            let path: Vec<(f64, f64)> = segment
                .points
                .iter()
                .map(|&(theta, r)| (r * theta.cos(), r * theta.sin()))
                .collect();
            chart.draw_series(std::iter::once(PathElement::new(
                path,
                map.color_at(scale.normalize(segment.phase)).stroke_width(2),
            )))?;
        }

        // the legend always spans the whole phase wheel, whatever the data
        draw_colorbar(&bar_area, &scale, &map, &phase_ticks(), Some("Argument"))?;
        root.present()?;
        Ok(())
    }
}

/// Light rings and 45-degree spokes standing in for polar axes.
fn draw_polar_grid(chart: &mut PanelChart<'_, '_>, limit: f64) -> Result<(), Box<dyn Error>> {
    let grid_color = RGBColor(200, 200, 200);
    for fraction in [0.25, 0.5, 0.75, 1.0] {
        chart.draw_series(std::iter::once(PathElement::new(
            circle_points(limit * fraction, RING_STEPS),
            grid_color.stroke_width(1),
        )))?;
    }
    for spoke in 0..8 {
        let theta = spoke as f64 * PI / 4.0;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), (limit * theta.cos(), limit * theta.sin())],
            grid_color.stroke_width(1),
        )))?;
    }
    Ok(())
}

fn phase_ticks() -> Vec<(f64, String)> {
    [
        (-PI, "-π"),
        (-PI / 2.0, "-π / 2"),
        (0.0, "0"),
        (PI / 2.0, "π / 2"),
        (PI, "π"),
    ]
    .into_iter()
    .map(|(v, s)| (v, s.to_string()))
    .collect()
}
