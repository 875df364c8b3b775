use anyhow::{anyhow, bail, Context, Result};
use log::info;
use ndarray::Array1;
use std::f64::consts::PI;

use helmholtz_field_plotter::{
    BoundaryGeometry, CoordinateFrame, FarFieldRenderer, FarFieldSample, FieldKind, FieldSample,
    FieldSolver, Grid, NearFieldRenderer, PlotConfig, PointSource,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!(
            "usage: helmholtz-field-plotter <delta> <permittivity> <permeability> <wavenumber> [scattered]"
        );
    }
    let delta: f64 = args[0].parse().context("delta must be a number")?;
    let permittivity: f64 = args[1].parse().context("permittivity must be a number")?;
    let permeability: f64 = args[2].parse().context("permeability must be a number")?;
    let wavenumber: f64 = args[3].parse().context("wavenumber must be a number")?;
    // any trailing argument selects the scattered field on its own
    let kind = if args.len() > 4 {
        FieldKind::Scattered
    } else {
        FieldKind::Total
    };

    if delta <= 0.0 || delta >= 1.0 {
        bail!("delta must lie strictly between 0 and 1, got {delta}");
    }
    if permittivity <= 0.0 || permeability <= 0.0 {
        bail!(
            "material contrasts must be positive (permittivity={permittivity}, permeability={permeability})"
        );
    }
    if wavenumber <= 0.0 {
        bail!("wavenumber must be positive, got {wavenumber}");
    }

    let config = PlotConfig::load_or_default("plotter.toml")?;

    let grid = Grid::centered(config.grid.half_extent, config.grid.points);
    // blank everything outside the circumscribed disk of the view window
    let truncation = Some(config.grid.half_extent * std::f64::consts::SQRT_2);
    let solver = PointSource::new(wavenumber, delta, permittivity, permeability);

    info!(
        "sampling {kind} on a {n}x{n} grid over [-{e}, {e}]^2",
        n = config.grid.points,
        e = config.grid.half_extent
    );
    let values = match kind {
        FieldKind::Scattered => {
            solver.scattered_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, truncation)
        }
        FieldKind::Total => {
            solver.total_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, truncation)
        }
    };
    let field = FieldSample::on_grid(grid, values)?;
    let geometry = BoundaryGeometry::from_code(vec![delta, 1.0], "Penetrable")?;

    NearFieldRenderer::new(config.near_field.width, config.near_field.height)
        .render_to_file(&config.near_field.output, &field, &geometry, kind, wavenumber)
        .map_err(|e| anyhow!("near-field render failed: {e}"))?;
    info!("wrote {}", config.near_field.output);

    let angles = Array1::linspace(0.0, 2.0 * PI, config.far_field.samples).to_vec();
    let amplitudes = solver.far_field(&angles);
    let pattern = FarFieldSample::new(angles, amplitudes)?;

    FarFieldRenderer::new(config.far_field.width, config.far_field.height)
        .render_to_file(&config.far_field.output, &pattern)
        .map_err(|e| anyhow!("far-field render failed: {e}"))?;
    info!("wrote {}", config.far_field.output);

    Ok(())
}
