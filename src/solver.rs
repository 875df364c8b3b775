use ndarray::{Array2, Zip};
use num_complex::Complex64;

/// How a solver should read the coordinate arrays it is handed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateFrame {
    /// The arrays hold Cartesian x and y.
    Cartesian,
    /// The arrays hold radius and angle.
    Polar,
}

/// The numerical backend this crate plots for. Implementations own the
/// problem description (boundary parameters, material contrasts, the
/// wavenumber); rendering only ever sees the sampled arrays.
pub trait FieldSolver {
    /// Scattered field on the given coordinate arrays. Points farther than
    /// `truncation` from the origin are zeroed when a radius is given.
    fn scattered_field(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        frame: CoordinateFrame,
        truncation: Option<f64>,
    ) -> Array2<Complex64>;

    /// Incident plus scattered field.
    fn total_field(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        frame: CoordinateFrame,
        truncation: Option<f64>,
    ) -> Array2<Complex64>;

    /// Angular far-field pattern at the given angles (radians).
    fn far_field(&self, angles: &[f64]) -> Vec<Complex64>;
}

fn to_cartesian(a: f64, b: f64, frame: CoordinateFrame) -> (f64, f64) {
    match frame {
        CoordinateFrame::Cartesian => (a, b),
        CoordinateFrame::Polar => (a * b.cos(), a * b.sin()),
    }
}

fn truncate(
    field: &mut Array2<Complex64>,
    x: &Array2<f64>,
    y: &Array2<f64>,
    frame: CoordinateFrame,
    truncation: Option<f64>,
) {
    let Some(radius) = truncation else { return };
    Zip::from(field).and(x).and(y).for_each(|u, &a, &b| {
        let (px, py) = to_cartesian(a, b, frame);
        if px.hypot(py) > radius {
            *u = Complex64::new(0.0, 0.0);
        }
    });
}

/// Closed-form stand-in for a numerical backend: a unit plane wave
/// travelling along +x plus an outgoing cylindrical wave radiated from
/// (offset, 0), weighted by the material contrast. It evaluates closed-form
/// expressions only; solving the actual boundary-value problem is the job
/// of whatever real solver implements [`FieldSolver`].
pub struct PointSource {
    pub wavenumber: f64,
    pub offset: f64,
    pub permittivity: f64,
    pub permeability: f64,
}

impl PointSource {
    pub fn new(wavenumber: f64, offset: f64, permittivity: f64, permeability: f64) -> Self {
        Self {
            wavenumber,
            offset,
            permittivity,
            permeability,
        }
    }

    /// Radiated amplitude. Zero contrast (index 1) scatters nothing.
    fn strength(&self) -> f64 {
        (self.permittivity * self.permeability).sqrt() - 1.0
    }

    fn outgoing(&self, px: f64, py: f64) -> Complex64 {
        let k = self.wavenumber;
        let r = (px - self.offset).hypot(py);
        // large-argument form of the outgoing cylindrical wave; kr is
        // floored so the source point itself stays finite
        let kr = (k * r).max(1e-3);
        self.strength() * Complex64::new(0.0, kr).exp() / kr.sqrt()
    }
}

impl FieldSolver for PointSource {
    fn scattered_field(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        frame: CoordinateFrame,
        truncation: Option<f64>,
    ) -> Array2<Complex64> {
        let mut out = Array2::from_elem(x.dim(), Complex64::new(0.0, 0.0));
        Zip::from(&mut out).and(x).and(y).for_each(|u, &a, &b| {
            let (px, py) = to_cartesian(a, b, frame);
            *u = self.outgoing(px, py);
        });
        truncate(&mut out, x, y, frame, truncation);
        out
    }

    fn total_field(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        frame: CoordinateFrame,
        truncation: Option<f64>,
    ) -> Array2<Complex64> {
        let mut out = self.scattered_field(x, y, frame, None);
        Zip::from(&mut out).and(x).and(y).for_each(|u, &a, &b| {
            let (px, _) = to_cartesian(a, b, frame);
            *u += Complex64::new(0.0, self.wavenumber * px).exp();
        });
        truncate(&mut out, x, y, frame, truncation);
        out
    }

    fn far_field(&self, angles: &[f64]) -> Vec<Complex64> {
        // far-field pattern of a radiator displaced from the origin:
        // constant modulus, phase advancing with the projected offset
        let k = self.wavenumber;
        let strength = self.strength();
        angles
            .iter()
            .map(|&theta| {
                strength * Complex64::new(0.0, -k * self.offset * theta.cos()).exp() / k.sqrt()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn solver() -> PointSource {
        PointSource::new(2.0, 0.3, 2.0, 1.0)
    }

    #[test]
    fn truncation_zeroes_outside_radius() {
        let grid = Grid::centered(2.0, 9);
        let field = solver().scattered_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, Some(1.0));
        // the corner sits at radius 2√2, well outside the cut
        assert_eq!(field[[0, 0]], Complex64::new(0.0, 0.0));
        // the center is inside and keeps its value
        assert!(field[[4, 4]].norm() > 0.0);
    }

    #[test]
    fn total_is_incident_plus_scattered() {
        let grid = Grid::centered(1.0, 5);
        let s = solver();
        let scattered = s.scattered_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, None);
        let total = s.total_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, None);
        let incident = total[[2, 3]] - scattered[[2, 3]];
        assert!((incident.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn polar_frame_matches_cartesian() {
        let s = solver();
        let r = 1.5;
        let theta: f64 = 0.7;
        let cart = Grid::from_axes(&[r * theta.cos()], &[r * theta.sin()]);
        let polar = Grid::from_axes(&[r], &[theta]);
        let a = s.scattered_field(&cart.x, &cart.y, CoordinateFrame::Cartesian, None);
        let b = s.scattered_field(&polar.x, &polar.y, CoordinateFrame::Polar, None);
        assert!((a[[0, 0]] - b[[0, 0]]).norm() < 1e-12);
    }

    #[test]
    fn unit_contrast_scatters_nothing() {
        let grid = Grid::centered(1.0, 3);
        let s = PointSource::new(2.0, 0.3, 1.0, 1.0);
        let field = s.scattered_field(&grid.x, &grid.y, CoordinateFrame::Cartesian, None);
        assert!(field.iter().all(|u| u.norm() == 0.0));
    }

    #[test]
    fn far_field_matches_angle_count() {
        let angles: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let ff = solver().far_field(&angles);
        assert_eq!(ff.len(), 8);
    }
}
