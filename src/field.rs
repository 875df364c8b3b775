use ndarray::Array2;
use num_complex::Complex64;
use std::fmt;

use crate::error::PlotError;
use crate::grid::Grid;

/// Which solver output a figure shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scattered,
    Total,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scattered => write!(f, "Scattered field"),
            FieldKind::Total => write!(f, "Total field"),
        }
    }
}

/// Complex field sampled on a rectangular grid. The coordinate arrays and
/// the value array always share one shape; the constructor rejects anything
/// else instead of letting a garbage plot through.
pub struct FieldSample {
    x: Array2<f64>,
    y: Array2<f64>,
    values: Array2<Complex64>,
}

impl FieldSample {
    pub fn new(
        x: Array2<f64>,
        y: Array2<f64>,
        values: Array2<Complex64>,
    ) -> Result<Self, PlotError> {
        if x.dim() != values.dim() {
            return Err(PlotError::ShapeMismatch {
                field: values.dim(),
                coords: x.dim(),
            });
        }
        if y.dim() != values.dim() {
            return Err(PlotError::ShapeMismatch {
                field: values.dim(),
                coords: y.dim(),
            });
        }
        Ok(Self { x, y, values })
    }

    pub fn on_grid(grid: Grid, values: Array2<Complex64>) -> Result<Self, PlotError> {
        Self::new(grid.x, grid.y, values)
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn real(&self) -> Array2<f64> {
        self.values.mapv(|u| u.re)
    }

    pub fn imag(&self) -> Array2<f64> {
        self.values.mapv(|u| u.im)
    }

    pub fn modulus(&self) -> Array2<f64> {
        self.values.mapv(|u| u.norm())
    }

    /// Argument in (-π, π].
    pub fn argument(&self) -> Array2<f64> {
        self.values.mapv(|u| u.arg())
    }
}

/// One strip of the far-field polar curve: three consecutive
/// (angle, modulus) points, colored by a single phase value. Adjacent
/// segments overlap by two points so the rendered curve is continuous.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub points: [(f64, f64); 3],
    pub phase: f64,
}

/// Angular far-field pattern: ascending angles in radians paired 1:1 with
/// complex amplitudes. Consumed once per render, never mutated.
pub struct FarFieldSample {
    angles: Vec<f64>,
    amplitudes: Vec<Complex64>,
}

impl FarFieldSample {
    pub fn new(angles: Vec<f64>, amplitudes: Vec<Complex64>) -> Result<Self, PlotError> {
        if angles.len() != amplitudes.len() {
            return Err(PlotError::LengthMismatch {
                angles: angles.len(),
                amplitudes: amplitudes.len(),
            });
        }
        Ok(Self { angles, amplitudes })
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn moduli(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm()).collect()
    }

    pub fn max_modulus(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm())
            .fold(0.0_f64, f64::max)
    }

    /// Phase of the average of each adjacent amplitude pair. Averaging the
    /// complex values before taking the angle stays stable across the -π/π
    /// wrap, where interpolating the angles themselves would not.
    pub fn pair_phases(&self) -> Vec<f64> {
        self.amplitudes
            .windows(2)
            .map(|w| ((w[0] + w[1]) / 2.0).arg())
            .collect()
    }

    /// Build the overlapping three-point segments of the polar curve.
    /// Segment i spans samples i-1, i, i+1 and carries the phase of the
    /// pair (i-1, i). Needs at least 3 samples.
    pub fn segments(&self) -> Result<Vec<Segment>, PlotError> {
        let n = self.angles.len();
        if n < 3 {
            return Err(PlotError::TooFewSamples(n));
        }
        let moduli = self.moduli();
        let phases = self.pair_phases();
        Ok((1..n - 1)
            .map(|i| Segment {
                points: [
                    (self.angles[i - 1], moduli[i - 1]),
                    (self.angles[i], moduli[i]),
                    (self.angles[i + 1], moduli[i + 1]),
                ],
                phase: phases[i - 1],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn quadrant_pattern() -> FarFieldSample {
        let angles = vec![0.0, PI / 2.0, PI, 3.0 * PI / 2.0, 2.0 * PI];
        let amplitudes = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(-1.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(1.0, 0.0),
        ];
        FarFieldSample::new(angles, amplitudes).unwrap()
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let x = Array2::<f64>::zeros((4, 4));
        let y = Array2::<f64>::zeros((4, 4));
        let values = Array2::from_elem((4, 5), Complex64::new(1.0, 0.0));
        assert!(matches!(
            FieldSample::new(x, y, values),
            Err(PlotError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn derived_arrays() {
        let x = Array2::<f64>::zeros((1, 2));
        let y = Array2::<f64>::zeros((1, 2));
        let values = ndarray::arr2(&[[Complex64::new(3.0, 4.0), Complex64::new(-1.0, 0.0)]]);
        let field = FieldSample::new(x, y, values).unwrap();
        assert_eq!(field.real()[[0, 0]], 3.0);
        assert_eq!(field.imag()[[0, 0]], 4.0);
        assert_eq!(field.modulus()[[0, 0]], 5.0);
        // arg lands in (-π, π], so -1 maps to +π
        assert!((field.argument()[[0, 1]] - PI).abs() < 1e-12);
    }

    #[test]
    fn far_field_length_mismatch() {
        let err = FarFieldSample::new(vec![0.0, 1.0], vec![Complex64::new(1.0, 0.0)]);
        assert!(matches!(err, Err(PlotError::LengthMismatch { .. })));
    }

    #[test]
    fn pair_phases_hit_quadrant_midpoints() {
        let sample = quadrant_pattern();
        let phases = sample.pair_phases();
        let expected = [PI / 4.0, 3.0 * PI / 4.0, -3.0 * PI / 4.0, -PI / 4.0];
        assert_eq!(phases.len(), 4);
        for (got, want) in phases.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    fn phase_of_average_is_stable_across_branch_cut() {
        // Two unit amplitudes straddling the -π/π wrap: averaging the
        // angles would give something near zero, the complex average stays
        // next to the cut.
        let sample = FarFieldSample::new(
            vec![0.0, 0.1, 0.2],
            vec![
                Complex64::from_polar(1.0, PI - 0.1),
                Complex64::from_polar(1.0, -PI + 0.1),
                Complex64::from_polar(1.0, -PI + 0.2),
            ],
        )
        .unwrap();
        let phases = sample.pair_phases();
        assert!(phases[0].abs() > 3.0, "expected a phase near ±π, got {}", phases[0]);
    }

    #[test]
    fn segment_window_shape() {
        let sample = quadrant_pattern();
        let segments = sample.segments().unwrap();
        assert_eq!(segments.len(), sample.len() - 2);
        for (i, seg) in segments.iter().enumerate() {
            // three consecutive samples per segment
            assert_eq!(seg.points[0].0, sample.angles()[i]);
            assert_eq!(seg.points[1].0, sample.angles()[i + 1]);
            assert_eq!(seg.points[2].0, sample.angles()[i + 2]);
        }
        // adjacent segments share two points, so the curve is continuous
        for pair in segments.windows(2) {
            assert_eq!(pair[0].points[1], pair[1].points[0]);
            assert_eq!(pair[0].points[2], pair[1].points[1]);
        }
    }

    #[test]
    fn segments_need_three_samples() {
        let sample = FarFieldSample::new(
            vec![0.0, 1.0],
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)],
        )
        .unwrap();
        assert!(matches!(sample.segments(), Err(PlotError::TooFewSamples(2))));
    }

    #[test]
    fn moduli_of_quadrant_pattern_are_uniform() {
        let sample = quadrant_pattern();
        assert!(sample.moduli().iter().all(|&m| (m - 1.0).abs() < 1e-12));
        assert_eq!(sample.max_modulus(), 1.0);
    }
}
