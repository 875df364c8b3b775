use colorgrad::{preset, Gradient};
use ndarray::Array2;
use plotters::style::RGBColor;
use std::f64::consts::PI;

/// Value-to-color domain for one panel, recomputed from the data extremum
/// on every render. A zero-width domain (all-zero data) is a valid
/// degenerate case that maps everything to the midpoint color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorScale {
    /// Symmetric domain [-max|v|, +max|v|], so zero sits exactly on the
    /// neutral midpoint of a diverging map and sign is unambiguous.
    pub fn symmetric(data: &Array2<f64>) -> Self {
        let max_abs = data.iter().map(|&v| v.abs()).fold(0.0_f64, f64::max);
        Self {
            vmin: -max_abs,
            vmax: max_abs,
        }
    }

    /// One-sided domain [0, max v] for non-negative data.
    pub fn positive(data: &Array2<f64>) -> Self {
        let max = data.iter().fold(0.0_f64, |m, &v| m.max(v));
        Self { vmin: 0.0, vmax: max }
    }

    /// The fixed phase domain [-π, π], independent of the data's actual
    /// angle distribution.
    pub fn phase() -> Self {
        Self { vmin: -PI, vmax: PI }
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.vmin + self.vmax)
    }

    /// Map a value into [0, 1]; the degenerate zero-width domain maps to
    /// the midpoint 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmax > self.vmin {
            ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

/// A colorgrad gradient with an orientation flag, sampled over [0, 1].
pub struct ColorMap {
    gradient: Box<dyn Gradient>,
    reversed: bool,
}

impl ColorMap {
    /// Red-blue diverging map with red at the positive end.
    pub fn diverging() -> Self {
        Self {
            gradient: Box::new(preset::rd_bu()),
            reversed: true,
        }
    }

    /// Sequential map for non-negative magnitudes.
    pub fn sequential() -> Self {
        Self {
            gradient: Box::new(preset::viridis()),
            reversed: false,
        }
    }

    /// Cyclic map for phase data: the two ends of the domain meet in the
    /// same color, so -π and π are indistinguishable, as they should be.
    pub fn cyclic() -> Self {
        Self {
            gradient: Box::new(preset::sinebow()),
            reversed: false,
        }
    }

    pub fn color_at(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let t = if self.reversed { 1.0 - t } else { t };
        let rgba = self.gradient.at(t as f32).to_rgba8();
        RGBColor(rgba[0], rgba[1], rgba[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn symmetric_scale_matches_extremum() {
        let data = arr2(&[[1.0, -3.0], [2.0, 0.5]]);
        let scale = ColorScale::symmetric(&data);
        assert_eq!(scale.vmax, 3.0);
        assert_eq!(scale.vmin, -3.0);
        assert_eq!(scale.normalize(0.0), 0.5);
    }

    #[test]
    fn all_zero_data_degenerates_to_midpoint() {
        let data = Array2::<f64>::zeros((4, 4));
        let scale = ColorScale::symmetric(&data);
        assert_eq!(scale.vmin, 0.0);
        assert_eq!(scale.vmax, 0.0);
        assert_eq!(scale.normalize(0.0), 0.5);
        assert_eq!(scale.normalize(17.0), 0.5);
    }

    #[test]
    fn positive_scale_starts_at_zero() {
        let data = arr2(&[[0.5, 2.0]]);
        let scale = ColorScale::positive(&data);
        assert_eq!(scale.vmin, 0.0);
        assert_eq!(scale.vmax, 2.0);
        assert_eq!(scale.normalize(1.0), 0.5);
    }

    #[test]
    fn phase_scale_is_fixed() {
        let scale = ColorScale::phase();
        assert_eq!(scale.vmin, -PI);
        assert_eq!(scale.vmax, PI);
        assert_eq!(scale.normalize(0.0), 0.5);
        // out-of-domain values clamp instead of wrapping
        assert_eq!(scale.normalize(2.0 * PI), 1.0);
    }

    #[test]
    fn reversed_map_flips_endpoints() {
        let diverging = ColorMap::diverging();
        let low = diverging.color_at(0.0);
        let high = diverging.color_at(1.0);
        // rd_bu runs red to blue; reversed puts red at the top end
        assert!(high.0 > high.2, "positive end should be red, got {high:?}");
        assert!(low.2 > low.0, "negative end should be blue, got {low:?}");
    }

    #[test]
    fn cyclic_map_closes_on_itself() {
        let cyclic = ColorMap::cyclic();
        let start = cyclic.color_at(0.0);
        let end = cyclic.color_at(1.0);
        let close = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 2;
        assert!(close(start.0, end.0) && close(start.1, end.1) && close(start.2, end.2));
    }
}
