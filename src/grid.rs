use ndarray::{Array1, Array2};

/// Rectangular sampling grid stored as full coordinate arrays, the layout
/// the solver consumes: x varies along columns, y along rows, both arrays
/// the same shape as the field sampled on them.
pub struct Grid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl Grid {
    pub fn from_axes(xs: &[f64], ys: &[f64]) -> Self {
        let mut x = Array2::zeros((ys.len(), xs.len()));
        let mut y = Array2::zeros((ys.len(), xs.len()));
        for (i, &yv) in ys.iter().enumerate() {
            for (j, &xv) in xs.iter().enumerate() {
                x[[i, j]] = xv;
                y[[i, j]] = yv;
            }
        }
        Grid { x, y }
    }

    /// Square n-by-n grid covering [-half_extent, half_extent] in both
    /// directions.
    pub fn centered(half_extent: f64, n: usize) -> Self {
        let axis = Array1::linspace(-half_extent, half_extent, n).to_vec();
        Self::from_axes(&axis, &axis)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }
}
