use crate::error::PlotError;

/// Physical type of the innermost material interface, decided by the
/// leading character of the problem's boundary code: codes starting with
/// 'P' mark a penetrable boundary, anything else is impenetrable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InnerBoundary {
    Penetrable,
    Impenetrable,
}

impl InnerBoundary {
    pub fn from_code(code: &str) -> Self {
        if code.starts_with('P') {
            InnerBoundary::Penetrable
        } else {
            InnerBoundary::Impenetrable
        }
    }
}

/// Concentric circular interfaces separating regions of differing material
/// properties, ordered inside out and centered on the origin. Built from
/// the problem description before rendering, read-only afterwards.
pub struct BoundaryGeometry {
    radii: Vec<f64>,
    inner: InnerBoundary,
}

impl BoundaryGeometry {
    pub fn new(radii: Vec<f64>, inner: InnerBoundary) -> Result<Self, PlotError> {
        let ascending = radii.windows(2).all(|w| w[0] < w[1]);
        if radii.is_empty() || radii[0] <= 0.0 || !ascending {
            return Err(PlotError::InvalidRadii(radii));
        }
        Ok(Self { radii, inner })
    }

    pub fn from_code(radii: Vec<f64>, code: &str) -> Result<Self, PlotError> {
        Self::new(radii, InnerBoundary::from_code(code))
    }

    pub fn inner(&self) -> InnerBoundary {
        self.inner
    }

    /// The innermost radius, the one whose rendering depends on the
    /// boundary type.
    pub fn innermost(&self) -> f64 {
        self.radii[0]
    }

    /// Every radius beyond the innermost; these always render as dashed
    /// outlines.
    pub fn outer(&self) -> &[f64] {
        &self.radii[1..]
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_kind_follows_leading_character() {
        assert_eq!(InnerBoundary::from_code("Penetrable"), InnerBoundary::Penetrable);
        assert_eq!(InnerBoundary::from_code("P2"), InnerBoundary::Penetrable);
        assert_eq!(InnerBoundary::from_code("Dirichlet"), InnerBoundary::Impenetrable);
        assert_eq!(InnerBoundary::from_code("Neumann"), InnerBoundary::Impenetrable);
        assert_eq!(InnerBoundary::from_code(""), InnerBoundary::Impenetrable);
    }

    #[test]
    fn radii_must_be_positive_and_ascending() {
        assert!(BoundaryGeometry::new(vec![], InnerBoundary::Penetrable).is_err());
        assert!(BoundaryGeometry::new(vec![0.0, 1.0], InnerBoundary::Penetrable).is_err());
        assert!(BoundaryGeometry::new(vec![1.0, 0.5], InnerBoundary::Penetrable).is_err());
        let geom = BoundaryGeometry::new(vec![0.5, 1.0], InnerBoundary::Penetrable).unwrap();
        assert_eq!(geom.innermost(), 0.5);
        assert_eq!(geom.outer(), &[1.0]);
    }
}
