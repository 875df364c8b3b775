use thiserror::Error;

/// Precondition violations surfaced before any drawing happens. Rendering
/// has no transient failure modes, so none of these are retryable.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("field shape {field:?} does not match coordinate shape {coords:?}")]
    ShapeMismatch {
        field: (usize, usize),
        coords: (usize, usize),
    },

    #[error("far-field pattern has {angles} angles but {amplitudes} amplitudes")]
    LengthMismatch { angles: usize, amplitudes: usize },

    #[error("far-field pattern needs at least 3 samples, got {0}")]
    TooFewSamples(usize),

    #[error("boundary radii must be positive and ascending, got {0:?}")]
    InvalidRadii(Vec<f64>),
}
