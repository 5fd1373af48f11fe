//! Error types shared across the canopy, soil, sensor and dielectric modules.
//!
//! Every failure here is an input error surfaced at the point it is detected:
//! construction for range and composition checks, the dielectric query for
//! model names, the structural edit for out-of-range layer indices.

use thiserror::Error;

/// Construction-time validation failure.
///
/// Each variant names the offending parameter and the range it must satisfy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value outside a closed interval.
    #[error("{parameter} must be between {min} and {max}, got {value}")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Value that must be strictly positive.
    #[error("{parameter} must be positive, got {value}")]
    NotPositive { parameter: &'static str, value: f64 },
    /// Sand and clay fractions together exceed the whole sample.
    #[error("sum of sand ({sand}) and clay ({clay}) fractions cannot exceed 1")]
    CompositionExceeded { sand: f64, clay: f64 },
    /// Frequency below the microwave plausibility floor (likely not in GHz).
    #[error("frequency {frequency} GHz is below the {floor} GHz microwave floor")]
    NotMicrowave { frequency: f64, floor: f64 },
    /// Frequency and angle lists that cannot be broadcast together.
    #[error("{frequencies} frequencies cannot be broadcast against {angles} incidence angles")]
    ShapeMismatch { frequencies: usize, angles: usize },
    /// A list parameter that needs at least one entry.
    #[error("{parameter} must contain at least one value")]
    Empty { parameter: &'static str },
    /// Polarization character other than `H` or `V`.
    #[error("unknown polarization '{0}', expected 'H' or 'V'")]
    UnknownPolarization(char),
    /// Polarization channel listed more than once.
    #[error("polarization '{0}' listed more than once")]
    DuplicatePolarization(char),
}

impl ValidationError {
    /// Name of the parameter that failed validation.
    pub fn parameter(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { parameter, .. }
            | ValidationError::NotPositive { parameter, .. }
            | ValidationError::Empty { parameter } => *parameter,
            ValidationError::CompositionExceeded { .. } => "sand + clay",
            ValidationError::NotMicrowave { .. } => "frequency",
            ValidationError::ShapeMismatch { .. } => "frequency/theta",
            ValidationError::UnknownPolarization(_)
            | ValidationError::DuplicatePolarization(_) => "polarization",
        }
    }

    /// Check `value` against the closed interval `[min, max]`.
    pub(crate) fn check_range(
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), Self> {
        // NaN fails both comparisons, so test for membership rather than exclusion.
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }

    /// Check that `value` is strictly positive.
    pub(crate) fn check_positive(parameter: &'static str, value: f64) -> Result<(), Self> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::NotPositive { parameter, value })
        }
    }
}

/// Dielectric model lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DielectricError {
    /// Name outside the fixed set of soil models.
    #[error("unknown dielectric model: {0} (expected one of: dobson, mironov, wang)")]
    ModelNotFound(String),
}

/// Structural canopy edit failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanopyError {
    /// Positional index past the top of the layer stack.
    #[error("layer index {index} out of range for canopy with {len} layers")]
    LayerIndexOutOfRange { index: usize, len: usize },
}

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Wraps construction-time validation errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Wraps dielectric model lookup errors.
    #[error(transparent)]
    Dielectric(#[from] DielectricError),
    /// Wraps canopy edit errors.
    #[error(transparent)]
    Canopy(#[from] CanopyError),
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
