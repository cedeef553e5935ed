//! Error types of the linkage solver.
use thiserror::Error;

/// Result type alias of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors of the position solver and the linkage construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The three distances cannot form a triangle, the two circles do not
    /// intersect.
    #[error("geometrically infeasible: no triangle closes (discriminant {discriminant:.3e})")]
    GeometricallyInfeasible {
        /// Negative discriminant of the triangle area
        discriminant: f64,
    },
    /// The two reference points coincide with equal distances, so every
    /// point on a circle is a solution.
    #[error("indeterminate: reference points coincide")]
    Indeterminate,
    /// The linkage dimensions are rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The sweep bounds cannot produce a finite sequence of angles.
    #[error("invalid sweep: start={start}, end={end}, step={step}")]
    InvalidSweep {
        /// Start angle
        start: f64,
        /// End angle (exclusive)
        end: f64,
        /// Angle increment
        step: f64,
    },
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_cfg(details: impl Into<String>) -> Self {
        Self::InvalidConfiguration(details.into())
    }

    /// Return true if the error is an infeasible position.
    pub const fn is_infeasible(&self) -> bool {
        matches!(self, Self::GeometricallyInfeasible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::GeometricallyInfeasible { discriminant: -2. };
        assert!(err.to_string().contains("infeasible"));
        assert!(err.is_infeasible());

        let err = Error::invalid_cfg("d14 must be positive");
        assert!(err.to_string().contains("d14 must be positive"));
        assert!(!err.is_infeasible());

        let err = Error::InvalidSweep { start: 0., end: 1., step: 0. };
        assert!(err.to_string().contains("step=0"));
    }
}
