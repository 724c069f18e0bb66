//! Error types for the GA engine.
//!
//! Validation errors are raised when a configuration value or a population
//! is assigned. Run-time errors (empty population, degenerate selection)
//! abort the current run and are wrapped in [`GaError::Aborted`] so the
//! caller knows in which generation they happened.

/// Errors produced by the GA engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// A probability setting is outside `[0, 1]` or not finite.
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// A structural setting (size, length, divider, threshold) is invalid.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A strategy tag is not recognized or has no implementation.
    #[error("{family} method `{name}` is not supported (expected one of: {expected})")]
    UnsupportedMethod {
        family: &'static str,
        name: String,
        expected: &'static str,
    },

    /// Chromosomes of different lengths were mixed.
    #[error("chromosome length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A character other than `'0'` or `'1'` in a chromosome string.
    #[error("invalid bit character {0:?}")]
    InvalidBit(char),

    /// An operation needed at least one chromosome.
    #[error("population is empty")]
    EmptyPopulation,

    /// Every selection weight is zero, so no chromosome can be drawn.
    #[error("{strategy} selection is degenerate: all weights are zero")]
    DegenerateSelection { strategy: &'static str },

    /// A run-time error, tagged with the generation that produced it.
    #[error("run aborted in generation {generation}: {source}")]
    Aborted {
        generation: usize,
        #[source]
        source: Box<GaError>,
    },
}

impl GaError {
    /// Wraps this error with the generation in which it occurred.
    pub(crate) fn at_generation(self, generation: usize) -> Self {
        GaError::Aborted {
            generation,
            source: Box::new(self),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;

/// Checks that a probability lies in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GaError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability_bounds() {
        assert_eq!(check_probability("p", 0.0), Ok(0.0));
        assert_eq!(check_probability("p", 1.0), Ok(1.0));
        assert!(check_probability("p", -0.01).is_err());
        assert!(check_probability("p", 1.01).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_aborted_carries_generation() {
        let err = GaError::EmptyPopulation.at_generation(7);
        assert_eq!(
            err.to_string(),
            "run aborted in generation 7: population is empty"
        );
        match err {
            GaError::Aborted { generation, source } => {
                assert_eq!(generation, 7);
                assert_eq!(*source, GaError::EmptyPopulation);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
