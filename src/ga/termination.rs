//! Break conditions that end the generational loop.

use super::error::{GaError, Result};

const BREAK_TAGS: &str = "generation_count, fitness_threshold";

/// Predicate checked at every generation boundary.
///
/// ```
/// use u_bitga::ga::BreakCondition;
///
/// let cond = BreakCondition::from_tag("generation", 50.0).unwrap();
/// assert!(!cond.is_met(49, 0.0));
/// assert!(cond.is_met(50, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakCondition {
    /// Stop once the generation counter reaches `n`.
    GenerationCount(usize),

    /// Stop once the fittest chromosome scores at least `t`.
    ///
    /// Nothing bounds the number of generations; pair it with a cancel
    /// flag if the threshold may be unreachable.
    FitnessThreshold(f64),
}

impl Default for BreakCondition {
    fn default() -> Self {
        BreakCondition::GenerationCount(1000)
    }
}

impl BreakCondition {
    /// Builds a condition from a tag and a numeric value.
    ///
    /// Tags: `generation` / `generation_count` (value must be a
    /// non-negative integer) and `fitness` / `fitness_threshold`.
    pub fn from_tag(kind: &str, value: f64) -> Result<Self> {
        let cond = match kind {
            "generation" | "generation_count" => {
                if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) {
                    return Err(GaError::InvalidParameter(format!(
                        "generation count must be a non-negative integer, got {value}"
                    )));
                }
                BreakCondition::GenerationCount(value as usize)
            }
            "fitness" | "fitness_threshold" => BreakCondition::FitnessThreshold(value),
            other => {
                return Err(GaError::UnsupportedMethod {
                    family: "break condition",
                    name: other.to_string(),
                    expected: BREAK_TAGS,
                })
            }
        };
        cond.validate()?;
        Ok(cond)
    }

    /// Checks the condition's value.
    pub fn validate(&self) -> Result<()> {
        match self {
            BreakCondition::FitnessThreshold(t) if t.is_nan() => Err(
                GaError::InvalidParameter("fitness threshold must not be NaN".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BreakCondition::GenerationCount(_) => "generation_count",
            BreakCondition::FitnessThreshold(_) => "fitness_threshold",
        }
    }

    /// Returns `true` when the loop should stop.
    pub fn is_met(&self, generation: usize, best_fitness: f64) -> bool {
        match *self {
            BreakCondition::GenerationCount(n) => generation >= n,
            BreakCondition::FitnessThreshold(t) => best_fitness >= t,
        }
    }

    /// The quantity this condition watches, for progress reports.
    pub fn progress(&self, generation: usize, best_fitness: f64) -> f64 {
        match self {
            BreakCondition::GenerationCount(_) => generation as f64,
            BreakCondition::FitnessThreshold(_) => best_fitness,
        }
    }

    /// The value [`progress`](Self::progress) must reach.
    pub fn target(&self) -> f64 {
        match *self {
            BreakCondition::GenerationCount(n) => n as f64,
            BreakCondition::FitnessThreshold(t) => t,
        }
    }
}
