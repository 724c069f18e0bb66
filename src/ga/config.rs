//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! Every setter validates its input, so an invalid value is rejected when
//! it is assigned rather than in the middle of a run.

use super::crossover::Crossover;
use super::error::{check_probability, GaError, Result};
use super::selection::Selection;
use super::termination::BreakCondition;

/// Configuration for the bit-string Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size(), 10);
/// assert_eq!(config.chromosome_length(), 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{BreakCondition, Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(40)?
///     .with_chromosome_length(32)?
///     .with_selection(Selection::Roulette)?
///     .with_crossover(Crossover::TwoPoint)
///     .with_mutation_chance(0.1)?
///     .with_break_condition(BreakCondition::GenerationCount(200))?
///     .with_seed(42);
/// # Ok::<(), u_bitga::ga::GaError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    population_size: usize,
    chromosome_length: usize,
    mutation_chance: f64,
    crossover_chance: f64,
    selection: Selection,
    crossover: Crossover,
    break_condition: BreakCondition,
    parallel: bool,
    seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            chromosome_length: 8,
            mutation_chance: 0.2,
            crossover_chance: 1.0,
            selection: Selection::default(),
            crossover: Crossover::default(),
            break_condition: BreakCondition::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of chromosomes per generation (at least 1).
    pub fn with_population_size(mut self, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(GaError::InvalidParameter(
                "population_size must be at least 1".into(),
            ));
        }
        self.population_size = n;
        Ok(self)
    }

    /// Sets the length of randomly generated chromosomes (at least 1).
    pub fn with_chromosome_length(mut self, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(GaError::InvalidParameter(
                "chromosome_length must be at least 1".into(),
            ));
        }
        self.chromosome_length = length;
        Ok(self)
    }

    /// Sets the probability of flipping one bit of each child.
    pub fn with_mutation_chance(mut self, chance: f64) -> Result<Self> {
        self.mutation_chance = check_probability("mutation_chance", chance)?;
        Ok(self)
    }

    /// Sets the probability of recombining a parent pair.
    pub fn with_crossover_chance(mut self, chance: f64) -> Result<Self> {
        self.crossover_chance = check_probability("crossover_chance", chance)?;
        Ok(self)
    }

    /// Sets the selection strategy. A cutoff divider of zero is rejected.
    pub fn with_selection(mut self, selection: Selection) -> Result<Self> {
        selection.validate()?;
        self.selection = selection;
        Ok(self)
    }

    /// Sets the selection strategy from a tag such as `"roulette"`.
    pub fn with_selection_tag(self, tag: &str) -> Result<Self> {
        self.with_selection(tag.parse()?)
    }

    /// Sets cutoff selection with the given divider.
    ///
    /// Equivalent to `.with_selection(Selection::Cutoff { divider })`.
    pub fn with_cutoff_divider(self, divider: usize) -> Result<Self> {
        self.with_selection(Selection::cutoff(divider)?)
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover operator from a tag such as `"2_point"`.
    pub fn with_crossover_tag(self, tag: &str) -> Result<Self> {
        Ok(self.with_crossover(tag.parse()?))
    }

    /// Sets the break condition used by [`GaRunner::run`](super::GaRunner::run).
    ///
    /// A `NaN` fitness threshold is rejected.
    pub fn with_break_condition(mut self, condition: BreakCondition) -> Result<Self> {
        condition.validate()?;
        self.break_condition = condition;
        Ok(self)
    }

    /// Sets the break condition from a tag and value, e.g.
    /// `("fitness", 100.0)`.
    pub fn with_break_tag(self, kind: &str, value: f64) -> Result<Self> {
        self.with_break_condition(BreakCondition::from_tag(kind, value)?)
    }

    /// Enables or disables parallel fitness evaluation.
    ///
    /// Only takes effect with the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of chromosomes per generation.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Length of randomly generated chromosomes.
    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    /// Probability of flipping one bit of each child.
    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    /// Probability of recombining a parent pair.
    pub fn crossover_chance(&self) -> f64 {
        self.crossover_chance
    }

    /// Selection strategy.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Crossover operator.
    pub fn crossover(&self) -> Crossover {
        self.crossover
    }

    /// Break condition used by [`GaRunner::run`](super::GaRunner::run).
    pub fn break_condition(&self) -> BreakCondition {
        self.break_condition
    }

    /// Whether fitness evaluation may run in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Random seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// The setters already enforce these rules; this re-check covers
    /// values that arrive through deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GaError::InvalidParameter(
                "population_size must be at least 1".into(),
            ));
        }
        if self.chromosome_length == 0 {
            return Err(GaError::InvalidParameter(
                "chromosome_length must be at least 1".into(),
            ));
        }
        check_probability("mutation_chance", self.mutation_chance)?;
        check_probability("crossover_chance", self.crossover_chance)?;
        self.selection.validate()?;
        self.break_condition.validate()?;
        Ok(())
    }
}
