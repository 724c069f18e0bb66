//! GA evolutionary loop execution.
//!
//! [`GaRunner`] owns the population and drives it through
//! selection → crossover → mutation → replacement, one generation per
//! [`advance_generation`](GaRunner::advance_generation) call, until a
//! [`BreakCondition`] is met.

use super::config::GaConfig;
use super::error::{GaError, Result};
use super::mutation::mutate;
use super::population::{Population, ScoredPopulation};
use super::termination::BreakCondition;
use super::types::{Chromosome, FitnessFunction, GenerationStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of a GA run.
///
/// Contains the final population, the best chromosome in it, and the
/// statistics of every generation executed by this runner.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The population after the last completed generation.
    pub population: Population,

    /// The fittest chromosome of the final population.
    pub best: Chromosome,

    /// Score of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Max and average fitness at the end of each generation.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Highest max fitness seen in any generation, or `None` if no
    /// generation ran.
    pub fn peak_fitness(&self) -> Option<f64> {
        self.history
            .iter()
            .map(|s| s.max_fitness)
            .reduce(f64::max)
    }
}

/// Executes the GA evolutionary loop.
///
/// The runner exclusively owns its population, random number generator,
/// and statistics. The loop is sequential; only fitness evaluation inside
/// a generation may run in parallel.
///
/// # Usage
///
/// ```
/// use u_bitga::ga::{BreakCondition, Chromosome, GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_population_size(20)?
///     .with_chromosome_length(16)?
///     .with_mutation_chance(0.3)?
///     .with_break_condition(BreakCondition::GenerationCount(100))?
///     .with_seed(42);
///
/// let mut runner = GaRunner::new(config, |c: &Chromosome| c.count_ones() as f64)?;
/// let result = runner.run()?;
/// assert_eq!(result.generations, 100);
/// assert_eq!(result.history.len(), 100);
/// # Ok::<(), u_bitga::ga::GaError>(())
/// ```
pub struct GaRunner<F> {
    config: GaConfig,
    fitness: F,
    rng: StdRng,
    current: ScoredPopulation,
    generation: usize,
    history: Vec<GenerationStats>,
}

impl<F: FitnessFunction> GaRunner<F> {
    /// Creates a runner with a random initial population of
    /// `config.population_size()` chromosomes of
    /// `config.chromosome_length()` bits.
    pub fn new(config: GaConfig, fitness: F) -> Result<Self> {
        config.validate()?;
        let mut rng = create_rng(config.seed());
        let population =
            Population::random(config.population_size(), config.chromosome_length(), &mut rng)?;
        Ok(Self::assemble(config, fitness, rng, population))
    }

    /// Creates a runner seeded with an explicit population.
    ///
    /// The seed's size and chromosome length take precedence over
    /// `config.population_size()` and `config.chromosome_length()`: every
    /// following generation has as many members as the seed.
    pub fn with_population(config: GaConfig, fitness: F, population: Population) -> Result<Self> {
        config.validate()?;
        let rng = create_rng(config.seed());
        Ok(Self::assemble(config, fitness, rng, population))
    }

    fn assemble(config: GaConfig, fitness: F, rng: StdRng, population: Population) -> Self {
        let current = population.evaluate(&fitness, config.parallel());
        Self {
            config,
            fitness,
            rng,
            current,
            generation: 0,
            history: Vec::new(),
        }
    }

    /// Runs one generation and returns its statistics.
    ///
    /// Parent pairs are drawn from the current scored population until the
    /// new generation is full (an odd size drops the last pair's second
    /// child). Each pair is crossed over, each child mutated, and the new
    /// generation replaces the old one only once it is complete.
    #[instrument(level = "debug", skip_all, fields(generation = self.generation + 1))]
    pub fn advance_generation(&mut self) -> Result<&GenerationStats> {
        let generation = self.generation + 1;
        let next = self.breed().map_err(|e| e.at_generation(generation))?;

        self.current = next.evaluate(&self.fitness, self.config.parallel());
        self.generation = generation;

        let stats = GenerationStats {
            generation,
            max_fitness: self.current.max_fitness(),
            average_fitness: self.current.average_fitness(),
        };
        debug!(
            max_fitness = stats.max_fitness,
            average_fitness = stats.average_fitness,
            "generation complete"
        );
        self.fitness.on_generation(&stats);
        self.history.push(stats);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Builds the next generation from the current one.
    fn breed(&mut self) -> Result<Population> {
        let size = self.current.len();
        if size == 0 {
            return Err(GaError::EmptyPopulation);
        }
        let crossover = self.config.crossover();
        let crossover_chance = self.config.crossover_chance();
        let mutation_chance = self.config.mutation_chance();

        let pool = self.config.selection().pool(&self.current)?;
        let parents: Vec<&Chromosome> = pool
            .sample(2 * size.div_ceil(2), &mut self.rng)
            .collect();

        let mut children = Vec::with_capacity(size + 1);
        for pair in parents.chunks_exact(2) {
            let (child1, child2) = crossover.apply(pair[0], pair[1], crossover_chance, &mut self.rng)?;
            children.push(mutate(child1, mutation_chance, &mut self.rng)?);
            if children.len() < size {
                children.push(mutate(child2, mutation_chance, &mut self.rng)?);
            }
        }
        Population::new(children)
    }

    /// Runs until the configured break condition is met.
    pub fn run(&mut self) -> Result<GaResult> {
        let condition = self.config.break_condition();
        self.run_until(&condition)
    }

    /// Runs until `condition` is met.
    pub fn run_until(&mut self, condition: &BreakCondition) -> Result<GaResult> {
        self.run_observed(condition, None, |_| {})
    }

    /// Runs until `condition` is met or `cancel` is set.
    ///
    /// The cancel flag is checked only between generations, and `observer`
    /// receives the statistics of each completed generation. This is the
    /// hook for hosts that show live progress from a worker thread.
    pub fn run_observed<O>(
        &mut self,
        condition: &BreakCondition,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: O,
    ) -> Result<GaResult>
    where
        O: FnMut(&GenerationStats),
    {
        condition.validate()?;
        info!(
            population = self.current.len(),
            chromosome_length = self.current.population().chromosome_length(),
            selection = self.config.selection().name(),
            crossover = self.config.crossover().name(),
            condition = condition.name(),
            target = condition.target(),
            "starting GA run"
        );

        let mut cancelled = false;
        while !self.is_finished(condition) {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            let stats = *self.advance_generation()?;
            observer(&stats);
        }

        let result = self.result(cancelled);
        info!(
            generations = result.generations,
            average_fitness = self.average_fitness(),
            best_fitness = result.best_fitness,
            best = %result.best,
            cancelled,
            "GA run finished"
        );
        Ok(result)
    }

    /// Whether `condition` holds for the current state.
    pub fn is_finished(&self, condition: &BreakCondition) -> bool {
        condition.is_met(self.generation, self.current.max_fitness())
    }

    /// Snapshot of the current state as a [`GaResult`].
    pub fn result(&self, cancelled: bool) -> GaResult {
        let (best, best_fitness) = self.fittest();
        GaResult {
            population: self.current.population().clone(),
            best: best.clone(),
            best_fitness,
            generations: self.generation,
            cancelled,
            history: self.history.clone(),
        }
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        self.current.population()
    }

    /// The current population with its scores.
    pub fn scored(&self) -> &ScoredPopulation {
        &self.current
    }

    /// The fittest chromosome of the current population and its score.
    pub fn fittest(&self) -> (&Chromosome, f64) {
        self.current.fittest()
    }

    /// Mean score of the current population.
    pub fn average_fitness(&self) -> f64 {
        self.current.average_fitness()
    }

    /// Statistics of every completed generation.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

// ============================================================================
// Tests
// ============================================================================
