//! Bit-string genetic algorithm engine.
//!
//! Provides a generic GA over fixed-length binary chromosomes:
//!
//! - **Selection**: cutoff (truncation) and fitness-proportionate roulette
//! - **Crossover**: single-point, two-point, and fixed-common-feature
//!   recombination, gated by a crossover probability
//! - **Mutation**: single random bit flip, gated by a mutation probability
//! - **Termination**: generation count or fitness threshold
//!
//! # Architecture
//!
//! The fitness function is a black box supplied by the caller; the crate
//! contains no problem-specific encodings. Progress is exposed through a
//! synchronous API (`advance_generation`, `run`) plus an observer callback,
//! so hosts decide where the loop runs.
//!
//! ```
//! use u_bitga::ga::{BreakCondition, Chromosome, GaConfig, GaRunner};
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)?
//!     .with_chromosome_length(24)?
//!     .with_break_condition(BreakCondition::GenerationCount(50))?
//!     .with_seed(7);
//! let mut runner = GaRunner::new(config, |c: &Chromosome| c.count_ones() as f64)?;
//! let result = runner.run()?;
//! println!("best {} scored {}", result.best, result.best_fitness);
//! # Ok::<(), u_bitga::ga::GaError>(())
//! ```

pub mod ga;
