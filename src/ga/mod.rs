//! Bit-string Genetic Algorithm.
//!
//! Evolves a population of fixed-length binary chromosomes toward higher
//! scores under a caller-supplied [`FitnessFunction`].
//!
//! # Key Types
//!
//! - [`Chromosome`]: fixed-length bit string
//! - [`Population`] / [`ScoredPopulation`]: a generation and its scores
//! - [`GaConfig`]: validated algorithm parameters
//! - [`GaRunner`]: owns the population and executes the generational loop
//! - [`GaResult`]: final population, best chromosome, per-generation history
//!
//! # Strategies
//!
//! - [`Selection`]: cutoff (truncation) or roulette wheel
//! - [`Crossover`]: single-point, two-point, or fixed-common-feature
//! - [`mutate`]: single-bit flip gated by the mutation chance
//! - [`BreakCondition`]: generation count or fitness threshold
//!
//! # Fitness sign
//!
//! Scores are maximized and reported raw. Only roulette selection clips
//! scores `<= 0` to a zero weight; statistics and break conditions always
//! see the raw value.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod crossover;
mod error;
pub mod mutation;
mod population;
mod runner;
mod selection;
mod termination;
mod types;

pub use config::GaConfig;
pub use crossover::Crossover;
pub use error::{GaError, Result};
pub use mutation::mutate;
pub use population::{
    generate_all_possibilities, generate_random_sample, AllPossibilities, Population,
    RandomSample, ScoredPopulation,
};
pub use runner::{GaResult, GaRunner};
pub use selection::{Sample, Selection, SelectionPool};
pub use termination::BreakCondition;
pub use types::{Chromosome, FitnessFunction, GenerationStats};
