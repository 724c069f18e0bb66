//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes are chosen as parents for
//! crossover. A strategy turns a [`ScoredPopulation`] into a
//! [`SelectionPool`], which can then be sampled any number of times.
//! Sampling is always with replacement.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms" (truncation selection)

use super::error::{GaError, Result};
use super::population::ScoredPopulation;
use super::types::Chromosome;
use rand::Rng;
use std::borrow::Cow;
use std::str::FromStr;
use tracing::instrument;

const SELECTION_TAGS: &str = "cutoff, roulette";

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher score = better).
///
/// # Examples
///
/// ```
/// use u_bitga::ga::Selection;
///
/// // Keep the top half, sample uniformly from it
/// let sel = Selection::cutoff(2).unwrap();
///
/// // Fitness-proportionate
/// let sel: Selection = "roulette".parse().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Truncation selection.
    ///
    /// Chromosomes are stably sorted by ascending score and only the top
    /// `ceil(n / divider)` survive; parents are drawn uniformly from the
    /// survivors. `divider = 2` drops the bottom half, `divider = 4`
    /// keeps the top quarter, `divider = 1` keeps everyone.
    ///
    /// # Complexity
    /// O(n log n) per generation (sort), O(1) per selection
    Cutoff { divider: usize },

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are the raw scores with anything `<= 0` (or `NaN`) clipped
    /// to zero; zero-weight chromosomes are never drawn. Fails with
    /// [`GaError::DegenerateSelection`] when every weight is zero.
    ///
    /// # Complexity
    /// O(n log n) per generation (sort), O(log n) per selection
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Cutoff { divider: 2 }
    }
}

impl FromStr for Selection {
    type Err = GaError;

    /// Parses a selection tag. `cutoff` uses the default divider of 2.
    ///
    /// `tournament` is recognized but rejected: its tournament size and
    /// replacement rule are not defined.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cutoff" => Ok(Selection::default()),
            "roulette" => Ok(Selection::Roulette),
            other => Err(GaError::UnsupportedMethod {
                family: "selection",
                name: other.to_string(),
                expected: SELECTION_TAGS,
            }),
        }
    }
}

impl Selection {
    /// Cutoff selection with the given divider (must be at least 1).
    pub fn cutoff(divider: usize) -> Result<Self> {
        let sel = Selection::Cutoff { divider };
        sel.validate()?;
        Ok(sel)
    }

    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Cutoff { .. } => "cutoff",
            Selection::Roulette => "roulette",
        }
    }

    /// Checks strategy parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            Selection::Cutoff { divider: 0 } => Err(GaError::InvalidParameter(
                "cutoff divider must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Prepares a pool to draw parents from.
    ///
    /// The pool borrows the chromosomes of `scored` and can be sampled
    /// repeatedly.
    #[instrument(level = "debug", skip_all, fields(strategy = self.name(), population = scored.len()))]
    pub fn pool<'a>(&self, scored: &'a ScoredPopulation) -> Result<SelectionPool<'a>> {
        self.validate()?;
        if scored.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        match *self {
            Selection::Cutoff { divider } => Ok(cutoff_pool(scored, divider)),
            Selection::Roulette => roulette_pool(scored),
        }
    }

    /// Lazily selects `count` chromosomes from `scored`.
    ///
    /// Shorthand for [`pool`](Self::pool) followed by
    /// [`SelectionPool::sample`].
    pub fn select<'a, 'p, R: Rng>(
        &self,
        scored: &'a ScoredPopulation,
        count: usize,
        rng: &'p mut R,
    ) -> Result<Sample<'a, 'p, R>>
    where
        'a: 'p,
    {
        let pool = self.pool(scored)?;
        Ok(Sample {
            pool: Cow::Owned(pool),
            remaining: count,
            rng,
        })
    }
}

/// Parents prepared for drawing, as produced by [`Selection::pool`].
#[derive(Debug, Clone)]
pub struct SelectionPool<'a> {
    candidates: Vec<&'a Chromosome>,
    /// Normalized cumulative weights; empty for uniform sampling.
    cumulative: Vec<f64>,
}

impl<'a> SelectionPool<'a> {
    /// Draws one chromosome.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> &'a Chromosome {
        if self.cumulative.is_empty() {
            return self.candidates[rng.random_range(0..self.candidates.len())];
        }
        let r: f64 = rng.random();
        // First candidate whose cumulative probability reaches r
        let idx = self
            .cumulative
            .partition_point(|&q| q < r)
            .min(self.candidates.len() - 1); // floating-point fallback
        self.candidates[idx]
    }

    /// Lazily draws `count` chromosomes. The pool itself is untouched, so
    /// it can be sampled again.
    pub fn sample<'p, R: Rng>(&'p self, count: usize, rng: &'p mut R) -> Sample<'a, 'p, R>
    where
        'a: 'p,
    {
        Sample {
            pool: Cow::Borrowed(self),
            remaining: count,
            rng,
        }
    }

    /// The chromosomes that can be drawn.
    pub fn candidates(&self) -> &[&'a Chromosome] {
        &self.candidates
    }
}

/// Finite iterator of selected chromosomes.
pub struct Sample<'a, 'p, R> {
    pool: Cow<'p, SelectionPool<'a>>,
    remaining: usize,
    rng: &'p mut R,
}

impl<'a, R: Rng> Iterator for Sample<'a, '_, R> {
    type Item = &'a Chromosome;

    fn next(&mut self) -> Option<&'a Chromosome> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.pool.draw(&mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Sample<'_, '_, R> {}

/// Keep the top `ceil(n / divider)` chromosomes.
fn cutoff_pool(scored: &ScoredPopulation, divider: usize) -> SelectionPool<'_> {
    let order = scored.ascending_order();
    let keep = order.len().div_ceil(divider).max(1);
    let dropped = order.len() - keep;
    let chromosomes = scored.population().chromosomes();
    SelectionPool {
        candidates: order[dropped..].iter().map(|&i| &chromosomes[i]).collect(),
        cumulative: Vec::new(),
    }
}

/// Cumulative distribution over ascending-score chromosomes, clipping
/// non-positive scores to zero weight.
fn roulette_pool(scored: &ScoredPopulation) -> Result<SelectionPool<'_>> {
    let chromosomes = scored.population().chromosomes();
    let scores = scored.scores();

    let weighted: Vec<(usize, f64)> = scored
        .ascending_order()
        .into_iter()
        .filter(|&i| scores[i] > 0.0)
        .map(|i| (i, scores[i]))
        .collect();

    let total: f64 = weighted.iter().map(|&(_, w)| w).sum();
    if weighted.is_empty() || !(total > 0.0 && total.is_finite()) {
        return Err(GaError::DegenerateSelection {
            strategy: "roulette",
        });
    }

    let mut cumulative = Vec::with_capacity(weighted.len());
    let mut acc = 0.0;
    for &(_, w) in &weighted {
        acc += w / total;
        cumulative.push(acc);
    }

    Ok(SelectionPool {
        candidates: weighted.iter().map(|&(i, _)| &chromosomes[i]).collect(),
        cumulative,
    })
}
