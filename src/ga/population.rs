//! Population construction and scoring.
//!
//! - [`generate_random_sample`]: lazy stream of balanced random chromosomes
//! - [`generate_all_possibilities`]: lazy enumeration of every chromosome of
//!   a given length
//! - [`Population`]: non-empty set of equal-length chromosomes
//! - [`ScoredPopulation`]: a population paired with one score per member

use super::error::{GaError, Result};
use super::types::{compare_fitness, Chromosome, FitnessFunction};
use rand::seq::SliceRandom;
use rand::Rng;

/// Lazily generates `count` random chromosomes of `length` bits.
///
/// Each chromosome is drawn as `length` bits sampled without replacement
/// from a pool of `length` zeros and `length` ones. Bit counts therefore
/// follow a hypergeometric distribution centred on `length / 2`, which is
/// tighter than independent coin flips.
///
/// ```
/// use rand::SeedableRng;
/// use u_bitga::ga::generate_random_sample;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let sample: Vec<_> = generate_random_sample(3, 16, &mut rng).collect();
/// assert_eq!(sample.len(), 3);
/// assert!(sample.iter().all(|c| c.len() == 16));
/// ```
pub fn generate_random_sample<R: Rng>(
    count: usize,
    length: usize,
    rng: &mut R,
) -> RandomSample<'_, R> {
    let mut pool = vec![false; length];
    pool.resize(2 * length, true);
    RandomSample {
        pool,
        length,
        remaining: count,
        rng,
    }
}

/// Iterator returned by [`generate_random_sample`].
pub struct RandomSample<'r, R> {
    pool: Vec<bool>,
    length: usize,
    remaining: usize,
    rng: &'r mut R,
}

impl<R: Rng> Iterator for RandomSample<'_, R> {
    type Item = Chromosome;

    fn next(&mut self) -> Option<Chromosome> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (picked, _) = self.pool.partial_shuffle(&mut *self.rng, self.length);
        Some(Chromosome::new(picked.to_vec()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for RandomSample<'_, R> {}

/// Lazily enumerates all `2^length` chromosomes in lexicographic order
/// (`00..0`, `00..1`, ..., `11..1`).
///
/// Intended for exhaustive search over small lengths. Lengths of 64 or
/// more are rejected since the count no longer fits in a `u64`.
pub fn generate_all_possibilities(length: usize) -> Result<AllPossibilities> {
    if length >= 64 {
        return Err(GaError::InvalidParameter(format!(
            "cannot enumerate chromosomes of length {length} (must be below 64)"
        )));
    }
    Ok(AllPossibilities {
        next: 0,
        end: 1u64 << length,
        length,
    })
}

/// Iterator returned by [`generate_all_possibilities`].
#[derive(Debug, Clone)]
pub struct AllPossibilities {
    next: u64,
    end: u64,
    length: usize,
}

impl Iterator for AllPossibilities {
    type Item = Chromosome;

    fn next(&mut self) -> Option<Chromosome> {
        if self.next >= self.end {
            return None;
        }
        let value = self.next;
        self.next += 1;
        Some(
            (0..self.length)
                .rev()
                .map(|shift| (value >> shift) & 1 == 1)
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        match usize::try_from(left) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// A non-empty collection of chromosomes sharing one length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Chromosome>", into = "Vec<Chromosome>")
)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    chromosome_length: usize,
}

impl Population {
    /// Builds a population, taking the chromosome length from the first
    /// member.
    ///
    /// Fails on an empty input, on zero-length chromosomes, or when any
    /// member's length differs from the first.
    pub fn new<I>(chromosomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Chromosome>,
    {
        let chromosomes: Vec<Chromosome> = chromosomes.into_iter().collect();
        let chromosome_length = chromosomes
            .first()
            .map(Chromosome::len)
            .ok_or(GaError::EmptyPopulation)?;
        if chromosome_length == 0 {
            return Err(GaError::InvalidParameter(
                "chromosome length must be at least 1".into(),
            ));
        }
        if let Some(bad) = chromosomes.iter().find(|c| c.len() != chromosome_length) {
            return Err(GaError::LengthMismatch {
                expected: chromosome_length,
                found: bad.len(),
            });
        }
        Ok(Self {
            chromosomes,
            chromosome_length,
        })
    }

    /// Builds a random population with [`generate_random_sample`].
    pub fn random<R: Rng>(size: usize, chromosome_length: usize, rng: &mut R) -> Result<Self> {
        Self::new(generate_random_sample(size, chromosome_length, rng))
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns `true` if the population has no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Length shared by every chromosome.
    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    /// The chromosomes in population order.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Iterates over the chromosomes.
    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    /// Consumes the population and returns its chromosomes.
    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }

    /// Scores every member once.
    ///
    /// With the `parallel` feature and `parallel == true`, members are
    /// scored on the rayon pool. Scores are always returned in population
    /// order.
    pub fn evaluate<F: FitnessFunction + ?Sized>(
        self,
        fitness: &F,
        parallel: bool,
    ) -> ScoredPopulation {
        let scores = score_all(&self.chromosomes, fitness, parallel);
        ScoredPopulation {
            population: self,
            scores,
        }
    }
}

impl TryFrom<Vec<Chromosome>> for Population {
    type Error = GaError;

    fn try_from(chromosomes: Vec<Chromosome>) -> Result<Self> {
        Self::new(chromosomes)
    }
}

impl From<Population> for Vec<Chromosome> {
    fn from(population: Population) -> Self {
        population.chromosomes
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}

#[cfg(feature = "parallel")]
fn score_all<F: FitnessFunction + ?Sized>(
    chromosomes: &[Chromosome],
    fitness: &F,
    parallel: bool,
) -> Vec<f64> {
    use rayon::prelude::*;

    if parallel {
        chromosomes.par_iter().map(|c| fitness.score(c)).collect()
    } else {
        chromosomes.iter().map(|c| fitness.score(c)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all<F: FitnessFunction + ?Sized>(
    chromosomes: &[Chromosome],
    fitness: &F,
    _parallel: bool,
) -> Vec<f64> {
    chromosomes.iter().map(|c| fitness.score(c)).collect()
}

/// A population with one raw score per member, in population order.
///
/// Built fresh every generation; scores are never carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPopulation {
    population: Population,
    scores: Vec<f64>,
}

impl ScoredPopulation {
    /// Pairs a population with precomputed scores.
    ///
    /// Fails if the number of scores differs from the population size.
    pub fn from_scores(population: Population, scores: Vec<f64>) -> Result<Self> {
        if scores.len() != population.len() {
            return Err(GaError::InvalidParameter(format!(
                "expected {} scores, got {}",
                population.len(),
                scores.len()
            )));
        }
        Ok(Self { population, scores })
    }

    /// The underlying population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Raw scores in population order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if there are no scored chromosomes.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates over `(chromosome, score)` pairs in population order.
    pub fn iter(&self) -> impl Iterator<Item = (&Chromosome, f64)> + '_ {
        self.population.iter().zip(self.scores.iter().copied())
    }

    /// The highest-scoring member. Ties go to the earliest member.
    pub fn fittest(&self) -> (&Chromosome, f64) {
        let mut best = 0;
        for (i, &s) in self.scores.iter().enumerate().skip(1) {
            if compare_fitness(s, self.scores[best]).is_gt() {
                best = i;
            }
        }
        (&self.population.chromosomes[best], self.scores[best])
    }

    /// Highest raw score.
    pub fn max_fitness(&self) -> f64 {
        self.fittest().1
    }

    /// Mean raw score.
    pub fn average_fitness(&self) -> f64 {
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Member indices ordered by ascending score. The sort is stable, so
    /// equal scores keep population order.
    pub(crate) fn ascending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| compare_fitness(self.scores[a], self.scores[b]));
        order
    }

    /// Consumes the scores and returns the population.
    pub fn into_population(self) -> Population {
        self.population
    }
}
