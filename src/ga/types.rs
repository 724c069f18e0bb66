//! Core data types: the bit-string [`Chromosome`], the [`FitnessFunction`]
//! contract, and per-generation [`GenerationStats`].

use super::error::{GaError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A fixed-length ordered sequence of bits.
///
/// Chromosomes are values: operators return new chromosomes instead of
/// editing their inputs.
///
/// # Text form
///
/// ```
/// use u_bitga::ga::Chromosome;
///
/// let c: Chromosome = "1100".parse().unwrap();
/// assert_eq!(c.len(), 4);
/// assert_eq!(c.count_ones(), 2);
/// assert_eq!(c.to_string(), "1100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome from raw bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates a chromosome of `length` zero bits.
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the chromosome has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, most significant first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The bit at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of cleared bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Returns a copy with the bit at `index` inverted.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn with_flipped(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[index] = !bits[index];
        Self { bits }
    }

    /// Number of positions at which `self` and `other` differ.
    ///
    /// Returns an error if the lengths differ.
    pub fn hamming_distance(&self, other: &Chromosome) -> Result<usize> {
        ensure_same_length(self, other)?;
        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Interprets the bits as a big-endian unsigned integer.
    ///
    /// Returns `None` when the chromosome is longer than 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &b| (acc << 1) | u64::from(b)),
        )
    }

    /// Decodes the bits as `min + (value mod modulus)`, where `value` is the
    /// big-endian unsigned integer they spell.
    ///
    /// Works for any length, which makes it suitable for mapping a bit
    /// group onto a parameter range starting at `min`. Returns `None` if
    /// `modulus` is zero or the sum overflows `u64`.
    ///
    /// ```
    /// use u_bitga::ga::Chromosome;
    ///
    /// let c: Chromosome = "01011".parse().unwrap();
    /// assert_eq!(c.to_uint(0, 100), Some(11));
    /// assert_eq!(c.to_uint(10, 4), Some(13));
    /// ```
    pub fn to_uint(&self, min: u64, modulus: u64) -> Option<u64> {
        if modulus == 0 {
            return None;
        }
        let m = u128::from(modulus);
        let value = self
            .bits
            .iter()
            .fold(0u128, |acc, &b| ((acc << 1) | u128::from(b)) % m);
        min.checked_add(value as u64)
    }

    /// Index into a list of `len` options, i.e. `to_uint(0, len)`.
    ///
    /// Returns `None` if `len` is zero.
    pub fn to_index(&self, len: usize) -> Option<usize> {
        self.to_uint(0, len as u64).map(|i| i as usize)
    }

    /// Consumes the chromosome and returns its bits.
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromIterator<bool> for Chromosome {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for Chromosome {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GaError::InvalidBit(other)),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Self::new)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

pub(crate) fn ensure_same_length(a: &Chromosome, b: &Chromosome) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(GaError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        })
    }
}

/// Total order on fitness values with `NaN` ranked below every number.
pub(crate) fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| b.is_nan().cmp(&a.is_nan()))
}

/// A caller-supplied objective. Higher scores are better (maximization).
///
/// The engine calls [`score`](FitnessFunction::score) exactly once per
/// chromosome per generation. Scores may be negative; only roulette
/// selection clips them, and only for its weights.
///
/// Any `Fn(&Chromosome) -> f64` closure is a fitness function:
///
/// ```
/// use u_bitga::ga::{Chromosome, FitnessFunction};
///
/// let one_max = |c: &Chromosome| c.count_ones() as f64;
/// assert_eq!(one_max.score(&"1011".parse::<Chromosome>().unwrap()), 3.0);
/// ```
///
/// # Thread Safety
///
/// `Send + Sync` is required because the runner may evaluate a population
/// in parallel when the `parallel` feature is enabled.
pub trait FitnessFunction: Send + Sync {
    /// Scores a chromosome.
    fn score(&self, chromosome: &Chromosome) -> f64;

    /// Called after every completed generation.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

impl<F> FitnessFunction for F
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
{
    fn score(&self, chromosome: &Chromosome) -> f64 {
        self(chromosome)
    }
}

/// Statistics of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Highest raw score in the generation.
    pub max_fitness: f64,

    /// Mean raw score of the generation.
    pub average_fitness: f64,
}
