//! Single-bit mutation.
//!
//! Mutation is an all-or-nothing event: with probability `mutation_chance`
//! exactly one uniformly chosen bit is flipped, otherwise the chromosome is
//! returned untouched. There is no per-bit rate.

use super::error::{check_probability, Result};
use super::types::Chromosome;
use rand::Rng;

/// Flips one random bit with probability `mutation_chance`.
///
/// Returns [`InvalidProbability`](super::GaError::InvalidProbability) if
/// `mutation_chance` is outside `[0, 1]`.
pub fn mutate<R: Rng>(
    chromosome: Chromosome,
    mutation_chance: f64,
    rng: &mut R,
) -> Result<Chromosome> {
    let mutation_chance = check_probability("mutation_chance", mutation_chance)?;
    if chromosome.is_empty() || !rng.random_bool(mutation_chance) {
        return Ok(chromosome);
    }
    Ok(flip_random_bit(chromosome, rng))
}

/// Flips exactly one uniformly chosen bit. Empty chromosomes are returned
/// as-is.
pub fn flip_random_bit<R: Rng>(chromosome: Chromosome, rng: &mut R) -> Chromosome {
    if chromosome.is_empty() {
        return chromosome;
    }
    let idx = rng.random_range(0..chromosome.len());
    let mut bits = chromosome.into_bits();
    bits[idx] = !bits[idx];
    Chromosome::new(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaError;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_chance_is_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        let c: Chromosome = "10110".parse().unwrap();
        for _ in 0..100 {
            assert_eq!(mutate(c.clone(), 0.0, &mut rng), Ok(c.clone()));
        }
    }

    #[test]
    fn test_flip_positions_are_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = Chromosome::zeros(4);
        let mut counts = [0u32; 4];
        for _ in 0..8000 {
            let m = flip_random_bit(c.clone(), &mut rng);
            let idx = m.bits().iter().position(|&b| b).unwrap();
            counts[idx] += 1;
        }
        for &n in &counts {
            assert!(n > 1700, "expected uniform flips, got {counts:?}");
        }
    }

    #[test]
    fn test_mutation_rate_is_respected() {
        let mut rng = StdRng::seed_from_u64(11);
        let c = Chromosome::zeros(8);
        let mutated = (0..10000)
            .filter(|_| mutate(c.clone(), 0.3, &mut rng).unwrap() != c)
            .count();
        let p = mutated as f64 / 10000.0;
        assert!((p - 0.3).abs() < 0.03, "observed rate {p}");
    }

    #[test]
    fn test_empty_chromosome() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = Chromosome::zeros(0);
        assert_eq!(mutate(c.clone(), 1.0, &mut rng), Ok(c));
    }

    #[test]
    fn test_invalid_chance_is_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = Chromosome::zeros(4);
        for chance in [1.5, -0.1, f64::NAN] {
            assert!(matches!(
                mutate(c.clone(), chance, &mut rng),
                Err(GaError::InvalidProbability {
                    name: "mutation_chance",
                    ..
                })
            ));
        }
        // rejected even when there is no bit to flip
        assert!(mutate(Chromosome::zeros(0), 2.0, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_full_chance_flips_exactly_one(
            seed in any::<u64>(),
            bits in prop::collection::vec(any::<bool>(), 1..64),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = Chromosome::new(bits);
            let m = mutate(c.clone(), 1.0, &mut rng).unwrap();
            prop_assert_eq!(m.len(), c.len());
            prop_assert_eq!(m.hamming_distance(&c).unwrap(), 1);
        }
    }
}
