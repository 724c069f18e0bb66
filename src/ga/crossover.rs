//! Bit-string crossover operators.
//!
//! Every operator takes two equal-length parents and produces two children
//! of the same length.
//!
//! # Operators
//!
//! - [`single_point_crossover`]: swap tails after one random cut
//! - [`two_point_crossover`]: swap the segment between two random cuts
//! - [`fixed_common_crossover`]: keep agreeing bits, re-draw the rest
//!
//! [`Crossover::apply`] gates the chosen operator with the crossover
//! probability; when the gate fails, both parents pass through unchanged.

use super::error::{check_probability, GaError, Result};
use super::types::{ensure_same_length, Chromosome};
use rand::Rng;
use std::str::FromStr;

const CROSSOVER_TAGS: &str = "single_point, two_point, fixed_common";

/// Crossover operator.
///
/// ```
/// use u_bitga::ga::Crossover;
///
/// assert_eq!("2_point".parse::<Crossover>().unwrap(), Crossover::TwoPoint);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// One random cut point `k` in `[0, L)`; children swap tails.
    #[default]
    SinglePoint,

    /// Two random cut points `a <= b`; children swap `[a, b)`.
    TwoPoint,

    /// Bits on which the parents agree are inherited by both children;
    /// every disagreeing position is drawn fresh for each child.
    FixedCommon,
}

impl FromStr for Crossover {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single_point" | "1_point" => Ok(Crossover::SinglePoint),
            "two_point" | "2_point" => Ok(Crossover::TwoPoint),
            "fixed_common" => Ok(Crossover::FixedCommon),
            other => Err(GaError::UnsupportedMethod {
                family: "crossover",
                name: other.to_string(),
                expected: CROSSOVER_TAGS,
            }),
        }
    }
}

impl Crossover {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::SinglePoint => "single_point",
            Crossover::TwoPoint => "two_point",
            Crossover::FixedCommon => "fixed_common",
        }
    }

    /// Recombines the parents with probability `crossover_chance`,
    /// otherwise returns copies of them.
    ///
    /// `crossover_chance = 0` never recombines; `crossover_chance = 1`
    /// always does. A chance outside `[0, 1]` is an
    /// [`InvalidProbability`](GaError::InvalidProbability) error.
    pub fn apply<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        crossover_chance: f64,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        let crossover_chance = check_probability("crossover_chance", crossover_chance)?;
        ensure_same_length(parent1, parent2)?;
        if rng.random_bool(crossover_chance) {
            self.recombine(parent1, parent2, rng)
        } else {
            Ok((parent1.clone(), parent2.clone()))
        }
    }

    /// Recombines the parents unconditionally.
    pub fn recombine<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        match self {
            Crossover::SinglePoint => single_point_crossover(parent1, parent2, rng),
            Crossover::TwoPoint => two_point_crossover(parent1, parent2, rng),
            Crossover::FixedCommon => fixed_common_crossover(parent1, parent2, rng),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Single-point crossover at a random cut `k` in `[0, L)`.
///
/// Child A = `p1[..k] + p2[k..]`, child B = `p2[..k] + p1[k..]`.
pub fn single_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    ensure_same_length(parent1, parent2)?;
    if parent1.is_empty() {
        return Ok((parent1.clone(), parent2.clone()));
    }
    let point = rng.random_range(0..parent1.len());
    Ok(single_point_at(parent1, parent2, point))
}

/// Single-point crossover at a fixed cut. `point` must not exceed the
/// parents' length.
pub fn single_point_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    point: usize,
) -> (Chromosome, Chromosome) {
    let (a, b) = (parent1.bits(), parent2.bits());
    let child1 = a[..point].iter().chain(&b[point..]).copied().collect();
    let child2 = b[..point].iter().chain(&a[point..]).copied().collect();
    (child1, child2)
}

/// Two-point crossover with two random cuts in `[0, L)`, ordered so that
/// `a <= b`.
///
/// Child A = `p1[..a] + p2[a..b] + p1[b..]`, child B is the mirror image.
pub fn two_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    ensure_same_length(parent1, parent2)?;
    if parent1.is_empty() {
        return Ok((parent1.clone(), parent2.clone()));
    }
    let (start, end) = random_segment(parent1.len(), rng);
    Ok(two_point_at(parent1, parent2, start, end))
}

/// Two-point crossover swapping `[start, end)`. Requires
/// `start <= end <= len`.
pub fn two_point_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    start: usize,
    end: usize,
) -> (Chromosome, Chromosome) {
    let swap = |keep: &[bool], donor: &[bool]| -> Chromosome {
        keep[..start]
            .iter()
            .chain(&donor[start..end])
            .chain(&keep[end..])
            .copied()
            .collect()
    };
    (
        swap(parent1.bits(), parent2.bits()),
        swap(parent2.bits(), parent1.bits()),
    )
}

/// Fixed-common-feature crossover.
///
/// Where the parents agree, both children inherit the shared bit. Where
/// they disagree, each child independently receives a fresh random bit.
/// This injects noise at every contested position rather than swapping.
pub fn fixed_common_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    ensure_same_length(parent1, parent2)?;
    let mut child1 = Vec::with_capacity(parent1.len());
    let mut child2 = Vec::with_capacity(parent1.len());
    for (&a, &b) in parent1.bits().iter().zip(parent2.bits()) {
        if a == b {
            child1.push(a);
            child2.push(a);
        } else {
            child1.push(rng.random_bool(0.5));
            child2.push(rng.random_bool(0.5));
        }
    }
    Ok((Chromosome::new(child1), Chromosome::new(child2)))
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick two cut points in `0..n` and return them as `(start, end)` with
/// `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [Crossover; 3] = [
        Crossover::SinglePoint,
        Crossover::TwoPoint,
        Crossover::FixedCommon,
    ];

    fn chromo(s: &str) -> Chromosome {
        s.parse().expect("valid bit string")
    }

    fn bits_strategy(len: usize) -> impl Strategy<Value = Chromosome> {
        prop::collection::vec(any::<bool>(), len).prop_map(Chromosome::new)
    }

    // ---- Single-point ----

    #[test]
    fn test_single_point_at() {
        let (c1, c2) = single_point_at(&chromo("000000"), &chromo("111111"), 2);
        assert_eq!(c1, chromo("001111"));
        assert_eq!(c2, chromo("110000"));
    }

    #[test]
    fn test_single_point_at_zero_swaps_whole() {
        let (c1, c2) = single_point_at(&chromo("0101"), &chromo("1100"), 0);
        assert_eq!(c1, chromo("1100"));
        assert_eq!(c2, chromo("0101"));
    }

    #[test]
    fn test_single_point_children_are_complementary() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1 = chromo("00000000");
        let p2 = chromo("11111111");
        for _ in 0..100 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng).unwrap();
            // c1 is 0*1+, c2 is its complement
            let k = c1.count_zeros();
            assert_eq!(c1, single_point_at(&p1, &p2, k).0);
            assert_eq!(c1.count_ones() + c2.count_ones(), 8);
            assert!(k < 8, "cut must be in [0, L)");
        }
    }

    // ---- Two-point ----

    #[test]
    fn test_two_point_at() {
        let (c1, c2) = two_point_at(&chromo("000000"), &chromo("111111"), 1, 4);
        assert_eq!(c1, chromo("011100"));
        assert_eq!(c2, chromo("100011"));
    }

    #[test]
    fn test_two_point_equal_cuts_is_identity() {
        let p1 = chromo("1010");
        let p2 = chromo("0110");
        let (c1, c2) = two_point_at(&p1, &p2, 2, 2);
        assert_eq!((c1, c2), (p1, p2));
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }

    // ---- Fixed common ----

    #[test]
    fn test_fixed_common_preserves_shared_bits() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1 = chromo("1100");
        let p2 = chromo("1010");
        let mut seen_pos1 = [false; 2];
        let mut seen_pos2 = [false; 2];
        for _ in 0..200 {
            let (c1, c2) = fixed_common_crossover(&p1, &p2, &mut rng).unwrap();
            for c in [&c1, &c2] {
                assert_eq!(c.get(0), Some(true));
                assert_eq!(c.get(3), Some(false));
                seen_pos1[usize::from(c.get(1) == Some(true))] = true;
                seen_pos2[usize::from(c.get(2) == Some(true))] = true;
            }
        }
        // Contested positions take both values over many trials
        assert_eq!(seen_pos1, [true, true]);
        assert_eq!(seen_pos2, [true, true]);
    }

    #[test]
    fn test_fixed_common_children_drawn_independently() {
        let mut rng = StdRng::seed_from_u64(9);
        let p1 = chromo("0000000000000000");
        let p2 = chromo("1111111111111111");
        let mut differing = 0;
        for _ in 0..50 {
            let (c1, c2) = fixed_common_crossover(&p1, &p2, &mut rng).unwrap();
            if c1 != c2 {
                differing += 1;
            }
        }
        assert!(differing > 45, "children should rarely coincide: {differing}/50");
    }

    #[test]
    fn test_identical_parents_reproduce() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = chromo("10110010");
        for op in ALL {
            let (c1, c2) = op.recombine(&p, &p, &mut rng).unwrap();
            assert_eq!(c1, p);
            assert_eq!(c2, p);
        }
    }

    // ---- Gate and errors ----

    #[test]
    fn test_length_mismatch_is_error() {
        let mut rng = StdRng::seed_from_u64(1);
        for op in ALL {
            assert_eq!(
                op.apply(&chromo("101"), &chromo("10"), 1.0, &mut rng),
                Err(GaError::LengthMismatch {
                    expected: 3,
                    found: 2
                })
            );
        }
    }

    #[test]
    fn test_invalid_chance_is_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let (p1, p2) = (chromo("0101"), chromo("1010"));
        for op in ALL {
            for chance in [f64::NAN, -0.5, 1.5, f64::INFINITY] {
                assert!(matches!(
                    op.apply(&p1, &p2, chance, &mut rng),
                    Err(GaError::InvalidProbability {
                        name: "crossover_chance",
                        ..
                    })
                ));
            }
        }
    }

    #[test]
    fn test_always_recombines_at_full_chance() {
        // Complementary parents: any recombination at a cut > 0 changes child A,
        // so over many trials child A must differ from parent 1 at least once
        // for every operator.
        let mut rng = StdRng::seed_from_u64(5);
        let p1 = chromo("00000000");
        let p2 = chromo("11111111");
        for op in ALL {
            let changed = (0..50)
                .filter(|_| op.apply(&p1, &p2, 1.0, &mut rng).unwrap().0 != p1)
                .count();
            assert!(changed > 25, "{} recombined only {changed}/50 times", op.name());
        }
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("single_point".parse::<Crossover>(), Ok(Crossover::SinglePoint));
        assert_eq!("1_point".parse::<Crossover>(), Ok(Crossover::SinglePoint));
        assert_eq!("two_point".parse::<Crossover>(), Ok(Crossover::TwoPoint));
        assert_eq!("fixed_common".parse::<Crossover>(), Ok(Crossover::FixedCommon));
        assert!("uniform".parse::<Crossover>().is_err());
    }

    proptest! {
        #[test]
        fn prop_children_keep_length(
            seed in any::<u64>(),
            (p1, p2) in (1usize..40).prop_flat_map(|n| (bits_strategy(n), bits_strategy(n))),
            chance in 0.0f64..=1.0,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            for op in ALL {
                let (c1, c2) = op.apply(&p1, &p2, chance, &mut rng).unwrap();
                prop_assert_eq!(c1.len(), p1.len());
                prop_assert_eq!(c2.len(), p1.len());
            }
        }

        #[test]
        fn prop_zero_chance_passes_parents_through(
            seed in any::<u64>(),
            (p1, p2) in (1usize..40).prop_flat_map(|n| (bits_strategy(n), bits_strategy(n))),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            for op in ALL {
                let (c1, c2) = op.apply(&p1, &p2, 0.0, &mut rng).unwrap();
                prop_assert_eq!(&c1, &p1);
                prop_assert_eq!(&c2, &p2);
            }
        }

        #[test]
        fn prop_point_crossover_conserves_bits(
            seed in any::<u64>(),
            (p1, p2) in (1usize..40).prop_flat_map(|n| (bits_strategy(n), bits_strategy(n))),
        ) {
            // Point operators only move bits between children position by position.
            let mut rng = StdRng::seed_from_u64(seed);
            for op in [Crossover::SinglePoint, Crossover::TwoPoint] {
                let (c1, c2) = op.recombine(&p1, &p2, &mut rng).unwrap();
                for i in 0..p1.len() {
                    let mut parents = [p1.get(i), p2.get(i)];
                    let mut children = [c1.get(i), c2.get(i)];
                    parents.sort();
                    children.sort();
                    prop_assert_eq!(parents, children);
                }
            }
        }
    }
}
