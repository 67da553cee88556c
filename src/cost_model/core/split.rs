//! Seeded train/test partitioning of a [`Dataset`].
//!
//! Purpose
//! -------
//! Partition dataset indices into disjoint training and held-out sets in a
//! reproducible, seed-controlled way.
//!
//! Key behaviors
//! -------------
//! - [`permutation`] shuffles `0..n` with the Durstenfeld variant of
//!   Fisher–Yates: for `i` from `n−1` down to `1`, swap `i` with
//!   `j ~ U{0..=i}`. The generator is `StdRng::seed_from_u64(seed)`, created
//!   per call.
//! - [`split`] takes the first `⌊f·N⌋` permuted indices as `test` and the
//!   rest as `train`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Same `(N, seed)` and the same `rand` release ⇒ same permutation. The
//!   sequence is not bit-compatible with other languages' generators.
//! - `train ∪ test = 0..N`, `train ∩ test = ∅`, `|test| = ⌊f·N⌋`.
//!
//! Conventions
//! -----------
//! - Index order inside `train` and `test` is permutation order, not sorted.
use crate::cost_model::{
    core::data::Dataset,
    errors::{CostModelError, CostModelResult},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

/// Disjoint training and held-out index sets over one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Validate a held-out fraction: finite and in `[0, 1)`.
///
/// # Errors
/// - `InvalidTestFraction { value }` otherwise.
pub fn validate_test_fraction(fraction: f64) -> CostModelResult<()> {
    if !fraction.is_finite() || !(0.0..1.0).contains(&fraction) {
        return Err(CostModelError::InvalidTestFraction { value: fraction });
    }
    Ok(())
}

/// Uniform random permutation of `0..n` driven by `seed`.
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut idx: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        idx.swap(i, j);
    }
    idx
}

/// Partition `dataset` into training and held-out indices.
///
/// Parameters
/// ----------
/// - `dataset`: `&Dataset`
///   Source rows; only its length is used.
/// - `fraction`: `f64`
///   Held-out share in `[0, 1)`. `0` yields an empty test set.
/// - `seed`: `u64`
///   Seed for the permutation generator.
///
/// Returns
/// -------
/// `CostModelResult<Split>`
///
/// Errors
/// ------
/// - `InvalidTestFraction` for a non-finite fraction or one outside `[0, 1)`.
/// - `EmptyDataset` when the dataset has no rows.
pub fn split(dataset: &Dataset, fraction: f64, seed: u64) -> CostModelResult<Split> {
    validate_test_fraction(fraction)?;
    let n = dataset.len();
    if n == 0 {
        return Err(CostModelError::EmptyDataset);
    }
    let n_test = ((fraction * n as f64).floor() as usize).min(n);
    let mut perm = permutation(n, seed);
    let train = perm.split_off(n_test);
    Ok(Split { train, test: perm })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_model::core::data::Observation;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Fraction validation and the empty-dataset error.
    // - Test-set size, disjointness and completeness on a fixed example.
    // - Determinism for a repeated seed.
    //
    // They intentionally DO NOT cover:
    // - Randomized property checks; see `tests/property_split.rs`.
    // -------------------------------------------------------------------------

    fn dataset(n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| Observation { p: 4, m: 1.0 + i as f64, x1: 6.0, x2: 6.0, x3: 3.0, t: 1e-5 })
            .collect();
        Dataset::new(rows).expect("valid rows")
    }

    #[test]
    // Purpose
    // -------
    // Fractions outside [0, 1) and NaN are rejected.
    //
    // Given
    // -----
    // - fractions 1.0, -0.1 and NaN on a 10-row dataset.
    //
    // Expect
    // ------
    // - `InvalidTestFraction` each time.
    fn split_rejects_invalid_fractions() {
        // Arrange
        let ds = dataset(10);

        // Act & Assert
        for f in [1.0, -0.1, f64::NAN] {
            assert!(matches!(split(&ds, f, 42), Err(CostModelError::InvalidTestFraction { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // Splitting an empty dataset is a degenerate-dataset error.
    //
    // Given
    // -----
    // - An empty dataset and a valid fraction.
    //
    // Expect
    // ------
    // - `Err(EmptyDataset)`.
    fn split_rejects_empty_dataset() {
        // Act & Assert
        assert_eq!(split(&Dataset::default(), 0.2, 42), Err(CostModelError::EmptyDataset));
    }

    #[test]
    // Purpose
    // -------
    // The held-out set has ⌊f·N⌋ members and the two sets partition 0..N.
    //
    // Given
    // -----
    // - N = 101, f = 0.2.
    //
    // Expect
    // ------
    // - |test| = 20, |train| = 81, sorted union = 0..101.
    fn split_partitions_indices() {
        // Arrange
        let ds = dataset(101);

        // Act
        let s = split(&ds, 0.2, 42).expect("valid split");

        // Assert
        assert_eq!(s.test.len(), 20);
        assert_eq!(s.train.len(), 81);
        let mut all: Vec<usize> = s.train.iter().chain(s.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..101).collect::<Vec<_>>());
    }

    #[test]
    // Purpose
    // -------
    // Same seed, same split; a zero fraction leaves the test set empty.
    //
    // Given
    // -----
    // - Two calls with seed 7 and one with fraction 0.
    //
    // Expect
    // ------
    // - Identical splits, and an empty test set for f = 0.
    fn split_is_deterministic_and_handles_zero_fraction() {
        // Arrange
        let ds = dataset(30);

        // Act
        let a = split(&ds, 0.3, 7).expect("valid split");
        let b = split(&ds, 0.3, 7).expect("valid split");
        let none = split(&ds, 0.0, 7).expect("valid split");

        // Assert
        assert_eq!(a, b);
        assert!(none.test.is_empty());
        assert_eq!(none.train.len(), 30);
    }
}
