//! Encoding-specific genetic operators.
//!
//! Initialization, crossover and mutation for the two chromosome
//! encodings the solvers use. All operators take the random generator
//! explicitly so a seeded run is reproducible end to end.
//!
//! # Bit strings
//!
//! - [`random_bits`]: uniform {0,1} genes
//! - [`single_point_crossover`]: prefix/suffix splice, two children
//! - [`bit_flip_mutation`]: independent per-gene flips
//!
//! # Permutations
//!
//! - [`random_permutation`]: uniform shuffle of `0..n`
//! - [`order_crossover`] (OX): Davis (1985) — preserves relative order
//! - [`swap_mutation`]: exchange two distinct positions
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::seq::{index, SliceRandom};
use rand::Rng;

// ============================================================================
// Bit strings
// ============================================================================

/// Draws `n` genes independently and uniformly from {0, 1}.
pub fn random_bits<R: Rng>(n: usize, rng: &mut R) -> Vec<bool> {
    (0..n).map(|_| rng.random_bool(0.5)).collect()
}

/// Single-point crossover.
///
/// Picks a cut point uniformly in `[1, len - 1]` and returns
/// `(p1[..cut] + p2[cut..], p2[..cut] + p1[cut..])`. Chromosomes shorter
/// than two genes have no interior cut point and are returned as copies.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..n);
    splice_at(parent1, parent2, cut)
}

/// Splices two parents at a fixed cut point.
fn splice_at<T: Clone>(parent1: &[T], parent2: &[T], cut: usize) -> (Vec<T>, Vec<T>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Flips each gene independently with probability `rate`.
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`.
pub fn bit_flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random_bool(rate) {
            *gene = !*gene;
        }
    }
}

// ============================================================================
// Permutations
// ============================================================================

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Order Crossover (OX) for permutations.
///
/// Produces a single child that preserves the **relative order** of
/// parent2 outside a segment inherited verbatim from parent1.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Pick two distinct cut positions `a < b`
/// 2. Copy `parent1[a..=b]` to the child at the same positions
/// 3. Fill the remaining positions, in index order, with parent2's
///    elements in their original order, skipping elements already copied
///
/// Permutations shorter than two elements are returned as a copy of
/// parent1.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (start, end) = random_cut_pair(n, rng);
    order_crossover_with_cuts(parent1, parent2, start, end)
}

/// Deterministic core of [`order_crossover`] for a given segment
/// `[start, end]`.
///
/// # Panics
/// Panics if parents have different lengths, if `start > end`, or if
/// `end` is out of bounds.
pub fn order_crossover_with_cuts(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end < n, "invalid segment [{start}, {end}] for length {n}");

    let mut child = vec![usize::MAX; n];
    let mut inherited = vec![false; n];

    // Step 1: Copy segment from parent1
    for i in start..=end {
        child[i] = parent1[i];
        inherited[parent1[i]] = true;
    }

    // Step 2: Fill the gaps left to right from parent2's order
    let mut donor = parent2.iter().copied().filter(|&city| !inherited[city]);
    for (i, slot) in child.iter_mut().enumerate() {
        if (start..=end).contains(&i) {
            continue;
        }
        if let Some(city) = donor.next() {
            *slot = city;
        }
    }

    child
}

/// Swap mutation: exchange two distinct random positions.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (i, j) = random_cut_pair(n, rng);
    perm.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick two distinct positions within `0..n`, returned in ascending order.
///
/// Requires `n >= 2`.
fn random_cut_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picks = index::sample(rng, n, 2);
    let (a, b) = (picks.index(0), picks.index(1));
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
