//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Both strategies respect the problem's [`Objective`].
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Fitness, Individual, Objective};
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Best of 5 distinct members
/// let sel = Selection::Tournament(5);
///
/// // Fitness-proportionate
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: sample `k` distinct individuals, select the
    /// best.
    ///
    /// `k` must not exceed the population size.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// When maximizing, the weight of an individual is its fitness. When
    /// minimizing, weights are inverted (`max - f + ε`) so the lowest
    /// fitness gets the largest share. A population whose weights sum to
    /// zero falls back to a uniform pick.
    ///
    /// Of the bundled problems only knapsack (maximizing) uses roulette; the
    /// inverted weights are there for minimizing [`GaProblem`] implementations
    /// outside this crate.
    ///
    /// [`GaProblem`]: super::GaProblem
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(5)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(
        &self,
        population: &[I],
        objective: Objective,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, objective, rng),
            Selection::Roulette => roulette(population, objective, rng),
        }
    }
}

/// Tournament selection: sample k distinct individuals, return the best.
fn tournament<I: Individual, R: Rng>(
    population: &[I],
    k: usize,
    objective: Objective,
    rng: &mut R,
) -> usize {
    let n = population.len();
    let k = k.clamp(1, n);

    let mut contenders = index::sample(rng, n, k).into_iter();
    // k >= 1, so the sample is never empty
    let mut best_idx = contenders.next().unwrap_or(0);
    for idx in contenders {
        if objective.is_better(population[idx].fitness(), population[best_idx].fitness()) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection.
fn roulette<I: Individual, R: Rng>(population: &[I], objective: Objective, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let weights = roulette_weights(population, objective);
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative >= threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

fn roulette_weights<I: Individual>(population: &[I], objective: Objective) -> Vec<f64> {
    let fitnesses = population.iter().map(|ind| ind.fitness().to_f64());

    match objective {
        Objective::Maximize => fitnesses
            .map(|f| if f.is_finite() && f > 0.0 { f } else { 0.0 })
            .collect(),
        Objective::Minimize => {
            let fitnesses: Vec<f64> = fitnesses.collect();
            let max_fitness = fitnesses
                .iter()
                .copied()
                .filter(|f| f.is_finite())
                .fold(f64::NEG_INFINITY, f64::max);
            let epsilon = 1e-10;
            fitnesses
                .iter()
                .map(|&f| {
                    if f.is_finite() {
                        (max_fitness - f).max(0.0) + epsilon
                    } else {
                        0.0
                    }
                })
                .collect()
        }
    }
}
