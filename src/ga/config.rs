//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! It is immutable for the duration of a run.

use super::selection::Selection;
use crate::error::{EvolveError, Result};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, selection strategy, operator rates,
/// elitism and the fixed generation count.
///
/// # Defaults
///
/// The default matches the TSP solver's defaults:
///
/// ```
/// use u_evolve::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 200);
/// assert_eq!(config.selection, Selection::Tournament(5));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{GaConfig, Selection};
///
/// let config = GaConfig::knapsack()
///     .with_population_size(40)
///     .with_generations(100)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert_eq!(config.selection, Selection::Roulette);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Number of generations to run. This is the only termination
    /// condition.
    pub generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of top individuals copied unchanged into the next
    /// generation. Zero disables elitism.
    pub elite_count: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the parents are copied.
    pub crossover_rate: f64,

    /// Mutation probability (0.0–1.0), interpreted by the problem
    /// encoding (per gene for bit strings, per individual for tours).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::tsp()
    }
}

impl GaConfig {
    /// Preset for the knapsack solver.
    ///
    /// - Population: 10, Generations: 20
    /// - Roulette selection, single elite
    /// - Crossover 0.8, per-gene mutation 0.1
    pub fn knapsack() -> Self {
        Self {
            population_size: 10,
            generations: 20,
            selection: Selection::Roulette,
            elite_count: 1,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            seed: None,
        }
    }

    /// Preset for the TSP solver.
    ///
    /// - Population: 100, Generations: 200
    /// - Tournament selection (k = 5), single elite
    /// - Crossover 0.8, per-individual swap mutation 0.2
    pub fn tsp() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            selection: Selection::Tournament(5),
            elite_count: 1,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            seed: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Enables (one elite) or disables elitism.
    pub fn with_elitism(self, enabled: bool) -> Self {
        self.with_elite_count(usize::from(enabled))
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`EvolveError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolveError::invalid_config(
                "population_size must be at least 1",
            ));
        }
        if self.generations == 0 {
            return Err(EvolveError::invalid_config("generations must be at least 1"));
        }
        if self.elite_count > self.population_size {
            return Err(EvolveError::invalid_config(format!(
                "elite_count ({}) must not exceed population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if let Selection::Tournament(k) = self.selection {
            if k == 0 {
                return Err(EvolveError::invalid_config(
                    "tournament size must be at least 1",
                ));
            }
            if k > self.population_size {
                return Err(EvolveError::invalid_config(format!(
                    "tournament size ({k}) must not exceed population_size ({})",
                    self.population_size
                )));
            }
        }
        Ok(())
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(EvolveError::invalid_config(format!(
            "{name} must be within [0, 1], got {rate}"
        )))
    }
}
