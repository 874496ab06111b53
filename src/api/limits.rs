//! Resource limits enforced before a run starts.
//!
//! A run costs roughly `population × generations × genes` operator steps
//! and cannot be interrupted once started, so oversized requests are
//! rejected up front.

use crate::error::{EvolveError, Result};
use crate::ga::GaConfig;

/// Upper bounds on caller-supplied run sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Largest accepted `population_size`.
    pub max_population: usize,

    /// Largest accepted `generations`.
    pub max_generations: usize,

    /// Largest accepted `population_size × generations × genes`.
    pub max_work: u64,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_population: 10_000,
            max_generations: 10_000,
            max_work: 50_000_000,
        }
    }
}

impl RunLimits {
    /// No limits at all. Intended for trusted, in-process callers.
    pub fn unbounded() -> Self {
        Self {
            max_population: usize::MAX,
            max_generations: usize::MAX,
            max_work: u64::MAX,
        }
    }

    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_max_work(mut self, work: u64) -> Self {
        self.max_work = work;
        self
    }

    /// Checks a configuration against the limits for a chromosome of
    /// `genes` genes.
    pub fn check(&self, config: &GaConfig, genes: usize) -> Result<()> {
        if config.population_size > self.max_population {
            return Err(EvolveError::LimitExceeded(format!(
                "pop_size {} exceeds the maximum of {}",
                config.population_size, self.max_population
            )));
        }
        if config.generations > self.max_generations {
            return Err(EvolveError::LimitExceeded(format!(
                "generations {} exceeds the maximum of {}",
                config.generations, self.max_generations
            )));
        }
        let work = (config.population_size as u64)
            .saturating_mul(config.generations as u64)
            .saturating_mul(genes as u64);
        if work > self.max_work {
            return Err(EvolveError::LimitExceeded(format!(
                "pop_size × generations × genes = {work} exceeds the maximum of {}",
                self.max_work
            )));
        }
        Ok(())
    }
}
