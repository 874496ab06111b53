//! GA evolutionary loop execution.
//!
//! [`Evolution`] is the step-wise state machine
//! (`Initialized → Running → Done`); [`GaRunner`] drives it to completion:
//! evaluation → selection → crossover → mutation → replacement, for a
//! fixed number of generations.

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual, Objective};
use crate::error::{EvolveError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Lifecycle of one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Population created, nothing evaluated yet.
    Initialized,
    /// `generation` generations have completed.
    Running { generation: usize },
    /// All configured generations have completed.
    Done,
}

/// Snapshot of one generation, appended once and never modified.
#[derive(Debug, Clone)]
pub struct GenerationRecord<I: Individual> {
    /// 1-based generation index.
    pub generation: usize,

    /// Best individual of this generation's evaluated population.
    pub best: I,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: I::Fitness,

    /// Best fitness seen in this or any earlier generation.
    pub best_so_far: I::Fitness,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Best individual of the last evaluated generation.
    pub last_best: I,

    /// Total number of generations executed.
    pub generations: usize,

    /// One record per generation, in order.
    pub history: Vec<GenerationRecord<I>>,
}

impl<I: Individual> GaResult<I> {
    /// Best-so-far fitness at the end of each generation.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.best_so_far.to_f64()).collect()
    }
}

/// A single run, advanced one generation at a time.
///
/// Owns the population, the random generator and the history. Operators
/// are called with the data the run passes them and keep no state.
pub struct Evolution<'a, P: GaProblem, R: Rng> {
    problem: &'a P,
    config: &'a GaConfig,
    objective: Objective,
    rng: R,
    population: Vec<P::Individual>,
    best: Option<P::Individual>,
    history: Vec<GenerationRecord<P::Individual>>,
    state: RunState,
}

impl<'a, P: GaProblem, R: Rng> Evolution<'a, P, R> {
    /// Validates the configuration and creates the initial population.
    pub fn new(problem: &'a P, config: &'a GaConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        Ok(Self {
            problem,
            config,
            objective: problem.objective(),
            rng,
            population,
            best: None,
            history: Vec::with_capacity(config.generations),
            state: RunState::Initialized,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The current population.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Generations recorded so far.
    pub fn history(&self) -> &[GenerationRecord<P::Individual>] {
        &self.history
    }

    /// Runs one generation and returns the new state.
    ///
    /// Calling `step` on a finished run is a no-op.
    pub fn step(&mut self) -> RunState {
        let completed = match self.state {
            RunState::Done => return RunState::Done,
            RunState::Initialized => 0,
            RunState::Running { generation } => generation,
        };
        let generation = completed + 1;

        self.evaluate_population();
        self.record(generation);
        self.population = self.breed();

        self.state = if generation >= self.config.generations {
            RunState::Done
        } else {
            RunState::Running { generation }
        };
        self.state
    }

    /// Steps until done and returns the result.
    pub fn run(mut self) -> Result<GaResult<P::Individual>> {
        while self.step() != RunState::Done {}
        self.finish()
    }

    /// Packages the result of a finished run.
    ///
    /// Returns [`EvolveError::Internal`] if the run has not reached
    /// [`RunState::Done`].
    pub fn finish(self) -> Result<GaResult<P::Individual>> {
        if self.state != RunState::Done {
            return Err(EvolveError::Internal(format!(
                "run finished early in state {:?}",
                self.state
            )));
        }
        let last_best = self
            .history
            .last()
            .map(|r| r.best.clone())
            .ok_or_else(|| EvolveError::Internal("no generation was evaluated".into()))?;
        let best = self
            .best
            .ok_or_else(|| EvolveError::Internal("no best individual recorded".into()))?;

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            last_best,
            generations: self.history.len(),
            history: self.history,
        })
    }

    /// Evaluates every individual and sorts the population best-first.
    ///
    /// The sort is stable, so ties keep their population order.
    fn evaluate_population(&mut self) {
        for ind in self.population.iter_mut() {
            let f = self.problem.evaluate(ind);
            ind.set_fitness(f);
        }
        let objective = self.objective;
        self.population.sort_by(|a, b| objective.compare(a.fitness(), b.fitness()));
    }

    /// Appends the generation record and updates the best-so-far.
    fn record(&mut self, generation: usize) {
        let Some(gen_best) = self.population.first() else {
            return;
        };

        let improved = match &self.best {
            Some(best) => self.objective.is_better(gen_best.fitness(), best.fitness()),
            None => true,
        };
        if improved {
            self.best = Some(gen_best.clone());
        }
        let best_so_far = self
            .best
            .as_ref()
            .map(|b| b.fitness())
            .unwrap_or_else(|| gen_best.fitness());

        debug!(
            generation,
            best_fitness = ?gen_best.fitness(),
            best_so_far = ?best_so_far,
            "generation evaluated"
        );

        self.history.push(GenerationRecord {
            generation,
            best: gen_best.clone(),
            best_fitness: gen_best.fitness(),
            best_so_far,
        });

        self.problem.on_generation(generation, best_so_far);
    }

    /// Builds the next population: elites first, then offspring.
    fn breed(&mut self) -> Vec<P::Individual> {
        let size = self.config.population_size;
        let elite_count = self.config.elite_count.min(self.population.len());
        let brood = self.problem.offspring_count().max(1);

        let mut next_gen: Vec<P::Individual> = self.population[..elite_count].to_vec();

        while next_gen.len() < size {
            let p1 = self
                .config
                .selection
                .select(&self.population, self.objective, &mut self.rng);
            let p2 = self
                .config
                .selection
                .select(&self.population, self.objective, &mut self.rng);
            let (parent1, parent2) = (&self.population[p1], &self.population[p2]);

            let mut children = if self.rng.random_bool(self.config.crossover_rate) {
                self.problem.crossover(parent1, parent2, &mut self.rng)
            } else if brood >= 2 {
                vec![parent1.clone(), parent2.clone()]
            } else {
                vec![parent1.clone()]
            };
            if children.is_empty() {
                children.push(parent1.clone());
            }

            for mut child in children {
                if next_gen.len() >= size {
                    break;
                }
                self.problem
                    .mutate(&mut child, self.config.mutation_rate, &mut self.rng);
                next_gen.push(child);
            }
        }

        next_gen
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization with a generator seeded from
    /// [`GaConfig::seed`] (or from entropy when unset).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::drive(problem, config, rng)
    }

    /// Runs the GA optimization drawing from a caller-supplied generator.
    ///
    /// [`GaConfig::seed`] is ignored.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>> {
        Self::drive(problem, config, rng)
    }

    fn drive<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: R,
    ) -> Result<GaResult<P::Individual>> {
        info!(
            population = config.population_size,
            generations = config.generations,
            selection = ?config.selection,
            elites = config.elite_count,
            "starting evolution"
        );

        let result = Evolution::new(problem, config, rng)?.run()?;

        info!(
            generations = result.generations,
            best_fitness = ?result.best_fitness,
            "evolution finished"
        );
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
