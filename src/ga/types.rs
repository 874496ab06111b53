//! Core trait definitions for the GA framework.
//!
//! The two central traits — [`Individual`] and [`GaProblem`] — define the
//! contract between the generic GA engine and the problem encodings.
//! [`Objective`] carries the optimization direction, which differs per
//! problem (knapsack maximizes value, TSP minimizes route length).

use rand::Rng;
use std::cmp::Ordering;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable. Whether a
/// larger or smaller value is better is decided by the problem's
/// [`Objective`], never by the fitness type itself.
///
/// Built-in implementations exist for `f64` and `u64`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for selection weights and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Direction of optimization.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Objective;
///
/// assert!(Objective::Maximize.is_better(90u64, 40u64));
/// assert!(Objective::Minimize.is_better(10.0, 12.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Lower fitness is better (route length, cost).
    #[default]
    Minimize,
    /// Higher fitness is better (packed value).
    Maximize,
}

impl Objective {
    /// Orders two fitness values so that the better one compares as `Less`.
    ///
    /// Sorting a population with this comparator puts the best first.
    /// Incomparable values (NaN) are treated as equal.
    pub fn compare<F: Fitness>(self, a: F, b: F) -> Ordering {
        let ord = match self {
            Objective::Minimize => a.partial_cmp(&b),
            Objective::Maximize => b.partial_cmp(&a),
        };
        ord.unwrap_or(Ordering::Equal)
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better<F: Fitness>(self, a: F, b: F) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The GA framework calls
/// [`GaProblem::evaluate`] to compute fitness, then stores it via
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    ///
    /// Called by the GA framework after evaluation.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// This is the capability set the generic orchestrator needs:
///
/// 1. **Direction**: [`objective`](GaProblem::objective)
/// 2. **Initialization**: How to create random individuals
/// 3. **Evaluation**: How to compute fitness
/// 4. **Crossover**: How to recombine two parents
/// 5. **Mutation**: How to perturb an individual
///
/// Decoding a chromosome into a domain answer is left to the concrete
/// problem type, since its output differs per encoding.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` so independent runs over the same
/// problem instance can be dispatched from different threads.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Direction of optimization. Defaults to minimization.
    fn objective(&self) -> Objective {
        Objective::Minimize
    }

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Number of offspring one pairing produces (1 or 2).
    ///
    /// When crossover is skipped the runner copies this many parents
    /// instead, so it must agree with what [`crossover`](GaProblem::crossover)
    /// returns.
    fn offspring_count(&self) -> usize {
        1
    }

    /// Produces offspring by recombining two parents.
    ///
    /// Returns a `Vec` of 1 or 2 children. The framework handles sizing
    /// and drops surplus children once the population is full.
    ///
    /// The default implementation clones parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place.
    ///
    /// `rate` is the configured mutation rate. Whether it applies per
    /// gene or per individual is up to the encoding. The default
    /// implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Called at the end of each generation with the best-so-far fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_prefers_lower() {
        assert_eq!(Objective::Minimize.compare(1.0, 2.0), Ordering::Less);
        assert!(Objective::Minimize.is_better(1.0, 2.0));
        assert!(!Objective::Minimize.is_better(2.0, 2.0));
    }

    #[test]
    fn test_maximize_prefers_higher() {
        assert_eq!(Objective::Maximize.compare(90u64, 40u64), Ordering::Less);
        assert!(Objective::Maximize.is_better(90u64, 40u64));
        assert!(!Objective::Maximize.is_better(40u64, 90u64));
    }

    #[test]
    fn test_nan_is_not_better() {
        assert!(!Objective::Minimize.is_better(f64::NAN, 1.0));
        assert_eq!(Objective::Minimize.compare(f64::NAN, 1.0), Ordering::Equal);
    }

    #[test]
    fn test_sort_puts_best_first() {
        let mut values = vec![30u64, 90, 0, 40];
        values.sort_by(|a, b| Objective::Maximize.compare(*a, *b));
        assert_eq!(values, vec![90, 40, 30, 0]);

        let mut values = vec![3.0, 1.0, 2.0];
        values.sort_by(|a, b| Objective::Minimize.compare(*a, *b));
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
