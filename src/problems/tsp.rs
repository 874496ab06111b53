//! Traveling-salesman tours as a permutation GA problem.
//!
//! A chromosome is a permutation of city indices. Its fitness is the
//! closed-tour length, including the edge from the last city back to the
//! first; shorter is better.

use crate::error::{EvolveError, Result};
use crate::ga::{operators, GaProblem, GaResult, Individual, Objective};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named cities with a square travel-cost matrix.
///
/// `cost(i, j)` is the cost from city `i` to city `j`; the matrix need not
/// be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    cities: Vec<String>,
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Creates a matrix.
    ///
    /// Returns [`EvolveError::InvalidInput`] unless there is at least one
    /// city, names are unique, the matrix is `n × n` for `n` cities,
    /// every entry is finite and non-negative, and `n × max_entry` is finite
    /// so that no tour length can overflow.
    pub fn new(cities: Vec<String>, distances: Vec<Vec<f64>>) -> Result<Self> {
        let n = cities.len();
        if n == 0 {
            return Err(EvolveError::invalid_input("cities must not be empty"));
        }
        let mut seen = HashSet::with_capacity(n);
        if let Some(dup) = cities.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(EvolveError::invalid_input(format!(
                "duplicate city name '{dup}'"
            )));
        }
        if distances.len() != n {
            return Err(EvolveError::invalid_input(format!(
                "dist_matrix has {} rows but there are {n} cities",
                distances.len()
            )));
        }
        for (i, row) in distances.iter().enumerate() {
            if row.len() != n {
                return Err(EvolveError::invalid_input(format!(
                    "dist_matrix row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            if let Some((j, d)) = row
                .iter()
                .enumerate()
                .find(|(_, d)| !(d.is_finite() && **d >= 0.0))
            {
                return Err(EvolveError::invalid_input(format!(
                    "dist_matrix[{i}][{j}] = {d} is not a finite non-negative distance"
                )));
            }
        }
        let max_entry = distances.iter().flatten().copied().fold(0.0, f64::max);
        if !(max_entry * n as f64).is_finite() {
            return Err(EvolveError::invalid_input(format!(
                "a tour over {n} cities with distances up to {max_entry} overflows"
            )));
        }
        Ok(Self { cities, distances })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always false for a constructed matrix.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City names in index order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Cost of travelling from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }
}

/// Permutation chromosome over city indices.
#[derive(Debug, Clone)]
pub struct TourChromosome {
    /// City indices in visiting order.
    pub order: Vec<usize>,
    fitness: f64,
}

impl TourChromosome {
    /// Wraps a tour in an unevaluated chromosome.
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            fitness: f64::INFINITY,
        }
    }
}

impl Individual for TourChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// A TSP instance.
#[derive(Debug, Clone)]
pub struct TspProblem {
    matrix: DistanceMatrix,
}

impl TspProblem {
    /// Creates an instance over a validated matrix.
    pub fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Closed-tour length: `Σ cost(order[i], order[(i + 1) % n])`.
    pub fn route_cost(&self, order: &[usize]) -> f64 {
        let n = order.len();
        (0..n)
            .map(|i| self.matrix.cost(order[i], order[(i + 1) % n]))
            .sum()
    }

    /// City names in tour order.
    pub fn decode(&self, order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| self.matrix.cities[i].clone())
            .collect()
    }

    /// Packages a finished run for the caller.
    ///
    /// Reports the best tour found over the whole run and the best-so-far
    /// distance after each generation.
    pub fn report(&self, result: &GaResult<TourChromosome>) -> TspReport {
        TspReport {
            best_distance: result.best_fitness,
            best_route: self.decode(&result.best.order),
            history: result.fitness_history(),
        }
    }
}

impl GaProblem for TspProblem {
    type Individual = TourChromosome;

    fn objective(&self) -> Objective {
        Objective::Minimize
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TourChromosome {
        TourChromosome::new(operators::random_permutation(self.matrix.len(), rng))
    }

    fn evaluate(&self, individual: &TourChromosome) -> f64 {
        self.route_cost(&individual.order)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TourChromosome,
        parent2: &TourChromosome,
        rng: &mut R,
    ) -> Vec<TourChromosome> {
        vec![TourChromosome::new(operators::order_crossover(
            &parent1.order,
            &parent2.order,
            rng,
        ))]
    }

    /// Swaps two cities with probability `rate`.
    fn mutate<R: Rng>(&self, individual: &mut TourChromosome, rate: f64, rng: &mut R) {
        if rng.random_bool(rate) {
            operators::swap_mutation(&mut individual.order, rng);
        }
    }
}

/// TSP solver response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspReport {
    /// Shortest closed-tour length found.
    pub best_distance: f64,
    /// City names of that tour.
    pub best_route: Vec<String>,
    /// Best-so-far distance after each generation.
    pub history: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Evolution, GaConfig, GaRunner};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("C{i}")).collect()
    }

    /// Cities on a line at positions 0, 1, 2, ...: optimal tour is 2 (n - 1).
    fn line(n: usize) -> DistanceMatrix {
        let distances = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        DistanceMatrix::new(names(n), distances).unwrap()
    }

    #[test]
    fn test_route_cost_includes_wrap_edge() {
        let matrix = DistanceMatrix::new(
            names(3),
            vec![
                vec![0.0, 1.0, 100.0],
                vec![1.0, 0.0, 2.0],
                vec![7.0, 2.0, 0.0],
            ],
        )
        .unwrap();
        let problem = TspProblem::new(matrix);
        // 0→1 (1) + 1→2 (2) + 2→0 (7)
        assert!((problem.route_cost(&[0, 1, 2]) - 10.0).abs() < 1e-12);
        // 0→2 (100) + 2→1 (2) + 1→0 (1): asymmetric matrix
        assert!((problem.route_cost(&[0, 2, 1]) - 103.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_city_tour() {
        let matrix = DistanceMatrix::new(names(1), vec![vec![0.0]]).unwrap();
        let problem = TspProblem::new(matrix);
        assert_eq!(problem.route_cost(&[0]), 0.0);

        let config = GaConfig::tsp()
            .with_population_size(3)
            .with_tournament_size(2)
            .with_generations(2)
            .with_seed(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(problem.report(&result).best_route, vec!["C0"]);
    }

    #[test]
    fn test_decode_maps_names() {
        let problem = TspProblem::new(line(3));
        assert_eq!(problem.decode(&[2, 0, 1]), vec!["C2", "C0", "C1"]);
    }

    #[test]
    fn test_matrix_validation() {
        assert!(DistanceMatrix::new(vec![], vec![]).is_err());

        let err = DistanceMatrix::new(names(2), vec![vec![0.0, 1.0]]).unwrap_err();
        assert!(err.to_string().contains("1 rows but there are 2 cities"));

        let err = DistanceMatrix::new(names(2), vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 entries"));

        let err =
            DistanceMatrix::new(names(2), vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));

        let err = DistanceMatrix::new(
            vec!["A".into(), "A".into()],
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate city name 'A'"));
    }

    #[test]
    fn test_rejects_matrix_whose_tours_overflow() {
        let err = DistanceMatrix::new(names(2), vec![vec![0.0, 1e308], vec![1e308, 0.0]])
            .unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
        assert!(err.to_string().contains("overflows"));

        let matrix =
            DistanceMatrix::new(names(2), vec![vec![0.0, 8e307], vec![8e307, 0.0]]).unwrap();
        let cost = TspProblem::new(matrix).route_cost(&[0, 1]);
        assert!(cost.is_finite());
        assert_eq!(cost, 1.6e308);
    }

    #[test]
    fn test_tours_are_copied_without_crossover_or_mutation() {
        let problem = TspProblem::new(line(6));
        let config = GaConfig::tsp()
            .with_population_size(12)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut evolution =
            Evolution::new(&problem, &config, StdRng::seed_from_u64(3)).unwrap();

        let previous: Vec<Vec<usize>> =
            evolution.population().iter().map(|t| t.order.clone()).collect();
        evolution.step();
        for tour in evolution.population() {
            assert!(previous.contains(&tour.order), "{:?}", tour.order);
        }
    }

    #[test]
    fn test_two_cities_distance() {
        let matrix =
            DistanceMatrix::new(names(2), vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap();
        let problem = TspProblem::new(matrix);
        for generations in [1, 5, 50] {
            let config = GaConfig::tsp()
                .with_population_size(10)
                .with_generations(generations)
                .with_seed(generations as u64);
            let result = GaRunner::run(&problem, &config).unwrap();
            assert_eq!(problem.report(&result).best_distance, 10.0);
        }
    }

    #[test]
    fn test_finds_optimal_line_tour() {
        let problem = TspProblem::new(line(7));
        let config = GaConfig::tsp()
            .with_population_size(60)
            .with_generations(150)
            .with_seed(5);
        let result = GaRunner::run(&problem, &config).unwrap();
        let report = problem.report(&result);

        assert!((report.best_distance - 12.0).abs() < 1e-9, "got {}", report.best_distance);
        assert_eq!(report.history.len(), 150);
        for window in report.history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        let unique: HashSet<&String> = report.best_route.iter().collect();
        assert_eq!(unique.len(), 7);
    }
}
