//! Request models for the solver boundary.
//!
//! Field names and defaults are part of the wire contract. Numeric item
//! fields are signed so that negative values reach validation and are
//! reported as invalid input instead of failing deserialization.

use crate::error::{EvolveError, Result};
use crate::ga::{GaConfig, Selection};
use crate::problems::{DistanceMatrix, Item, KnapsackProblem, TspProblem};
use serde::{Deserialize, Serialize};

fn default_knapsack_pop_size() -> usize {
    10
}

fn default_knapsack_generations() -> usize {
    20
}

fn default_crossover_rate() -> f64 {
    0.8
}

fn default_knapsack_mutation_rate() -> f64 {
    0.1
}

fn default_elitism() -> bool {
    true
}

/// An item as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackItem {
    pub name: String,
    pub weight: i64,
    pub value: i64,
}

impl KnapsackItem {
    /// Creates an item; negative values are rejected when the request is solved.
    pub fn new(name: impl Into<String>, weight: i64, value: i64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }
}

/// `solve_knapsack` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackRequest {
    pub capacity: i64,
    pub items: Vec<KnapsackItem>,
    #[serde(default = "default_knapsack_pop_size")]
    pub pop_size: usize,
    #[serde(default = "default_knapsack_generations")]
    pub generations: usize,
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    #[serde(default = "default_knapsack_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "default_elitism")]
    pub elitism: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl KnapsackRequest {
    /// Creates a request with default tuning parameters.
    pub fn new(capacity: i64, items: Vec<KnapsackItem>) -> Self {
        Self {
            capacity,
            items,
            pop_size: default_knapsack_pop_size(),
            generations: default_knapsack_generations(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_knapsack_mutation_rate(),
            elitism: default_elitism(),
            seed: None,
        }
    }

    /// Validates the instance and builds the problem.
    pub fn problem(&self) -> Result<KnapsackProblem> {
        let capacity = non_negative("capacity", self.capacity)?;
        let items = self
            .items
            .iter()
            .map(|item| {
                Ok(Item {
                    name: item.name.clone(),
                    weight: non_negative(&format!("weight of '{}'", item.name), item.weight)?,
                    value: non_negative(&format!("value of '{}'", item.name), item.value)?,
                })
            })
            .collect::<Result<Vec<Item>>>()?;
        KnapsackProblem::new(capacity, items)
    }

    /// Evolution parameters for this request (not yet validated).
    pub fn config(&self) -> GaConfig {
        GaConfig {
            population_size: self.pop_size,
            generations: self.generations,
            selection: Selection::Roulette,
            elite_count: usize::from(self.elitism),
            crossover_rate: self.crossover_rate,
            mutation_rate: self.mutation_rate,
            seed: self.seed,
        }
    }
}

/// Tuning parameters shared by `solve_tsp` and the matrix-source path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TspParams {
    pub pop_size: usize,
    pub generations: usize,
    pub tournament_k: usize,
    pub pc: f64,
    pub pm: f64,
    pub elite_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TspParams {
    fn default() -> Self {
        Self {
            pop_size: 100,
            generations: 200,
            tournament_k: 5,
            pc: 0.8,
            pm: 0.2,
            elite_size: 1,
            seed: None,
        }
    }
}

impl TspParams {
    /// Evolution parameters (not yet validated).
    pub fn config(&self) -> GaConfig {
        GaConfig {
            population_size: self.pop_size,
            generations: self.generations,
            selection: Selection::Tournament(self.tournament_k),
            elite_count: self.elite_size,
            crossover_rate: self.pc,
            mutation_rate: self.pm,
            seed: self.seed,
        }
    }
}

/// `solve_tsp` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspRequest {
    pub cities: Vec<String>,
    pub dist_matrix: Vec<Vec<f64>>,
    #[serde(flatten)]
    pub params: TspParams,
}

impl TspRequest {
    /// Creates a request with default tuning parameters.
    pub fn new(cities: Vec<String>, dist_matrix: Vec<Vec<f64>>) -> Self {
        Self {
            cities,
            dist_matrix,
            params: TspParams::default(),
        }
    }

    /// Validates the instance and builds the problem.
    pub fn problem(&self) -> Result<TspProblem> {
        let matrix = DistanceMatrix::new(self.cities.clone(), self.dist_matrix.clone())?;
        Ok(TspProblem::new(matrix))
    }

    pub fn config(&self) -> GaConfig {
        self.params.config()
    }
}

fn non_negative(what: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        EvolveError::invalid_input(format!("{what} must be non-negative, got {value}"))
    })
}
