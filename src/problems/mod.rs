//! Concrete GA problems.
//!
//! Each problem supplies its chromosome codec, fitness evaluator and
//! result reporter, and plugs into the generic [`GaRunner`](crate::ga::GaRunner)
//! through [`GaProblem`](crate::ga::GaProblem).
//!
//! - [`knapsack`]: bit strings, maximize packed value (roulette selection)
//! - [`tsp`]: permutations, minimize closed-tour length (tournament selection)

pub mod knapsack;
pub mod tsp;

pub use knapsack::{
    Item, KnapsackChromosome, KnapsackGeneration, KnapsackProblem, KnapsackReport, Packing,
};
pub use tsp::{DistanceMatrix, TourChromosome, TspProblem, TspReport};
