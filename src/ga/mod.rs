//! Genetic Algorithm framework.
//!
//! A generic GA engine built on trait-based abstractions. A problem
//! plugs in by implementing [`GaProblem`], which specifies how to create,
//! evaluate, recombine and mutate individuals and in which direction
//! fitness improves.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, elitism)
//! - [`Objective`]: Per-problem optimization direction
//! - [`Evolution`]: Step-wise run state machine
//! - [`GaRunner`]: Drives a run to completion
//! - [`GaResult`]: Final result with per-generation history
//!
//! # Submodules
//!
//! - [`operators`]: Bit-string and permutation crossover/mutation operators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{Evolution, GaResult, GaRunner, GenerationRecord, RunState};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual, Objective};
