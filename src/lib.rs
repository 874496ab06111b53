//! Genetic-algorithm solvers behind a request/response boundary.
//!
//! Two problems share one generic evolutionary engine:
//!
//! - **Knapsack**: bit-string chromosomes, roulette selection,
//!   single-point crossover, per-gene bit-flip mutation, maximize value.
//! - **Traveling salesman**: permutation chromosomes, tournament
//!   selection, order crossover, swap mutation, minimize tour length.
//!
//! # Architecture
//!
//! - [`ga`]: the generic engine — [`GaProblem`](ga::GaProblem) capability
//!   trait, selection, operators and the generation loop.
//! - [`problems`]: the knapsack and TSP encodings, evaluators and
//!   result reporters.
//! - [`api`]: request models, defaults, validation, limits and panic
//!   containment.
//! - [`ingest`]: CSV distance-matrix parsing for the matrix-upload path.
//!
//! Every run is synchronous, single-threaded and owns its random
//! generator, so independent runs can execute concurrently without
//! coordination.

pub mod api;
pub mod error;
pub mod ga;
pub mod ingest;
pub mod problems;

pub use error::{EvolveError, Result};
