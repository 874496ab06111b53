//! Request/response boundary for the solvers.
//!
//! Requests are validated completely (instance, parameters, resource
//! limits) before any generation runs. Engine faults never escape as
//! panics: a panic inside a run is caught here and reported as
//! [`EvolveError::Internal`].
//!
//! ```
//! use u_evolve::api::{self, KnapsackItem, KnapsackRequest};
//!
//! let mut request = KnapsackRequest::new(
//!     10,
//!     vec![
//!         KnapsackItem::new("A", 5, 10),
//!         KnapsackItem::new("B", 4, 40),
//!         KnapsackItem::new("C", 6, 30),
//!         KnapsackItem::new("D", 3, 50),
//!     ],
//! );
//! request.seed = Some(7);
//! let report = api::solve_knapsack(&request).unwrap();
//! assert!(report.final_weight <= 10);
//! ```

mod limits;
mod models;

pub use crate::problems::{KnapsackGeneration, KnapsackReport, TspReport};
pub use limits::RunLimits;
pub use models::{KnapsackItem, KnapsackRequest, TspParams, TspRequest};

use crate::error::{EvolveError, Result};
use crate::ga::GaRunner;
use crate::ingest::{self, MatrixSource};
use std::any::Any;
use std::io::Read;
use std::path::Path;
use std::panic::{self, AssertUnwindSafe};
use tracing::{info, warn};

/// Solver facade holding the boundary policy.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    limits: RunLimits,
}

impl Solver {
    /// Creates a solver enforcing `limits`.
    pub fn new(limits: RunLimits) -> Self {
        Self { limits }
    }

    /// Limits applied to every request.
    pub fn limits(&self) -> &RunLimits {
        &self.limits
    }

    /// Solves a knapsack request.
    pub fn solve_knapsack(&self, request: &KnapsackRequest) -> Result<KnapsackReport> {
        let prepared = request.problem().and_then(|problem| {
            let config = request.config();
            config.validate()?;
            self.limits.check(&config, problem.items().len())?;
            Ok((problem, config))
        });
        let (problem, config) = rejected("knapsack", prepared)?;

        info!(
            items = problem.items().len(),
            capacity = problem.capacity(),
            "solving knapsack"
        );
        contain("knapsack", || {
            let result = GaRunner::run(&problem, &config)?;
            Ok(problem.report(&result))
        })
    }

    /// Solves a TSP request.
    pub fn solve_tsp(&self, request: &TspRequest) -> Result<TspReport> {
        let prepared = request.problem().and_then(|problem| {
            let config = request.config();
            config.validate()?;
            self.limits.check(&config, problem.matrix().len())?;
            Ok((problem, config))
        });
        let (problem, config) = rejected("tsp", prepared)?;

        info!(cities = problem.matrix().len(), "solving tsp");
        contain("tsp", || {
            let result = GaRunner::run(&problem, &config)?;
            Ok(problem.report(&result))
        })
    }

    /// Parses a CSV distance matrix and solves it as a TSP request.
    ///
    /// A malformed source is reported as [`EvolveError::Ingestion`].
    pub fn solve_tsp_from_matrix_source<R: Read>(
        &self,
        source: R,
        params: &TspParams,
    ) -> Result<TspReport> {
        let parsed = rejected("tsp", ingest::parse_distance_matrix(source))?;
        self.solve_parsed_matrix(parsed, params)
    }

    /// Reads a CSV distance matrix file and solves it as a TSP request.
    ///
    /// An unreadable or malformed file is reported as
    /// [`EvolveError::Ingestion`].
    pub fn solve_tsp_from_matrix_file(
        &self,
        path: impl AsRef<Path>,
        params: &TspParams,
    ) -> Result<TspReport> {
        let parsed = rejected("tsp", ingest::read_distance_matrix(path))?;
        self.solve_parsed_matrix(parsed, params)
    }

    fn solve_parsed_matrix(&self, parsed: MatrixSource, params: &TspParams) -> Result<TspReport> {
        let request = TspRequest {
            cities: parsed.cities,
            dist_matrix: parsed.dist_matrix,
            params: params.clone(),
        };
        self.solve_tsp(&request)
    }
}

/// Solves a knapsack request with default limits.
pub fn solve_knapsack(request: &KnapsackRequest) -> Result<KnapsackReport> {
    Solver::default().solve_knapsack(request)
}

/// Solves a TSP request with default limits.
pub fn solve_tsp(request: &TspRequest) -> Result<TspReport> {
    Solver::default().solve_tsp(request)
}

/// Parses a CSV distance matrix and solves it with default limits.
pub fn solve_tsp_from_matrix_source<R: Read>(source: R, params: &TspParams) -> Result<TspReport> {
    Solver::default().solve_tsp_from_matrix_source(source, params)
}

fn rejected<T>(problem: &str, outcome: Result<T>) -> Result<T> {
    outcome.inspect_err(|err| warn!(problem, error = %err, "request rejected"))
}

/// Runs `f`, turning a panic into [`EvolveError::Internal`].
fn contain<T>(problem: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(problem, %message, "solver panicked");
            Err(EvolveError::Internal(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "solver panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_converts_panics() {
        let err = contain::<()>("test", || panic!("boom")).unwrap_err();
        assert!(matches!(err, EvolveError::Internal(ref m) if m == "boom"));

        let code = 7;
        let err = contain::<()>("test", || panic!("code {code}")).unwrap_err();
        assert_eq!(err.to_string(), "internal error: code 7");
    }

    #[test]
    fn test_contain_passes_results_through() {
        assert_eq!(contain("test", || Ok(3)).unwrap(), 3);
        let err = contain::<()>("test", || Err(EvolveError::invalid_input("x"))).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
    }

    #[test]
    fn test_solves_matrix_file() {
        let path =
            std::env::temp_dir().join(format!("u-evolve-matrix-{}.csv", std::process::id()));
        std::fs::write(&path, "city,A,B,C\nA,0,1,1\nB,1,0,1\nC,1,1,0\n").unwrap();
        let params = TspParams {
            pop_size: 6,
            generations: 3,
            seed: Some(1),
            ..TspParams::default()
        };
        let report = Solver::default().solve_tsp_from_matrix_file(&path, &params);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report.unwrap().best_distance, 3.0);

        let err = Solver::default()
            .solve_tsp_from_matrix_file(path.with_extension("missing"), &params)
            .unwrap_err();
        assert!(matches!(err, EvolveError::Ingestion(_)));
    }

    #[test]
    fn test_limits_are_enforced() {
        let solver = Solver::new(RunLimits::default().with_max_population(5));
        let request = TspRequest::new(vec!["A".into()], vec![vec![0.0]]);
        let err = solver.solve_tsp(&request).unwrap_err();
        assert!(matches!(err, EvolveError::LimitExceeded(_)));
    }
}
