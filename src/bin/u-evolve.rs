//! u-evolve command-line front end.
//!
//! Reads a solver request, runs it and prints the JSON response.
//!
//! Usage:
//!   u-evolve knapsack request.json
//!   u-evolve tsp request.json
//!   u-evolve tsp-matrix matrix.csv --generations 500 --seed 7
//!
//! A request path of `-` reads from stdin. Logs go to stderr; set
//! `RUST_LOG` or pass `-v`/`-vv` to see them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use u_evolve::api::{KnapsackRequest, RunLimits, Solver, TspParams, TspRequest};

#[derive(Parser)]
#[command(name = "u-evolve", version, about = "Genetic-algorithm knapsack and TSP solvers")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print the JSON response
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable the population/generation/work limits
    #[arg(long, global = true)]
    unbounded: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a knapsack request (JSON)
    Knapsack {
        /// Request file, or `-` for stdin
        request: PathBuf,
    },
    /// Solve a TSP request (JSON)
    Tsp {
        /// Request file, or `-` for stdin
        request: PathBuf,
    },
    /// Solve a TSP given as a labelled CSV distance matrix
    TspMatrix {
        /// Matrix file, or `-` for stdin
        matrix: PathBuf,

        #[command(flatten)]
        params: TspArgs,
    },
}

#[derive(Args)]
struct TspArgs {
    #[arg(long, default_value_t = 100)]
    pop_size: usize,
    #[arg(long, default_value_t = 200)]
    generations: usize,
    #[arg(long, default_value_t = 5)]
    tournament_k: usize,
    /// Crossover probability
    #[arg(long, default_value_t = 0.8)]
    pc: f64,
    /// Swap-mutation probability
    #[arg(long, default_value_t = 0.2)]
    pm: f64,
    #[arg(long, default_value_t = 1)]
    elite_size: usize,
    #[arg(long)]
    seed: Option<u64>,
}

impl From<TspArgs> for TspParams {
    fn from(args: TspArgs) -> Self {
        Self {
            pop_size: args.pop_size,
            generations: args.generations,
            tournament_k: args.tournament_k,
            pc: args.pc,
            pm: args.pm,
            elite_size: args.elite_size,
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let solver = if cli.unbounded {
        Solver::new(RunLimits::unbounded())
    } else {
        Solver::default()
    };

    match cli.command {
        Commands::Knapsack { request } => {
            let request: KnapsackRequest = serde_json::from_reader(open(&request)?)
                .context("failed to parse knapsack request")?;
            let report = solver.solve_knapsack(&request)?;
            print_json(&report, cli.pretty)
        }
        Commands::Tsp { request } => {
            let request: TspRequest = serde_json::from_reader(open(&request)?)
                .context("failed to parse tsp request")?;
            let report = solver.solve_tsp(&request)?;
            print_json(&report, cli.pretty)
        }
        Commands::TspMatrix { matrix, params } => {
            let params: TspParams = params.into();
            let report = if matrix == Path::new("-") {
                solver.solve_tsp_from_matrix_source(io::stdin(), &params)?
            } else {
                solver.solve_tsp_from_matrix_file(&matrix, &params)?
            };
            print_json(&report, cli.pretty)
        }
    }
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(Box::new(io::BufReader::new(file)))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
