//! matiter CLI tool.
//!
//! Loads a Matrix Market system, runs the selected iterative methods on it and prints one report
//! per method.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use matiter::{
    LinearProblem, LinearSolver, MethodReport, RunOptions, SolveOptions, SolverContext, SolverKind,
    DEFAULT_RUN_TOL,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "matiter")]
#[command(about = "Compare classical iterative solvers on a dense SPD system")]
#[command(version)]
struct Cli {
    /// Matrix Market file holding A
    matrix: PathBuf,

    /// Matrix Market file holding the exact solution (defaults to all ones)
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Relative-residual tolerance
    #[arg(long, default_value_t = DEFAULT_RUN_TOL)]
    tol: f64,

    /// Iteration cap per method
    #[arg(long, default_value_t = matiter::utils::convergence::DEFAULT_MAX_ITERS)]
    max_iter: usize,

    /// Methods to run: jacobi, gauss-seidel, gradient-descent, cg (default: all)
    #[arg(long = "method", value_delimiter = ',')]
    methods: Vec<SolverKind>,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        let mut opts = RunOptions::new(cli.matrix);
        opts.solution = cli.solution;
        opts.tol = cli.tol;
        opts.max_iter = cli.max_iter;
        if !cli.methods.is_empty() {
            opts.methods = cli.methods;
        }
        opts
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let opts = RunOptions::from(Cli::parse());

    println!("MatIter iterative solver engine v{VERSION}\n");

    if let Err(e) = opts.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &RunOptions) -> anyhow::Result<()> {
    let problem = LinearProblem::load(&opts.matrix, opts.solution.as_ref())
        .with_context(|| format!("loading {}", opts.matrix.display()))?;
    log::info!("loaded {0}x{0} system from {1}", problem.dim(), opts.matrix.display());

    let call = SolveOptions::new().with_tol(opts.tol).with_max_iter(opts.max_iter);
    for &kind in &opts.methods {
        let solver = SolverContext::with_defaults(kind);
        let (x, info) = solver
            .solve_with(&problem.a, &problem.b, &call)
            .with_context(|| format!("{kind} solver failed"))?;
        println!("{}", MethodReport::new(kind.name(), &x, &problem.x_exact, info));
    }
    Ok(())
}
