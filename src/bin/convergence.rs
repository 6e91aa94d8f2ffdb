//! Convergence study command-line driver
//!
//! Runs the FTCS solver across a list of grid resolutions, prints the
//! (dx, RMS error) table and the fitted convergence order to stdout, and
//! optionally writes CSV / plot artifacts.
//!
//! ```bash
//! convergence --grids 20,40,80,160,320 --step-scale 2
//! convergence --csv convergence.csv --plot convergence.png
//! RUST_LOG=warn convergence --grids 100,200 --fixed-steps 500
//! ```
//!
//! Exits non-zero when fewer than two finite error records were obtained
//! (the study is inconclusive) or when a parameter is rejected.

use clap::Parser;
use std::process::ExitCode;

use rdiff_rs::convergence::{run_convergence_study, StepRule};
use rdiff_rs::output::export::export_convergence_csv;
use rdiff_rs::output::visualization::{plot_convergence, plot_profile_comparison};
use rdiff_rs::physics::{analytic_concentration, TissueParams, DEFAULT_SERIES_TERMS};
use rdiff_rs::solver::FtcsSolver;

/// Convergence study for the 1-D diffusion-decay FTCS solver
#[derive(Parser)]
#[command(name = "convergence")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FTCS convergence study against the analytical solution", long_about = None)]
struct Cli {
    /// Comma-separated grid resolutions (interval counts), increasing
    #[arg(long, value_delimiter = ',', default_value = "20,40,80,160,320")]
    grids: Vec<usize>,

    /// Quadratic step scaling: steps = scale * n^2
    #[arg(long, default_value_t = 2)]
    step_scale: usize,

    /// Use the same step count for every resolution instead of the
    /// quadratic rule (fine grids may go unstable and truncate the study)
    #[arg(long, conflicts_with = "step_scale")]
    fixed_steps: Option<usize>,

    /// Truncation order of the analytical Fourier series
    #[arg(long, default_value_t = DEFAULT_SERIES_TERMS)]
    series_terms: usize,

    /// Domain length L [m]
    #[arg(long, default_value_t = 0.005)]
    length: f64,

    /// Diffusion coefficient D [m^2/s]
    #[arg(long, default_value_t = 1e-10)]
    diffusivity: f64,

    /// First-order decay rate k [1/s]
    #[arg(long, default_value_t = 2e-4)]
    decay_rate: f64,

    /// Source concentration c0
    #[arg(long, default_value_t = 1.0)]
    source_concentration: f64,

    /// Total simulated time T [s]
    #[arg(long, default_value_t = 7200.0)]
    total_time: f64,

    /// Write the convergence table to this CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Write the log-log convergence plot to this file (.png or .svg)
    #[arg(long)]
    plot: Option<String>,

    /// Also write a profile comparison plot for the coarsest resolution
    #[arg(long)]
    profile_plot: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let params = match TissueParams::new(
        cli.length,
        cli.diffusivity,
        cli.decay_rate,
        cli.source_concentration,
        cli.total_time,
    ) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let rule = match cli.fixed_steps {
        Some(steps) => StepRule::Fixed { steps },
        None => StepRule::quadratic(cli.step_scale),
    };

    let study = match run_convergence_study(&params, &cli.grids, &rule, cli.series_terms) {
        Ok(study) => study,
        Err(err) => {
            // Covers rejected invocations and StudyError::Inconclusive alike.
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Convergence table
    println!("{:>7}  {:>12}  {:>12}", "Nodes", "dx (m)", "RMS error");
    for record in &study.records {
        println!(
            "{:>7}  {:>12.4e}  {:>12.4e}",
            record.nodes, record.dx, record.rms_error
        );
    }
    println!();
    println!(
        "Fitted convergence order: {:.3} (intercept {:.3})",
        study.fit.slope, study.fit.intercept
    );
    if let Some(nodes) = study.truncated_at {
        println!("Study truncated at n = {} (non-finite error)", nodes);
    }

    if let Some(path) = &cli.csv {
        if let Err(err) = export_convergence_csv(&study, path, None) {
            eprintln!("error: CSV export failed: {}", err);
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path);
    }

    if let Some(path) = &cli.plot {
        if let Err(err) = plot_convergence(&study, path, None) {
            eprintln!("error: convergence plot failed: {}", err);
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path);
    }

    if let Some(path) = &cli.profile_plot {
        if let Err(err) = write_profile_plot(&params, &cli, path) {
            eprintln!("error: profile plot failed: {}", err);
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path);
    }

    ExitCode::SUCCESS
}

/// Re-run the coarsest resolution and plot it against the reference.
fn write_profile_plot(
    params: &TissueParams,
    cli: &Cli,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let nodes = *cli.grids.first().ok_or("no resolutions given")?;
    let rule = match cli.fixed_steps {
        Some(steps) => StepRule::Fixed { steps },
        None => StepRule::quadratic(cli.step_scale),
    };

    let solution = FtcsSolver::new().solve(params, nodes, rule.steps_for(params, nodes))?;
    let analytical = analytic_concentration(
        &solution.grid,
        params.total_time,
        params,
        cli.series_terms,
    );

    plot_profile_comparison(&solution.grid, &solution.concentration, &analytical, path, None)
}
