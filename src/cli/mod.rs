//! Command-line parsing for the regression lab.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rlab", version, about = "Gradient descent and polynomial-degree sweep demos")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit y = b + w·x by gradient descent and map the loss surface around it.
    Descent(DescentArgs),
    /// Fit polynomials of increasing degree and pick the best by average loss.
    Sweep(SweepArgs),
    /// Evaluate the bowl z = (x-5)^2 + (y-5)^2 on a 10 x 10 grid.
    Contour(ContourArgs),
}

/// Terminal and SVG plot options shared by all subcommands.
#[derive(Debug, Args, Clone)]
pub struct PlotOpts {
    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

impl PlotOpts {
    pub fn enabled(&self) -> bool {
        self.plot && !self.no_plot
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DescentArgs {
    /// Learning rate (step size).
    #[arg(long, default_value_t = 0.00015)]
    pub lr: f64,

    /// Number of descent iterations.
    #[arg(long, default_value_t = 15_000)]
    pub iterations: usize,

    /// Random seed for the noise added to the demo data.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Noise amplitude (uniform on [0, noise)).
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,

    /// Starting bias.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub init_bias: f64,

    /// Starting weight.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub init_weight: f64,

    /// First bias candidate of the loss surface.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub bias_start: f64,

    /// Bias axis end (exclusive).
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub bias_stop: f64,

    /// Bias axis step.
    #[arg(long, default_value_t = 1.0)]
    pub bias_step: f64,

    /// First weight candidate of the loss surface.
    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    pub weight_start: f64,

    /// Weight axis end (exclusive).
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub weight_stop: f64,

    /// Weight axis step.
    #[arg(long, default_value_t = 0.1)]
    pub weight_step: f64,

    #[command(flatten)]
    pub plot: PlotOpts,

    /// Write the descent figure (surface + trajectory, prediction vs actual) as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export the trajectory to CSV (`iteration,b,w`).
    #[arg(long, value_name = "CSV")]
    pub export_trajectory: Option<PathBuf>,

    /// Export a JSON run summary.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Number of synthetic samples.
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Random seed for sample generation.
    #[arg(long, default_value_t = 5)]
    pub seed: u64,

    /// Noise standard deviation.
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,

    /// Training rows (taken from the head of the dataset).
    #[arg(long, default_value_t = 300)]
    pub train: usize,

    /// Test rows (taken from the tail of the dataset).
    #[arg(long, default_value_t = 200)]
    pub test: usize,

    /// Smallest polynomial degree to fit.
    #[arg(long, default_value_t = 2)]
    pub degree_min: usize,

    /// Largest polynomial degree to fit (inclusive).
    #[arg(long, default_value_t = 25)]
    pub degree_max: usize,

    /// Degrees that get their own prediction figure.
    #[arg(long, value_delimiter = ',', default_values_t = [2usize, 5, 8, 10, 20])]
    pub plot_degrees: Vec<usize>,

    #[command(flatten)]
    pub plot: PlotOpts,

    /// Directory for SVG figures (degree vs loss, one prediction chart per plot degree).
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Export the per-degree table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export a JSON run summary.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ContourArgs {
    #[command(flatten)]
    pub plot: PlotOpts,

    /// Write the contour figure as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descent_defaults() {
        let cli = Cli::parse_from(["rlab", "descent"]);
        let Command::Descent(args) = cli.command else {
            panic!("expected descent");
        };
        assert_eq!(args.lr, 0.00015);
        assert_eq!(args.iterations, 15_000);
        assert_eq!(args.weight_start, -5.0);
        assert!(args.plot.enabled());
    }

    #[test]
    fn sweep_parses_degree_list_and_no_plot() {
        let cli = Cli::parse_from(["rlab", "sweep", "--plot-degrees", "3,4", "--no-plot"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.plot_degrees, vec![3, 4]);
        assert!(!args.plot.enabled());
    }

    #[test]
    fn sweep_default_degrees() {
        let cli = Cli::parse_from(["rlab", "sweep"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.plot_degrees, vec![2, 5, 8, 10, 20]);
        assert_eq!((args.degree_min, args.degree_max), (2, 25));
    }

    #[test]
    fn negative_axis_bounds_parse() {
        let cli = Cli::parse_from(["rlab", "descent", "--weight-start", "-2.5", "--init-bias", "-1"]);
        let Command::Descent(args) = cli.command else {
            panic!("expected descent");
        };
        assert_eq!(args.weight_start, -2.5);
        assert_eq!(args.init_bias, -1.0);
    }
}
