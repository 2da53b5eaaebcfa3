//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds validated run configs
//! - runs the descent / sweep / contour pipelines
//! - prints reports and ASCII plots
//! - writes optional SVG figures and exports

use clap::Parser;
use log::info;

use crate::cli::{Command, ContourArgs, DescentArgs, SweepArgs};
use crate::domain::{
    AxisSpec, DescentConfig, LinearDataConfig, ParamPair, PolynomialDataConfig, SurfaceConfig,
    SweepConfig,
};
use crate::error::AppError;
use crate::io::{DescentSummary, SweepSummary};

pub mod pipeline;

use pipeline::{DescentRunConfig, SweepRunConfig};

/// Entry point for the `rlab` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Descent(args) => handle_descent(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Contour(args) => handle_contour(args),
    }
}

fn handle_descent(args: DescentArgs) -> Result<(), AppError> {
    let config = descent_config_from_args(&args);
    let run = pipeline::run_descent_experiment(&config)?;

    println!("{}", crate::report::format_descent_summary(&run));

    if args.plot.enabled() {
        let (w, h) = (args.plot.width, args.plot.height);
        println!("Loss surface (x = b, y = w):");
        println!(
            "{}",
            crate::plot::render_field(run.surface.field(), Some(&run.trajectory), w, h)
        );
        println!("Prediction vs actual:");
        println!(
            "{}",
            crate::plot::render_scatter(&run.dataset.xs(), &run.dataset.ys(), &run.predictions, w, h)
        );
    }

    if let Some(path) = &args.svg {
        crate::plot::write_descent_svg(path, &run, svg_size(&args.plot))?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.export_trajectory {
        crate::io::write_trajectory_csv(path, &run.trajectory)?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::write_summary_json(path, &DescentSummary::from_run(&run))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args);
    let run = pipeline::run_sweep_experiment(&config)?;

    println!("{}", crate::report::format_sweep_summary(&run));

    if args.plot.enabled() {
        let (w, h) = (args.plot.width, args.plot.height);
        println!(
            "{}",
            crate::plot::render_degree_losses(&run.sweep.results, run.sweep.best(), w, h)
        );
        let best = run.sweep.best();
        println!("Best degree {} on the test split:", best.degree);
        println!(
            "{}",
            crate::plot::render_scatter(&run.split.test.xs(), &run.split.test.ys(), &best.test_predictions, w, h)
        );
    }

    if let Some(dir) = &args.svg_dir {
        let size = svg_size(&args.plot);
        let written = crate::plot::write_degree_prediction_svgs(dir, &run, &args.plot_degrees, size)?;
        crate::plot::write_degree_loss_svg(&dir.join("degree_vs_loss.svg"), &run, size)?;
        info!("wrote {} figures to {}", written.len() + 1, dir.display());
    }
    if let Some(path) = &args.export {
        crate::io::write_sweep_csv(path, &run.sweep)?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::write_summary_json(path, &SweepSummary::from_run(&run))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_contour(args: ContourArgs) -> Result<(), AppError> {
    let run = pipeline::run_contour((5.0, 5.0), 1, 10)?;

    println!("{}", crate::report::format_contour_summary(&run));
    if args.plot.enabled() {
        println!(
            "{}",
            crate::plot::render_field(&run.field, None, args.plot.width, args.plot.height)
        );
    }
    if let Some(path) = &args.svg {
        crate::plot::write_contour_svg(path, &run, svg_size(&args.plot))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

/// SVG figures are sized in pixels; scale the terminal dimensions up.
fn svg_size(plot: &crate::cli::PlotOpts) -> (u32, u32) {
    let w = plot.width.max(40).saturating_mul(10).min(4000) as u32;
    let h = plot.height.max(10).saturating_mul(32).min(4000) as u32;
    (w, h)
}

pub fn descent_config_from_args(args: &DescentArgs) -> DescentRunConfig {
    DescentRunConfig {
        seed: args.seed,
        data: LinearDataConfig {
            noise: args.noise,
            ..LinearDataConfig::default()
        },
        descent: DescentConfig {
            learning_rate: args.lr,
            iterations: args.iterations,
            initial: ParamPair::new(args.init_bias, args.init_weight),
        },
        surface: SurfaceConfig {
            bias: AxisSpec::new(args.bias_start, args.bias_stop, args.bias_step),
            weight: AxisSpec::new(args.weight_start, args.weight_stop, args.weight_step),
        },
    }
}

pub fn sweep_config_from_args(args: &SweepArgs) -> SweepRunConfig {
    SweepRunConfig {
        seed: args.seed,
        data: PolynomialDataConfig {
            samples: args.samples,
            noise: args.noise,
        },
        sweep: SweepConfig {
            n_train: args.train,
            n_test: args.test,
            degree_min: args.degree_min,
            degree_max: args.degree_max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    #[test]
    fn descent_args_map_onto_run_config() {
        let cli = Cli::parse_from(["rlab", "descent", "--lr", "0.001", "--iterations", "10", "--init-weight", "1.5"]);
        let Command::Descent(args) = cli.command else {
            panic!("expected descent");
        };
        let config = descent_config_from_args(&args);
        assert_eq!(config.descent.learning_rate, 0.001);
        assert_eq!(config.descent.iterations, 10);
        assert_eq!(config.descent.initial, ParamPair::new(0.0, 1.5));
        assert_eq!(config.surface, SurfaceConfig::default());
        assert_eq!(config.data, LinearDataConfig::default());
    }

    #[test]
    fn sweep_defaults_match_run_defaults() {
        let cli = Cli::parse_from(["rlab", "sweep"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(sweep_config_from_args(&args), SweepRunConfig::default());
    }

    #[test]
    fn svg_size_is_clamped_for_huge_terminal_sizes() {
        let cli = Cli::parse_from(["rlab", "contour", "--width", "18446744073709551615", "--height", "18446744073709551615"]);
        let Command::Contour(args) = cli.command else {
            panic!("expected contour");
        };
        assert_eq!(svg_size(&args.plot), (4000, 4000));

        let small = Cli::parse_from(["rlab", "contour", "--width", "1", "--height", "1"]);
        let Command::Contour(args) = small.command else {
            panic!("expected contour");
        };
        assert_eq!(svg_size(&args.plot), (400, 320));
    }
}
