//! Formatted terminal output for experiment runs.
//!
//! Reports only read finished runs; the numeric cores never print.

use crate::app::pipeline::{ContourRun, DescentRun, SweepRun};
use crate::domain::{DegreeResult, ParamPair};

/// Format the gradient-descent run summary.
pub fn format_descent_summary(run: &DescentRun) -> String {
    let mut out = String::new();
    let cfg = &run.config;

    out.push_str("=== rlab - Gradient Descent ===\n");
    out.push_str(&format!(
        "Data: n={} | seed={} | noise={}\n",
        run.dataset.len(),
        cfg.seed,
        cfg.data.noise
    ));
    out.push_str(&format!(
        "Descent: lr={} | iterations={} | init=(b={}, w={})\n",
        cfg.descent.learning_rate,
        cfg.descent.iterations,
        cfg.descent.initial.bias,
        cfg.descent.initial.weight
    ));
    out.push_str(&format!(
        "Surface: {} bias x {} weight candidates\n",
        run.surface.bias_candidates().len(),
        run.surface.weight_candidates().len()
    ));

    out.push_str("\nResult:\n");
    out.push_str(&format!("- {}\n", fmt_params(run.final_params)));
    out.push_str(&format!("- trajectory: {} entries\n", run.trajectory.steps().len()));
    out.push_str(&format!("- half SSE: {}\n", fmt_loss(run.final_half_sse)));
    out.push_str(&format!("- MSE     : {}\n", fmt_loss(run.final_mse)));
    if let Some(best) = run.surface.argmin() {
        out.push_str(&format!("- best grid cell: {}\n", fmt_params(best)));
    }
    if run.trajectory.is_divergent() {
        out.push_str("- status: DIVERGED (non-finite parameters)\n");
    }

    out.push_str("\nPrediction vs actual:\n");
    out.push_str(&format!("{:>10} {:>12} {:>12} {:>12}\n", "x", "y", "y_hat", "residual"));
    out.push_str(&format!("{:->10} {:->12} {:->12} {:->12}\n", "", "", "", ""));
    for (p, &y_hat) in run.dataset.points().iter().zip(run.predictions.iter()) {
        out.push_str(&format!(
            "{:>10.2} {:>12.4} {:>12.4} {:>12.4}\n",
            p.x,
            p.y,
            y_hat,
            p.y - y_hat
        ));
    }

    out
}

/// Format the polynomial sweep summary and per-degree table.
pub fn format_sweep_summary(run: &SweepRun) -> String {
    let mut out = String::new();
    let cfg = &run.config;
    let sweep = &run.sweep;

    out.push_str("=== rlab - Polynomial Degree Sweep ===\n");
    out.push_str(&format!(
        "Data: n={} | seed={} | noise={} | train={} | test={}\n",
        run.dataset.len(),
        cfg.seed,
        cfg.data.noise,
        cfg.sweep.n_train,
        cfg.sweep.n_test
    ));
    out.push_str(&format!(
        "Degrees: {}..={}\n",
        cfg.sweep.degree_min, cfg.sweep.degree_max
    ));

    out.push_str("\nDegree diagnostics:\n");
    out.push_str(&format_degree_table(&sweep.results, sweep.best().degree));

    let base = &sweep.baseline;
    out.push_str("\nLinear baseline:\n");
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&base.coefficients)));
    out.push_str(&format!(
        "- train MSE={} R2={:.4} | test MSE={} R2={:.4}\n",
        fmt_loss(base.train_loss),
        base.train_r2,
        fmt_loss(base.test_loss),
        base.test_r2
    ));

    let best = sweep.best();
    out.push_str("\nBest degree:\n");
    out.push_str(&format!(
        "- degree {} | avg loss={} (train={}, test={})\n",
        best.degree,
        fmt_loss(best.average_loss),
        fmt_loss(best.train_loss),
        fmt_loss(best.test_loss)
    ));
    out.push_str(&format!(
        "- train R2={:.4} | test R2={:.4}\n",
        run.best_train_r2, run.best_test_r2
    ));

    out
}

/// Format the contour demo summary.
pub fn format_contour_summary(run: &ContourRun) -> String {
    let mut out = String::new();
    out.push_str("=== rlab - Contour ===\n");
    out.push_str(&format!(
        "Grid: {} x {} | z = (x-{})^2 + (y-{})^2\n",
        run.field.rows(),
        run.field.cols(),
        run.center.0,
        run.center.1
    ));
    if let Some((i, j)) = run.field.min_cell() {
        out.push_str(&format!(
            "Minimum: z={} at x={}, y={}\n",
            run.field.get(i, j),
            run.field.row_values()[i],
            run.field.col_values()[j]
        ));
    }
    out
}

fn format_degree_table(results: &[DegreeResult], best_degree: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:>6} {:>14} {:>14} {:>14}\n",
        "degree", "train_mse", "test_mse", "avg"
    ));
    out.push_str(&format!("  {:->6} {:->14} {:->14} {:->14}\n", "", "", "", ""));
    for r in results {
        let chosen = if r.degree == best_degree { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:>6} {:>14} {:>14} {:>14}\n",
            r.degree,
            fmt_loss(r.train_loss),
            fmt_loss(r.test_loss),
            fmt_loss(r.average_loss)
        ));
    }
    out
}

fn fmt_params(p: ParamPair) -> String {
    format!("b = {:.4}, w = {:.4}", p.bias, p.weight)
}

/// Losses can be huge at high degree or after divergence; switch to scientific notation.
fn fmt_loss(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v != 0.0 && (v.abs() >= 1e7 || v.abs() < 1e-3) {
        format!("{v:.4e}")
    } else {
        format!("{v:.4}")
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
