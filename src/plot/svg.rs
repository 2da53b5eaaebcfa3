//! SVG figures rendered with Plotters.
//!
//! Figures mirror the experiment views:
//! - descent: loss-surface heat map + trajectory, and prediction vs actual
//! - sweep: degree vs loss, and one prediction chart per selected degree
//! - contour: the bowl field with its minimum marked
//!
//! All drawing reads the read-only outputs of the pipelines; nothing here feeds
//! back into the numeric cores.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::app::pipeline::{ContourRun, DescentRun, SweepRun};
use crate::domain::{DegreeResult, ScalarField, Trajectory};
use crate::error::AppError;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

fn plot_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::compute(format!("SVG rendering failed: {e}"))
}

/// Descent figure: surface + trajectory (top), prediction vs actual (bottom).
pub fn write_descent_svg(path: &Path, run: &DescentRun, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let (upper, lower) = root.split_vertically((size.1 / 2) as i32);

    draw_field_panel(&upper, "Gradient Descent", ("b", "w"), run.surface.field(), Some(&run.trajectory))?;

    let last = run.final_params;
    let xs = run.dataset.xs();
    let ys = run.dataset.ys();
    let (x0, x1) = padded(xs.iter().copied());
    let (y0, y1) = padded(ys.iter().chain(run.predictions.iter()).copied());

    let mut chart = ChartBuilder::on(&lower)
        .caption("Prediction vs Actual", ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(xs.iter().zip(ys.iter()).map(|(&x, &y)| Circle::new((x, y), 3, BLACK.filled())))
        .map_err(plot_err)?
        .label("Actual")
        .legend(|(x, y)| Circle::new((x, y), 3, BLACK.filled()));
    chart
        .draw_series(
            xs.iter()
                .zip(run.predictions.iter())
                .filter(|(_, y)| y.is_finite())
                .map(|(&x, &y)| Cross::new((x, y), 3, RED.stroke_width(1))),
        )
        .map_err(plot_err)?
        .label(format!("Prediction (b = {:.2}, w = {:.2})", last.bias, last.weight))
        .legend(|(x, y)| Cross::new((x, y), 3, RED.stroke_width(1)));
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)
}

/// Degree vs train/test loss with the selected degree marked.
pub fn write_degree_loss_svg(path: &Path, run: &SweepRun, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let results = &run.sweep.results;
    let best = run.sweep.best();
    let cap = loss_cap(results, best);
    let d_max = results.last().map(|r| r.degree).unwrap_or(1) as f64 + 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Degree vs Loss", ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..d_max, 0f64..cap)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("Degree")
        .y_desc("Loss")
        .draw()
        .map_err(plot_err)?;

    let clip = |v: f64| if v.is_nan() { cap } else { v.min(cap) };
    chart
        .draw_series(LineSeries::new(
            results.iter().map(|r| (r.degree as f64, clip(r.train_loss))),
            GREEN.stroke_width(3),
        ))
        .map_err(plot_err)?
        .label("Train")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(3)));
    chart
        .draw_series(LineSeries::new(
            results.iter().map(|r| (r.degree as f64, clip(r.test_loss))),
            BLUE.stroke_width(3),
        ))
        .map_err(plot_err)?
        .label("Test")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    let best_pt = (best.degree as f64, clip(best.average_loss));
    chart
        .draw_series(std::iter::once(Circle::new(best_pt, 4, RED.filled())))
        .map_err(plot_err)?
        .label("Best")
        .legend(|(x, y)| Circle::new((x, y), 4, RED.filled()));
    chart
        .draw_series(std::iter::once(Text::new(
            format!("Degree = {}, Avg Loss = {:.1}", best.degree, best.average_loss),
            (best_pt.0 + 0.2, best_pt.1 + cap * 0.03),
            ("sans-serif", 14).into_font(),
        )))
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)
}

/// One prediction chart per degree in `degrees` that the sweep actually fitted.
///
/// Files are named `degree_NN.svg` inside `dir`. Returns the written paths.
pub fn write_degree_prediction_svgs(
    dir: &Path,
    run: &SweepRun,
    degrees: &[usize],
    size: (u32, u32),
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::invalid(format!("Failed to create plot dir '{}': {e}", dir.display())))?;

    let mut written = Vec::new();
    for r in run.sweep.results.iter().filter(|r| degrees.contains(&r.degree)) {
        let path = dir.join(format!("degree_{:02}.svg", r.degree));
        write_degree_prediction_svg(&path, run, r, size)?;
        written.push(path);
    }
    Ok(written)
}

fn write_degree_prediction_svg(
    path: &Path,
    run: &SweepRun,
    result: &DegreeResult,
    size: (u32, u32),
) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let test_x = run.split.test.xs();
    let test_y = run.split.test.ys();
    let (x0, x1) = padded(test_x.iter().copied());
    let (y0, y1) = padded(test_y.iter().copied());
    let clip = |v: f64| if v.is_nan() { y1 } else { v.clamp(y0, y1) };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Degree = {} | Train Loss = {:.1} | Test Loss = {:.1}",
                result.degree, result.train_loss, result.test_loss
            ),
            ("sans-serif", 16).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            test_x
                .iter()
                .zip(test_y.iter())
                .map(|(&x, &y)| Circle::new((x, y), 2, BLACK.filled())),
        )
        .map_err(plot_err)?;

    let baseline = sorted_by_x(&test_x, &run.sweep.baseline.test_predictions);
    chart
        .draw_series(LineSeries::new(
            baseline.into_iter().map(|(x, y)| (x, clip(y))),
            BLUE.stroke_width(3),
        ))
        .map_err(plot_err)?
        .label("Linear")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    let poly = sorted_by_x(&test_x, &result.test_predictions);
    chart
        .draw_series(LineSeries::new(
            poly.into_iter().map(|(x, y)| (x, clip(y))),
            RED.stroke_width(3),
        ))
        .map_err(plot_err)?
        .label(format!("Degree {}", result.degree))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)
}

/// Contour demo: bowl field with the minimum marked.
pub fn write_contour_svg(path: &Path, run: &ContourRun, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    draw_field_panel(&root, "Contour", ("X", "Y"), &run.field, None)?;
    root.present().map_err(plot_err)
}

fn draw_field_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    title: &str,
    labels: (&str, &str),
    field: &ScalarField,
    trajectory: Option<&Trajectory>,
) -> Result<(), AppError> {
    let rows = field.row_values();
    let cols = field.col_values();
    let (x0, x1) = cell_span(rows);
    let (y0, y1) = cell_span(cols);
    let (v_min, v_max) = field.finite_range().unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(labels.0)
        .y_desc(labels.1)
        .draw()
        .map_err(plot_err)?;

    let dx = step_or_one(rows);
    let dy = step_or_one(cols);
    let cells = (0..field.rows()).flat_map(|i| (0..field.cols()).map(move |j| (i, j)));
    chart
        .draw_series(cells.map(|(i, j)| {
            let (x, y) = (rows[i], cols[j]);
            Rectangle::new(
                [(x - dx / 2.0, y - dy / 2.0), (x + dx / 2.0, y + dy / 2.0)],
                heat_color(field.get(i, j), v_min, v_max).filled(),
            )
        }))
        .map_err(plot_err)?;

    if let Some((i, j)) = field.min_cell() {
        chart
            .draw_series(std::iter::once(Circle::new((rows[i], cols[j]), 6, ORANGE.stroke_width(3))))
            .map_err(plot_err)?;
    }

    if let Some(t) = trajectory {
        let inside = |x: f64, y: f64| x >= x0 && x <= x1 && y >= y0 && y <= y1;
        let path: Vec<(f64, f64)> = t
            .steps()
            .iter()
            .filter(|p| p.is_finite() && inside(p.bias, p.weight))
            .map(|p| (p.bias, p.weight))
            .collect();
        chart
            .draw_series(LineSeries::new(path, BLACK.stroke_width(2)))
            .map_err(plot_err)?;

        let last = t.last();
        if last.is_finite() && inside(last.bias, last.weight) {
            chart
                .draw_series(std::iter::once(Circle::new((last.bias, last.weight), 4, ORANGE.filled())))
                .map_err(plot_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("b = {:.2}, w = {:.2}", last.bias, last.weight),
                    (last.bias + dx, last.weight + 2.0 * dy),
                    ("sans-serif", 14).into_font(),
                )))
                .map_err(plot_err)?;
        }
    }

    Ok(())
}

/// Blue (low) to red (high), log scaled like the terminal renderer.
fn heat_color(v: f64, v_min: f64, v_max: f64) -> HSLColor {
    if !v.is_finite() {
        return HSLColor(0.0, 0.0, 0.5);
    }
    let hi = (v_max - v_min + 1.0).ln();
    let u = if hi > 0.0 {
        ((v - v_min + 1.0).ln() / hi).clamp(0.0, 1.0)
    } else {
        0.0
    };
    HSLColor((1.0 - u) * 0.66, 1.0, 0.6)
}

fn loss_cap(results: &[DegreeResult], best: &DegreeResult) -> f64 {
    let worst_sane = results
        .iter()
        .flat_map(|r| [r.train_loss, r.test_loss])
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let cap = if best.average_loss.is_finite() && best.average_loss > 0.0 {
        worst_sane.min(best.average_loss * 4.0)
    } else {
        worst_sane
    };
    if cap > 0.0 { cap * 1.05 } else { 1.0 }
}

fn sorted_by_x(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    let mut pts: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0));
    pts
}

fn cell_span(values: &[f64]) -> (f64, f64) {
    let step = step_or_one(values);
    let lo = values.first().copied().unwrap_or(0.0);
    let hi = values.last().copied().unwrap_or(1.0);
    (lo.min(hi) - step / 2.0, lo.max(hi) + step / 2.0)
}

fn step_or_one(values: &[f64]) -> f64 {
    match values {
        [a, b, ..] if (b - a).abs() > 0.0 => (b - a).abs(),
        _ => 1.0,
    }
}

fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo).abs() * 0.05).max(1e-9);
    (lo - pad, hi + pad)
}
