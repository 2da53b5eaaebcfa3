//! ASCII plotting for terminal output.
//!
//! Every renderer draws into a fixed character grid and returns a `String`, so the
//! same inputs always give the same text and tests can compare it directly.
//!
//! Glyphs:
//! - scalar fields: shade ramp ` .:-=+*#%@` (low to high, log scaled)
//! - trajectory: `o`, final point `X`
//! - degree chart: train `t`, test `v`, best `*`
//! - scatter: actual `o`, predicted `+`

use crate::domain::{DegreeResult, ParamPair, ScalarField, Trajectory};

const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Render a scalar field as a shaded map, optionally overlaying a trajectory.
///
/// Rows of the field go along the x axis and columns along the y axis (top is
/// the largest column value), so a loss surface shows bias horizontally and
/// weight vertically.
pub fn render_field(
    field: &ScalarField,
    trajectory: Option<&Trajectory>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = axis_range(field.row_values());
    let (y_min, y_max) = axis_range(field.col_values());
    let (v_min, v_max) = field.finite_range().unwrap_or((0.0, 1.0));

    let mut grid = vec![vec![' '; width]; height];
    for (row, line) in grid.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let i = nearest_index(col, width, field.rows());
            let j = nearest_index(height - 1 - row, height, field.cols());
            *cell = shade(field.get(i, j), v_min, v_max);
        }
    }

    if let Some(t) = trajectory {
        for p in t.steps().iter().filter(|p| p.is_finite()) {
            if let Some((x, y)) = project(*p, (x_min, x_max), (y_min, y_max), width, height) {
                grid[y][x] = 'o';
            }
        }
        if let Some((x, y)) = project(t.last(), (x_min, x_max), (y_min, y_max), width, height) {
            grid[y][x] = 'X';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Field: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}] | z=[{v_min:.3}, {v_max:.3}]\n"
    ));
    push_grid(&mut out, grid);
    out
}

/// Render train/test loss against degree, marking the selected degree.
///
/// Losses above `4 ×` the best average are clipped to the top row so that one
/// exploding high-degree fit does not flatten the rest of the chart.
pub fn render_degree_losses(results: &[DegreeResult], best: &DegreeResult, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let d_min = results.first().map(|r| r.degree).unwrap_or(0) as f64;
    let d_max = results.last().map(|r| r.degree).unwrap_or(1) as f64;
    let d_max = if d_max > d_min { d_max } else { d_min + 1.0 };

    let cap = if best.average_loss.is_finite() && best.average_loss > 0.0 {
        best.average_loss * 4.0
    } else {
        1.0
    };

    let mut grid = vec![vec![' '; width]; height];
    let plot = |degree: usize, loss: f64, ch: char, grid: &mut [Vec<char>]| {
        let loss = if loss.is_nan() { cap } else { loss.min(cap) };
        let x = map_x(degree as f64, d_min, d_max, width);
        let y = map_y(loss, 0.0, cap, height);
        grid[y][x] = ch;
    };

    for r in results {
        plot(r.degree, r.train_loss, 't', &mut grid);
        plot(r.degree, r.test_loss, 'v', &mut grid);
    }
    plot(best.degree, best.average_loss, '*', &mut grid);

    let mut out = String::new();
    out.push_str(&format!(
        "Degree vs loss: degree=[{d_min:.0}, {d_max:.0}] | loss=[0, {cap:.2}] | best={} (avg {:.2})\n",
        best.degree, best.average_loss
    ));
    push_grid(&mut out, grid);
    out
}

/// Render actual vs predicted values over `x`.
pub fn render_scatter(xs: &[f64], actual: &[f64], predicted: &[f64], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = finite_range(xs.iter().copied()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = finite_range(actual.iter().chain(predicted.iter()).copied()).unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (&x, &y) in xs.iter().zip(predicted.iter()) {
        if x.is_finite() && y.is_finite() {
            grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = '+';
        }
    }
    // Actual points win where they coincide with a prediction.
    for (&x, &y) in xs.iter().zip(actual.iter()) {
        if x.is_finite() && y.is_finite() {
            grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Scatter: x=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}] | o=actual +=predicted\n"
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
}

fn shade(v: f64, v_min: f64, v_max: f64) -> char {
    if !v.is_finite() {
        return '?';
    }
    // log scaling keeps the basin visible next to very large losses.
    let hi = (v_max - v_min + 1.0).ln();
    let u = if hi > 0.0 {
        ((v - v_min + 1.0).ln() / hi).clamp(0.0, 1.0)
    } else {
        0.0
    };
    SHADES[(u * (SHADES.len() - 1) as f64).round() as usize]
}

fn nearest_index(pos: usize, span: usize, n: usize) -> usize {
    if span <= 1 || n <= 1 {
        return 0;
    }
    let u = pos as f64 / (span as f64 - 1.0);
    ((u * (n as f64 - 1.0)).round() as usize).min(n - 1)
}

fn project(p: ParamPair, xr: (f64, f64), yr: (f64, f64), width: usize, height: usize) -> Option<(usize, usize)> {
    let inside = p.is_finite()
        && p.bias >= xr.0
        && p.bias <= xr.1
        && p.weight >= yr.0
        && p.weight <= yr.1;
    inside.then(|| (map_x(p.bias, xr.0, xr.1, width), map_y(p.weight, yr.0, yr.1, height)))
}

fn axis_range(values: &[f64]) -> (f64, f64) {
    match finite_range(values.iter().copied()) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => (lo - 0.5, lo + 0.5),
        None => (0.0, 1.0),
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
