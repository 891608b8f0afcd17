//! The 5-parameter logistic (5PL) curve.
//!
//! `f(x; a, b, c, d, g) = d + (a - d) / (1 + (x / c)^b)^g`
//!
//! The fit relies on three primitives implemented here:
//! - evaluate `f` (for residuals and fitted values)
//! - the analytic gradient in `(a, b, c, d, g)` (one Jacobian row)
//! - a data-driven starting point
//!
//! With `s = (x / c)^b` and `u = 1 + s`, the partial derivatives are:
//!
//! ```text
//! ∂f/∂a = u^-g
//! ∂f/∂d = 1 - u^-g
//! ∂f/∂g = -(a - d) u^-g ln u
//! ∂f/∂b = -g (a - d) u^(-g-1) · s ln(x / c)
//! ∂f/∂c = -g (a - d) u^(-g-1) · (-b s / c)
//! ```
//!
//! At `x = 0` we have `s = 0` and both `s`-terms vanish (for `b > 0`). When `s`
//! overflows the curve sits on its `d` plateau and the `b`, `c` and `g` terms
//! take their limit, zero.

/// Lower clamp for the initial slope estimate.
const B_INIT_MIN: f64 = 0.5;
/// Upper clamp for the initial slope estimate.
const B_INIT_MAX: f64 = 50.0;

/// Evaluate the 5PL curve with parameters `[a, b, c, d, g]`.
pub fn logistic_5pl(x: f64, p: &[f64; 5]) -> f64 {
    let [a, b, c, d, g] = *p;
    d + (a - d) / (1.0 + (x / c).powf(b)).powf(g)
}

/// Write `∂f/∂(a, b, c, d, g)` at `x` into `out` (one Jacobian row).
pub fn fill_gradient(x: f64, p: &[f64; 5], out: &mut [f64]) {
    let [a, b, c, d, g] = *p;
    let ratio = x / c;
    let s = ratio.powf(b);
    let u = 1.0 + s;
    let w = u.powf(-g);

    out[0] = w;
    out[3] = 1.0 - w;

    if !s.is_finite() || w == 0.0 {
        out[1] = 0.0;
        out[2] = 0.0;
        out[4] = 0.0;
        return;
    }

    let df_du = -g * (a - d) * w / u;
    let (ds_db, ds_dc) = if s == 0.0 {
        (0.0, 0.0)
    } else {
        (s * ratio.ln(), -b * s / c)
    };

    out[1] = df_du * ds_db;
    out[2] = df_du * ds_dc;
    out[4] = -(a - d) * w * u.ln();
}

/// Starting point `[a, b, c, d, g]` derived from the observations.
///
/// - `a`, `d`: first and last observation (the two asymptotes for `b > 0`)
/// - `c`: where the series first crosses the midpoint between them
///   (for `g = 1` this is exactly the inflection)
/// - `b`: from the slope at that crossing, using `f'(c) = (d - a) b / (4c)`
/// - `g`: 1 (symmetric curve)
///
/// Deterministic: no randomness, so identical input yields an identical fit.
pub fn initial_guess(x: &[f64], y: &[f64]) -> [f64; 5] {
    let n = x.len().min(y.len());
    if n < 2 {
        let level = y.first().copied().unwrap_or(0.0);
        return [level, 1.0, 1.0, level, 1.0];
    }

    let a = y[0];
    let d = y[n - 1];
    let mid = 0.5 * (a + d);
    let x_max = x[n - 1].max(1.0);

    let (c, slope) = match midpoint_crossing(&x[..n], &y[..n], mid) {
        Some((xc, slope)) => (xc, slope),
        None => (0.5 * x_max, (d - a) / x_max),
    };
    let c = c.clamp(1.0, x_max);

    let b = 4.0 * c * slope / (d - a);
    let b = if b.is_finite() && b > 0.0 {
        b.clamp(B_INIT_MIN, B_INIT_MAX)
    } else {
        1.0
    };

    [a, b, c, d, 1.0]
}

/// First `x` where the piecewise-linear series crosses `level`, plus the local slope.
fn midpoint_crossing(x: &[f64], y: &[f64], level: f64) -> Option<(f64, f64)> {
    for i in 0..x.len() - 1 {
        let (y0, y1) = (y[i] - level, y[i + 1] - level);
        if y0 == 0.0 && y1 == 0.0 {
            continue;
        }
        if y0 == 0.0 || y0.signum() != y1.signum() {
            let dx = x[i + 1] - x[i];
            let slope = (y[i + 1] - y[i]) / dx;
            let t = if y1 == y0 { 0.0 } else { y0 / (y0 - y1) };
            return Some((x[i] + t * dx, slope));
        }
    }
    None
}
