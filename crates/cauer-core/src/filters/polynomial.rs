//! Polynomial Helpers
//!
//! Real polynomials are stored as coefficient slices in **descending** powers,
//! the same layout used for transfer-function numerators and denominators:
//!
//! ```text
//! [c0, c1, ..., cn]  ↔  c0·sⁿ + c1·sⁿ⁻¹ + ... + cn
//! ```
//!
//! Root finding uses the Aberth–Ehrlich simultaneous iteration on a
//! scale-balanced copy of the polynomial. Analog filter denominators have
//! coefficients spanning hundreds of orders of magnitude (`ωₙⁿ` for order
//! `n`), so the variable is rescaled by the geometric mean of the root
//! magnitudes before iterating, which puts every root near the unit circle.

use crate::types::Complex;
use std::f64::consts::PI;

/// Maximum number of Aberth sweeps.
const MAX_ITERATIONS: usize = 500;

/// Relative correction below which the Aberth iteration stops.
const CONVERGENCE_TOL: f64 = 1e-12;

/// Newton steps applied to each root after the simultaneous iteration.
const POLISH_STEPS: usize = 3;

/// Roots whose imaginary part is below this fraction of their magnitude are
/// placed on the real axis.
const REAL_AXIS_SNAP: f64 = 1e-9;

/// Strip leading (highest-power) zero coefficients.
pub fn trim_leading_zeros(coeffs: &[f64]) -> &[f64] {
    let start = coeffs.iter().position(|&c| c != 0.0).unwrap_or(coeffs.len());
    &coeffs[start..]
}

/// Degree of a polynomial, `None` for the zero polynomial.
pub fn degree(coeffs: &[f64]) -> Option<usize> {
    let trimmed = trim_leading_zeros(coeffs);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.len() - 1)
    }
}

/// Evaluate a polynomial at a complex point (Horner's rule).
#[inline]
pub fn polyval<T>(coeffs: &[T], x: Complex) -> Complex
where
    T: Copy + Into<Complex>,
{
    coeffs
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * x + Into::<Complex>::into(c))
}

/// Derivative of a polynomial.
pub fn derivative<T>(coeffs: &[T]) -> Vec<T>
where
    T: Copy + std::ops::Mul<f64, Output = T>,
{
    let n = coeffs.len().saturating_sub(1);
    coeffs
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &c)| c * (n - i) as f64)
        .collect()
}

/// Expand `Π (s - rᵢ)` into monic coefficients.
pub fn poly_from_roots(roots: &[Complex]) -> Vec<Complex> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex::new(1.0, 0.0));

    for &r in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }

    coeffs
}

/// Polynomial long division, returning `(quotient, remainder)`.
///
/// Leading zeros are trimmed from both inputs first. The quotient is empty
/// when the numerator degree is below the denominator degree, and the
/// remainder is trimmed of leading terms that vanish relative to the
/// numerator scale.
///
/// # Panics
///
/// Panics if `den` is the zero polynomial.
pub fn polydiv(num: &[f64], den: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let num = trim_leading_zeros(num);
    let den = trim_leading_zeros(den);
    assert!(!den.is_empty(), "division by the zero polynomial");

    if num.len() < den.len() {
        return (Vec::new(), num.to_vec());
    }

    let scale = 1.0 / den[0];
    let steps = num.len() - den.len() + 1;
    let mut quotient = vec![0.0; steps];
    let mut rem = num.to_vec();

    for k in 0..steps {
        let d = scale * rem[k];
        quotient[k] = d;
        for (j, &dv) in den.iter().enumerate() {
            rem[k + j] -= d * dv;
        }
    }

    let magnitude = num.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    let remainder: Vec<f64> = rem[steps..]
        .iter()
        .copied()
        .skip_while(|c| c.abs() <= 1e-14 * magnitude)
        .collect();

    (quotient, remainder)
}

/// All complex roots of a real polynomial.
///
/// Roots at the origin (trailing zero coefficients) are split off exactly.
/// The remaining roots are found by the Aberth–Ehrlich iteration, polished
/// with Newton steps, and roots within rounding distance of the real axis
/// are returned with an imaginary part of exactly zero. The result is
/// deterministic for a given input.
pub fn roots(coeffs: &[f64]) -> Vec<Complex> {
    let trimmed = trim_leading_zeros(coeffs);
    if trimmed.len() < 2 {
        return Vec::new();
    }

    let at_origin = trimmed.iter().rev().take_while(|&&c| c == 0.0).count();
    let core = &trimmed[..trimmed.len() - at_origin];

    let mut found = aberth(core);
    found.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(at_origin));
    found
}

fn aberth(coeffs: &[f64]) -> Vec<Complex> {
    let n = coeffs.len().saturating_sub(1);
    match n {
        0 => return Vec::new(),
        1 => return vec![Complex::new(-coeffs[1] / coeffs[0], 0.0)],
        _ => {}
    }

    // Balance: q(x) = p(σx) / (c0·σⁿ), whose roots have unit geometric mean
    let lead = coeffs[0];
    let sigma = (coeffs[n] / lead).abs().powf(1.0 / n as f64);
    let q: Vec<f64> = coeffs
        .iter()
        .enumerate()
        .map(|(i, &c)| c / (lead * sigma.powi(i as i32)))
        .collect();
    let dq = derivative(&q);

    let mut z: Vec<Complex> = (0..n)
        .map(|k| Complex::from_polar(1.0, 2.0 * PI * k as f64 / n as f64 + 0.4))
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut max_correction = 0.0_f64;

        for i in 0..n {
            let pv = polyval(&q, z[i]);
            if pv == Complex::new(0.0, 0.0) {
                continue;
            }
            let dv = polyval(&dq, z[i]);
            let repulsion: Complex = (0..n)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();

            let denom = dv - pv * repulsion;
            if denom == Complex::new(0.0, 0.0) {
                continue;
            }
            let w = pv / denom;
            if !w.is_finite() {
                continue;
            }
            z[i] -= w;
            max_correction = max_correction.max(w.norm() / z[i].norm().max(f64::MIN_POSITIVE));
        }

        if max_correction < CONVERGENCE_TOL {
            break;
        }
    }

    z.into_iter()
        .map(|root| {
            let polished = polish(&q, &dq, root);
            let snapped = if polished.im.abs() <= REAL_AXIS_SNAP * polished.norm() {
                Complex::new(polished.re, 0.0)
            } else {
                polished
            };
            snapped * sigma
        })
        .collect()
}

/// Newton refinement, keeping only steps that reduce the residual.
fn polish(q: &[f64], dq: &[f64], mut x: Complex) -> Complex {
    let mut residual = polyval(q, x).norm();
    for _ in 0..POLISH_STEPS {
        let dv = polyval(dq, x);
        if dv == Complex::new(0.0, 0.0) {
            break;
        }
        let candidate = x - polyval(q, x) / dv;
        let candidate_residual = polyval(q, candidate).norm();
        if !candidate.is_finite() || candidate_residual >= residual {
            break;
        }
        x = candidate;
        residual = candidate_residual;
    }
    x
}
