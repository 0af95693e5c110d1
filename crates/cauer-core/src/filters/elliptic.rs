//! Elliptic (Cauer) Analog Low-Pass Design
//!
//! Equiripple in both passband and stopband, giving the steepest transition
//! of any filter family for a given order.
//!
//! ## Design Flow
//!
//! ```text
//! (ωp, ωs, Rp, Rs) ──► estimate_order() ──► (N, ωn)
//!                                              │
//!        AnalogPrototype::elliptic(N, Rp, Rs) ◄┘   zeros/poles at 1 rad/s
//!                      │
//!              scale_frequency(ωn)                 s → s/ωn
//!                      │
//!             to_transfer_function()               k·Π(s−z) / Π(s−p)
//! ```
//!
//! ## Degree Equation
//!
//! With selectivity `k = ωp/ωs` and discrimination
//! `k1² = (10^(Rp/10) − 1) / (10^(Rs/10) − 1)`, the minimum order is
//!
//! ```text
//! N ≥ K(k²)·K'(k1²) / (K'(k²)·K(k1²))
//! ```
//!
//! where `K'(m) = K(1 − m)`.

use super::jacobi::{arc_jac_sc1, ellipdeg, ellipj, ellipk, ellipkm1};
use super::polynomial::poly_from_roots;
use super::transfer::TransferFunction;
use crate::types::{Complex, FilterError, FilterResult};
use std::f64::consts::LN_10;

/// Threshold below which `sn` is treated as zero (zero at infinity) and a
/// pole's imaginary part as vanishing.
const EPSILON: f64 = 2e-16;

/// `10^x − 1` without cancellation for small `x`.
fn pow10m1(x: f64) -> f64 {
    (x * LN_10).exp_m1()
}

fn check_positive(value: f64, what: &str) -> FilterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidSpec(format!(
            "{} must be positive and finite, got {}",
            what, value
        )))
    }
}

/// Raw elliptic order bound (not rounded).
///
/// Exposed for diagnostics; [`estimate_order`] takes its ceiling.
pub fn order_bound(
    passband_edge: f64,
    stopband_edge: f64,
    ripple_db: f64,
    attenuation_db: f64,
) -> FilterResult<f64> {
    check_positive(passband_edge, "passband edge")?;
    check_positive(stopband_edge, "stopband edge")?;
    check_positive(ripple_db, "passband ripple")?;
    check_positive(attenuation_db, "stopband attenuation")?;
    if passband_edge >= stopband_edge {
        return Err(FilterError::InvalidSpec(format!(
            "passband edge {} must lie below stopband edge {}",
            passband_edge, stopband_edge
        )));
    }

    let selectivity_sq = (passband_edge / stopband_edge).powi(2);
    let discrimination_sq = pow10m1(0.1 * ripple_db) / pow10m1(0.1 * attenuation_db);

    let bound = ellipk(selectivity_sq) * ellipkm1(discrimination_sq)
        / (ellipkm1(selectivity_sq) * ellipk(discrimination_sq));

    if !bound.is_finite() || bound <= 0.0 {
        return Err(FilterError::InvalidSpec(format!(
            "degree equation has no finite solution (bound {})",
            bound
        )));
    }
    Ok(bound)
}

/// Minimal elliptic order and natural frequency meeting a low-pass spec.
///
/// The order is the ceiling of [`order_bound`], so it never under-designs.
/// For an analog low-pass the natural frequency is the passband edge.
pub fn estimate_order(
    passband_edge: f64,
    stopband_edge: f64,
    ripple_db: f64,
    attenuation_db: f64,
) -> FilterResult<(usize, f64)> {
    let bound = order_bound(passband_edge, stopband_edge, ripple_db, attenuation_db)?;
    let order = (bound.ceil() as usize).max(1);
    Ok((order, passband_edge))
}

/// Zeros, poles and gain of an analog filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogPrototype {
    pub zeros: Vec<Complex>,
    pub poles: Vec<Complex>,
    pub gain: f64,
}

impl AnalogPrototype {
    /// Elliptic low-pass prototype with passband edge at 1 rad/s.
    ///
    /// The passband ripples between 0 and `-ripple_db`, the stopband stays
    /// below `-attenuation_db`. Odd orders have unit DC gain, even orders
    /// start at the bottom of the ripple.
    pub fn elliptic(order: usize, ripple_db: f64, attenuation_db: f64) -> FilterResult<Self> {
        if order == 0 {
            return Err(FilterError::InvalidSpec("filter order must be at least 1".into()));
        }
        check_positive(ripple_db, "passband ripple")?;
        check_positive(attenuation_db, "stopband attenuation")?;

        let eps_sq = pow10m1(0.1 * ripple_db);

        if order == 1 {
            let p = -(1.0 / eps_sq).sqrt();
            return Ok(Self {
                zeros: Vec::new(),
                poles: vec![Complex::new(p, 0.0)],
                gain: -p,
            });
        }

        let eps = eps_sq.sqrt();
        let ck1_sq = eps_sq / pow10m1(0.1 * attenuation_db);
        if ck1_sq == 0.0 {
            return Err(FilterError::SynthesisFailed(
                "cannot design a filter with the given ripple and attenuation".into(),
            ));
        }

        let n = order as f64;
        let m = ellipdeg(order, ck1_sq);
        let cap_k = ellipk(m);

        // sn, cn, dn at j·K/N for j = 1, 3, 5... (odd) or 0, 2, 4... (even)
        let samples: Vec<_> = ((1 - order % 2)..order)
            .step_by(2)
            .map(|j| ellipj(j as f64 * cap_k / n, m))
            .collect();

        let mut zeros: Vec<Complex> = samples
            .iter()
            .filter(|j| j.sn.abs() > EPSILON)
            .map(|j| Complex::new(0.0, 1.0 / (m.sqrt() * j.sn)))
            .collect();
        let conj_zeros: Vec<Complex> = zeros.iter().map(|z| z.conj()).collect();
        zeros.extend(conj_zeros);

        let r = arc_jac_sc1(1.0 / eps, ck1_sq)?;
        let v0 = cap_k * r / (n * ellipk(ck1_sq));
        let v = ellipj(v0, 1.0 - m);

        let mut poles: Vec<Complex> = samples
            .iter()
            .map(|j| {
                let denom = 1.0 - (j.dn * v.sn).powi(2);
                -Complex::new(j.cn * j.dn * v.sn * v.cn, j.sn * v.dn) / denom
            })
            .collect();

        let conj_poles: Vec<Complex> = if order % 2 == 1 {
            let norm = poles.iter().map(|p| p.norm_sqr()).sum::<f64>().sqrt();
            poles
                .iter()
                .filter(|p| p.im.abs() > EPSILON * norm)
                .map(|p| p.conj())
                .collect()
        } else {
            poles.iter().map(|p| p.conj()).collect()
        };
        poles.extend(conj_poles);

        let num: Complex = poles.iter().map(|p| -p).product();
        let den: Complex = zeros.iter().map(|z| -z).product();
        let mut gain = (num / den).re;
        if order % 2 == 0 {
            gain /= (1.0 + eps_sq).sqrt();
        }

        if !gain.is_finite() || poles.iter().any(|p| !p.is_finite()) {
            return Err(FilterError::SynthesisFailed(format!(
                "non-finite prototype for order {}",
                order
            )));
        }

        Ok(Self { zeros, poles, gain })
    }

    /// Low-pass to low-pass frequency transform, `s → s/ωn`.
    pub fn scale_frequency(&self, natural_frequency: f64) -> Self {
        let relative_degree = self.poles.len() as i32 - self.zeros.len() as i32;
        Self {
            zeros: self.zeros.iter().map(|&z| z * natural_frequency).collect(),
            poles: self.poles.iter().map(|&p| p * natural_frequency).collect(),
            gain: self.gain * natural_frequency.powi(relative_degree),
        }
    }

    /// Expand into numerator and denominator polynomials.
    ///
    /// Zeros and poles come in conjugate pairs, so imaginary parts of the
    /// expanded coefficients are rounding noise and are dropped.
    pub fn to_transfer_function(&self) -> TransferFunction {
        let numerator = poly_from_roots(&self.zeros)
            .iter()
            .map(|c| self.gain * c.re)
            .collect();
        let denominator = poly_from_roots(&self.poles).iter().map(|c| c.re).collect();
        TransferFunction::new(numerator, denominator)
    }
}

/// Elliptic low-pass transfer function with its passband edge at
/// `natural_frequency`.
pub fn synthesize(
    order: usize,
    ripple_db: f64,
    attenuation_db: f64,
    natural_frequency: f64,
) -> FilterResult<TransferFunction> {
    check_positive(natural_frequency, "natural frequency")?;
    let prototype = AnalogPrototype::elliptic(order, ripple_db, attenuation_db)?;
    Ok(prototype.scale_frequency(natural_frequency).to_transfer_function())
}
