//! Elliptic Integrals and Jacobi Elliptic Functions
//!
//! The special functions behind elliptic (Cauer) filter design.
//!
//! All functions use the *parameter* convention `m = k²`, where `k` is the
//! elliptic modulus.
//!
//! ## Complete Elliptic Integral
//!
//! `K(m)` is computed from the arithmetic-geometric mean:
//!
//! ```text
//! K(m) = π / (2 · AGM(1, √(1 - m)))
//! ```
//!
//! [`ellipkm1`] takes the complementary parameter `p = 1 - m` directly so that
//! `K` stays accurate when `m` is within rounding distance of 1 (stopband
//! attenuations of 100 dB and more push the discrimination factor there).
//!
//! ## Jacobi Functions
//!
//! [`ellipj`] evaluates `sn`, `cn`, `dn` and the amplitude `φ` by the
//! descending Landen / AGM recurrence, with series expansions near `m = 0`
//! and `m = 1`.

use crate::types::{Complex, FilterError, FilterResult};
use std::f64::consts::{FRAC_PI_2, PI};

/// Machine epsilon used by the AGM recurrence in [`ellipj`].
const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// Terms kept in the nome series of [`ellipdeg`].
const ELLIPDEG_MMAX: i32 = 7;

/// Iteration cap for the Landen sequence in [`arc_jac_sn`].
const ARC_JAC_SN_MAXITER: usize = 10;

/// Values of the Jacobi elliptic functions at one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiElliptic {
    pub sn: f64,
    pub cn: f64,
    pub dn: f64,
    /// Amplitude φ, with `sn = sin φ` and `cn = cos φ`
    pub ph: f64,
}

fn agm(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a, b);
    for _ in 0..64 {
        if (a - b).abs() <= f64::EPSILON * a {
            break;
        }
        let next = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next;
    }
    a
}

/// Complete elliptic integral of the first kind, `K(m)`.
///
/// Returns infinity at `m = 1`.
pub fn ellipk(m: f64) -> f64 {
    if m >= 1.0 {
        return f64::INFINITY;
    }
    FRAC_PI_2 / agm(1.0, (1.0 - m).sqrt())
}

/// Complete elliptic integral of the first kind around `m = 1`, `K(1 - p)`.
pub fn ellipkm1(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    FRAC_PI_2 / agm(1.0, p.sqrt())
}

/// Jacobi elliptic functions `sn`, `cn`, `dn` of argument `u` and parameter `m`.
///
/// Returns NaN values for `m` outside `[0, 1]`.
pub fn ellipj(u: f64, m: f64) -> JacobiElliptic {
    if !(0.0..=1.0).contains(&m) || m.is_nan() {
        return JacobiElliptic {
            sn: f64::NAN,
            cn: f64::NAN,
            dn: f64::NAN,
            ph: f64::NAN,
        };
    }

    if m < 1.0e-9 {
        let t = u.sin();
        let b = u.cos();
        let ai = 0.25 * m * (u - t * b);
        return JacobiElliptic {
            sn: t - ai * b,
            cn: b + ai * t,
            dn: 1.0 - 0.5 * m * t * t,
            ph: u - ai,
        };
    }

    if m >= 0.999_999_999_9 {
        let mut ai = 0.25 * (1.0 - m);
        let b = u.cosh();
        let t = u.tanh();
        let phi = 1.0 / b;
        let twon = b * u.sinh();
        let sn = t + ai * (twon - u) / (b * b);
        let ph = 2.0 * u.exp().atan() - FRAC_PI_2 + ai * (twon - u) / b;
        ai *= t * phi;
        return JacobiElliptic {
            sn,
            cn: phi - ai * (twon - u),
            dn: phi + ai * (twon + u),
            ph,
        };
    }

    // AGM scale
    let mut a = [0.0_f64; 9];
    let mut c = [0.0_f64; 9];
    a[0] = 1.0;
    c[0] = m.sqrt();
    let mut b = (1.0 - m).sqrt();
    let mut twon = 1.0;
    let mut i = 0;

    while (c[i] / a[i]).abs() > MACHEP && i < 8 {
        let ai = a[i];
        i += 1;
        c[i] = 0.5 * (ai - b);
        let t = (ai * b).sqrt();
        a[i] = 0.5 * (ai + b);
        b = t;
        twon *= 2.0;
    }

    // Backward recurrence for the amplitude
    let mut phi = twon * a[i] * u;
    let mut prev = phi;
    while i > 0 {
        let t = c[i] * phi.sin() / a[i];
        prev = phi;
        phi = 0.5 * (t.asin() + phi);
        i -= 1;
    }

    let t = phi.cos();
    JacobiElliptic {
        sn: phi.sin(),
        cn: t,
        dn: t / (phi - prev).cos(),
        ph: phi,
    }
}

/// Solve the degree equation of an elliptic filter.
///
/// Given the filter order `n` and the discrimination parameter `m1`, returns
/// the selectivity parameter `m` such that `n · K(1-m)/K(m) = K(1-m1)/K(m1)`.
/// Uses the nome series.
pub fn ellipdeg(n: usize, m1: f64) -> f64 {
    let k1 = ellipk(m1);
    let k1p = ellipkm1(m1);

    let q1 = (-PI * k1p / k1).exp();
    let q = q1.powf(1.0 / n as f64);

    let num: f64 = (0..=ELLIPDEG_MMAX).map(|j| q.powi(j * (j + 1))).sum();
    let den: f64 = 1.0 + 2.0 * (1..=ELLIPDEG_MMAX + 1).map(|j| q.powi(j * j)).sum::<f64>();

    16.0 * q * (num / den).powi(4)
}

/// Inverse Jacobi elliptic `sn` for a complex argument.
///
/// Returns `z` such that `sn(z | m) = w`, computed with the descending Landen
/// transformation.
pub fn arc_jac_sn(w: Complex, m: f64) -> FilterResult<Complex> {
    let k = m.sqrt();
    if !(0.0..=1.0).contains(&k) || k.is_nan() {
        return Err(FilterError::SynthesisFailed(format!(
            "inverse sn needs a parameter in [0, 1], got {}",
            m
        )));
    }
    if k == 1.0 {
        return Ok(w.atanh());
    }

    let complement = |kx: Complex| ((1.0 - kx) * (1.0 + kx)).sqrt();

    // Landen sequence of moduli, down to exactly zero
    let mut ks = vec![k];
    while let Some(&last) = ks.last() {
        if last == 0.0 {
            break;
        }
        if ks.len() > ARC_JAC_SN_MAXITER {
            return Err(FilterError::SynthesisFailed(
                "Landen sequence did not converge".to_string(),
            ));
        }
        let kp = ((1.0 - last) * (1.0 + last)).sqrt();
        ks.push((1.0 - kp) / (1.0 + kp));
    }

    let cap_k: f64 = ks[1..].iter().map(|kn| 1.0 + kn).product::<f64>() * FRAC_PI_2;

    let mut wn = w;
    for pair in ks.windows(2) {
        let (kn, knext) = (pair[0], pair[1]);
        wn = 2.0 * wn / ((1.0 + knext) * (1.0 + complement(kn * wn)));
    }

    let u = 2.0 / PI * wn.asin();
    Ok(cap_k * u)
}

/// Real inverse Jacobi elliptic `sc`.
///
/// Returns `u` such that `sc(u | m) = w`, via `sn(j·u | 1-m)`.
pub fn arc_jac_sc1(w: f64, m: f64) -> FilterResult<f64> {
    let z = arc_jac_sn(Complex::new(0.0, w), m)?;
    if z.re.abs() > 1e-14 {
        return Err(FilterError::SynthesisFailed(format!(
            "inverse sc left a real residue of {:e}",
            z.re
        )));
    }
    Ok(z.im)
}
