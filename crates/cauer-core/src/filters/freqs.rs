//! Analog Frequency Response
//!
//! Evaluates `H(jω)` of a [`TransferFunction`] on a frequency grid and
//! locates the achieved stopband edge.
//!
//! ## Automatic Grid
//!
//! [`find_freqs`] picks a log-spaced grid from the pole and zero locations:
//!
//! ```text
//! upper decade = round(log10(max(3·|Re e| + 1.5·Im e)) + 0.5)
//! lower decade = round(log10(0.1·min(|Re e| + 2·Im e)) − 0.5)
//! ```
//!
//! over the poles in the upper half plane plus the finite zeros
//! (`|z| < 1e5`) in the upper half plane. Singularities at the origin are
//! shifted by one before taking the real part.

use super::polynomial::{polyval, roots, trim_leading_zeros};
use super::transfer::TransferFunction;
use crate::types::{Complex, FilterError, FilterResult};
use std::f64::consts::PI;

/// Sweep size used when measuring the stopband edge (2^15).
pub const DEFAULT_SWEEP_POINTS: usize = 32768;

/// Magnitude and phase of an analog response.
#[derive(Debug, Clone, PartialEq)]
pub struct BodeResponse {
    /// Angular frequencies (rad/s)
    pub frequencies: Vec<f64>,
    /// `20·log10|H(jω)|`
    pub magnitude_db: Vec<f64>,
    /// Unwrapped phase in degrees
    pub phase_deg: Vec<f64>,
}

/// `H(jω)` at each angular frequency.
pub fn frequency_response(tf: &TransferFunction, frequencies: &[f64]) -> Vec<Complex> {
    let num = trim_leading_zeros(&tf.numerator);
    let den = trim_leading_zeros(&tf.denominator);
    frequencies
        .iter()
        .map(|&w| {
            let s = Complex::new(0.0, w);
            polyval(num, s) / polyval(den, s)
        })
        .collect()
}

/// Magnitude in dB and unwrapped phase in degrees.
pub fn bode(tf: &TransferFunction, frequencies: &[f64]) -> BodeResponse {
    let response = frequency_response(tf, frequencies);
    let magnitude_db = response.iter().map(|h| 20.0 * h.norm().log10()).collect();
    let wrapped: Vec<f64> = response.iter().map(|h| h.arg()).collect();
    let phase_deg = unwrap_phase(&wrapped)
        .into_iter()
        .map(f64::to_degrees)
        .collect();

    BodeResponse {
        frequencies: frequencies.to_vec(),
        magnitude_db,
        phase_deg,
    }
}

/// Remove 2π jumps between consecutive phase samples.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(phase.len());
    let mut correction = 0.0;

    for (i, &p) in phase.iter().enumerate() {
        if i > 0 {
            let dd = p - phase[i - 1];
            if dd.abs() >= PI {
                let mut ddmod = (dd + PI).rem_euclid(2.0 * PI) - PI;
                if ddmod == -PI && dd > 0.0 {
                    ddmod = PI;
                }
                correction += ddmod - dd;
            }
        }
        out.push(p + correction);
    }

    out
}

/// `points` log-spaced frequencies from `10^start` to `10^stop` inclusive.
pub fn log_space(start_decade: f64, stop_decade: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_decade)],
        _ => {
            let step = (stop_decade - start_decade) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i == points - 1 {
                        10f64.powf(stop_decade)
                    } else {
                        10f64.powf(start_decade + step * i as f64)
                    }
                })
                .collect()
        }
    }
}

/// Rounds half-way cases to the nearest even integer.
fn round_half_even(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        x.round()
    }
}

/// Frequency grid covering the interesting region of a response.
pub fn find_freqs(tf: &TransferFunction, points: usize) -> Vec<f64> {
    let mut poles = roots(&tf.denominator);
    if poles.is_empty() {
        poles.push(Complex::new(-1000.0, 0.0));
    }
    let zeros = roots(&tf.numerator);

    let mut ez: Vec<Complex> = poles.into_iter().filter(|p| p.im >= 0.0).collect();
    ez.extend(zeros.into_iter().filter(|z| z.norm() < 1e5 && z.im >= 0.0));
    if ez.is_empty() {
        ez.push(Complex::new(-1000.0, 0.0));
    }

    let shifted = |e: &Complex| {
        let integ = if e.norm() < 1e-10 { 1.0 } else { 0.0 };
        (e.re + integ).abs()
    };

    let high = ez
        .iter()
        .map(|e| 3.0 * shifted(e) + 1.5 * e.im)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = ez
        .iter()
        .map(|e| shifted(e) + 2.0 * e.im)
        .fold(f64::INFINITY, f64::min);

    let stop_decade = round_half_even(high.log10() + 0.5);
    let start_decade = round_half_even((0.1 * low).log10() - 0.5);

    log_space(start_decade, stop_decade, points)
}

/// First frequency at which the response falls to `-attenuation_db` or below.
///
/// Sweeps the [`find_freqs`] grid in ascending order. Returns
/// [`FilterError::StopbandNotReached`] if the attenuation is never reached.
pub fn measure_stopband(
    tf: &TransferFunction,
    attenuation_db: f64,
    points: usize,
) -> FilterResult<f64> {
    if !(attenuation_db.is_finite() && attenuation_db > 0.0) {
        return Err(FilterError::InvalidSpec(format!(
            "stopband attenuation must be positive, got {}",
            attenuation_db
        )));
    }
    if points < 2 {
        return Err(FilterError::InvalidSpec(format!(
            "frequency sweep needs at least 2 points, got {}",
            points
        )));
    }
    if trim_leading_zeros(&tf.denominator).is_empty() {
        return Err(FilterError::ZeroDenominator);
    }

    let grid = find_freqs(tf, points);
    let num = trim_leading_zeros(&tf.numerator);
    let den = trim_leading_zeros(&tf.denominator);

    grid.iter()
        .copied()
        .find(|&w| {
            let s = Complex::new(0.0, w);
            let h = polyval(num, s) / polyval(den, s);
            20.0 * h.norm().log10() <= -attenuation_db
        })
        .ok_or_else(|| FilterError::StopbandNotReached {
            attenuation_db,
            max_frequency: grid.last().copied().unwrap_or(0.0),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::elliptic::synthesize;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_order_response() {
        // 1/(s + 1): -3.01 dB and -45° at ω = 1
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let resp = bode(&tf, &[1.0]);
        assert_relative_eq!(resp.magnitude_db[0], -10.0 * 2f64.log10(), epsilon = 1e-12);
        assert_relative_eq!(resp.phase_deg[0], -45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_unwrapped() {
        // Fourth-order all-pole lag passes -180°
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        let grid = log_space(-2.0, 2.0, 200);
        let resp = bode(&tf, &grid);
        let last = *resp.phase_deg.last().unwrap();
        assert!(last < -300.0, "phase at high frequency: {}", last);
        assert!(resp.phase_deg.windows(2).all(|w| (w[1] - w[0]).abs() < 180.0));
    }

    #[test]
    fn test_unwrap_phase() {
        let wrapped = [3.0, -3.0, 3.0];
        let unwrapped = unwrap_phase(&wrapped);
        assert_relative_eq!(unwrapped[1], -3.0 + 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(unwrapped[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_log_space() {
        let grid = log_space(0.0, 2.0, 3);
        assert_eq!(grid, vec![1.0, 10.0, 100.0]);
        assert!(log_space(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(3.5), 4.0);
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(5.5036), 6.0);
    }

    #[test]
    fn test_find_freqs_fast_grid() {
        let tf = synthesize(11, 0.1, 97.5, 20000.0).unwrap();
        let grid = find_freqs(&tf, DEFAULT_SWEEP_POINTS);
        assert_eq!(grid.len(), DEFAULT_SWEEP_POINTS);
        assert_relative_eq!(grid[0], 1e2, max_relative = 1e-12);
        assert_relative_eq!(grid[DEFAULT_SWEEP_POINTS - 1], 1e6, max_relative = 1e-12);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_measure_stopband_fast() {
        let tf = synthesize(11, 0.1, 97.5, 20000.0).unwrap();
        let edge = measure_stopband(&tf, 97.5, DEFAULT_SWEEP_POINTS).unwrap();
        assert_relative_eq!(edge, 24168.597105037978, max_relative = 1e-9);
    }

    #[test]
    fn test_measure_stopband_small() {
        let tf = synthesize(5, 0.5, 40.0, 1.0).unwrap();
        let edge = measure_stopband(&tf, 40.0, DEFAULT_SWEEP_POINTS).unwrap();
        assert_relative_eq!(edge, 1.2728289453721577, max_relative = 1e-9);
        assert!(edge > 1.0 && edge <= 1.5);
    }

    #[test]
    fn test_stopband_not_reached() {
        // A first-order lag never reaches 200 dB within its grid
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let err = measure_stopband(&tf, 200.0, 1024).unwrap_err();
        assert!(matches!(err, FilterError::StopbandNotReached { .. }));
    }

    #[test]
    fn test_measure_stopband_rejects_bad_input() {
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        assert!(matches!(
            measure_stopband(&tf, 40.0, 1),
            Err(FilterError::InvalidSpec(_))
        ));
        let zero = TransferFunction::new(vec![1.0], vec![0.0, 0.0]);
        assert_eq!(
            measure_stopband(&zero, 40.0, 64),
            Err(FilterError::ZeroDenominator)
        );
    }
}
