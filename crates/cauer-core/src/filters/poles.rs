//! Pole classification and conjugate-pair folding
//!
//! A real-coefficient transfer function has real poles and complex poles in
//! conjugate pairs. The time response of a pair is
//!
//! ```text
//! r·e^(p·t) + r̄·e^(p̄·t) = 2·Re(r·e^(p·t))
//! ```
//!
//! so each pair is stored once, as its upper-half-plane member with the
//! residue doubled. Summing `Re(c·e^(p·t))` over the folded set reproduces the
//! full response.

use super::traits::PoleResidueTerm;
use crate::types::{Complex, FilterError, FilterResult};

/// Default `|Im p|` below which a pole counts as real.
pub const DEFAULT_REAL_POLE_TOLERANCE: f64 = 1e-6;

/// Real poles and folded conjugate pairs, index-aligned with their
/// coefficients.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoleClassification {
    pub real_poles: Vec<f64>,
    pub real_coeffs: Vec<f64>,
    /// Upper-half-plane member of each conjugate pair
    pub complex_poles: Vec<Complex>,
    /// Residues of `complex_poles`, doubled
    pub complex_coeffs: Vec<Complex>,
}

impl PoleClassification {
    /// Number of poles represented: `real + 2·complex`.
    #[inline]
    pub fn model_order(&self) -> usize {
        self.real_poles.len() + 2 * self.complex_poles.len()
    }
}

/// Split terms into real poles and folded conjugate pairs.
///
/// Input order is preserved within each collection. Returns
/// [`FilterError::UnpairedComplexPole`] if the poles above and below the real
/// axis do not pair up one to one.
pub fn classify(terms: &[PoleResidueTerm], tolerance: f64) -> FilterResult<PoleClassification> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(FilterError::InvalidSpec(format!(
            "real pole tolerance must be positive, got {}",
            tolerance
        )));
    }

    let mut out = PoleClassification::default();
    let mut lower = 0;

    for term in terms {
        let im = term.pole.im;
        if im.abs() < tolerance {
            out.real_poles.push(term.pole.re);
            out.real_coeffs.push(term.residue.re);
        } else if im >= tolerance {
            out.complex_poles.push(term.pole);
            out.complex_coeffs.push(term.residue * 2.0);
        } else {
            // Conjugate partner
            lower += 1;
        }
    }

    if out.complex_poles.len() != lower {
        return Err(FilterError::UnpairedComplexPole {
            upper: out.complex_poles.len(),
            lower,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn term(pole: (f64, f64), residue: (f64, f64)) -> PoleResidueTerm {
        PoleResidueTerm {
            pole: Complex::new(pole.0, pole.1),
            residue: Complex::new(residue.0, residue.1),
        }
    }

    #[test]
    fn test_classify_mixed() {
        let terms = [
            term((-1.0, 2.0), (0.5, -0.25)),
            term((-1.0, -2.0), (0.5, 0.25)),
            term((-3.0, 1e-9), (0.75, 1e-12)),
        ];
        let c = classify(&terms, DEFAULT_REAL_POLE_TOLERANCE).unwrap();

        assert_eq!(c.real_poles, vec![-3.0]);
        assert_eq!(c.real_coeffs, vec![0.75]);
        assert_eq!(c.complex_poles, vec![Complex::new(-1.0, 2.0)]);
        assert_relative_eq!(c.complex_coeffs[0].re, 1.0);
        assert_relative_eq!(c.complex_coeffs[0].im, -0.5);
        assert_eq!(c.model_order(), 3);
    }

    #[test]
    fn test_folded_sum_matches_full_sum() {
        let terms = [
            term((-0.5, 3.0), (0.2, 0.7)),
            term((-0.5, -3.0), (0.2, -0.7)),
            term((-2.0, 0.0), (1.3, 0.0)),
        ];
        let c = classify(&terms, DEFAULT_REAL_POLE_TOLERANCE).unwrap();

        for &t in &[0.0, 0.1, 0.8, 2.5] {
            let full: Complex = terms.iter().map(|x| x.residue * (x.pole * t).exp()).sum();
            let folded: f64 = c
                .complex_poles
                .iter()
                .zip(&c.complex_coeffs)
                .map(|(&p, &k)| (k * (p * t).exp()).re)
                .chain(
                    c.real_poles
                        .iter()
                        .zip(&c.real_coeffs)
                        .map(|(p, k)| k * (p * t).exp()),
                )
                .sum();
            assert!(full.im.abs() < 1e-12);
            assert_relative_eq!(full.re, folded, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tolerance_controls_real_split() {
        let terms = [term((-1.0, 1e-4), (1.0, 0.0))];
        assert_eq!(classify(&terms, 1e-3).unwrap().real_poles.len(), 1);
        // With a tighter tolerance the same pole is an unpaired upper member
        assert_eq!(
            classify(&terms, 1e-6),
            Err(FilterError::UnpairedComplexPole { upper: 1, lower: 0 })
        );
    }

    #[test]
    fn test_unpaired_lower_pole() {
        let terms = [term((-1.0, -2.0), (1.0, 0.0))];
        assert_eq!(
            classify(&terms, DEFAULT_REAL_POLE_TOLERANCE),
            Err(FilterError::UnpairedComplexPole { upper: 0, lower: 1 })
        );
    }

    #[test]
    fn test_order_preserved() {
        let terms = [
            term((-4.0, 0.0), (1.0, 0.0)),
            term((-1.0, 0.0), (2.0, 0.0)),
            term((-2.0, 0.0), (3.0, 0.0)),
        ];
        let c = classify(&terms, DEFAULT_REAL_POLE_TOLERANCE).unwrap();
        assert_eq!(c.real_poles, vec![-4.0, -1.0, -2.0]);
        assert_eq!(c.real_coeffs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(classify(&[], 0.0).is_err());
        assert!(classify(&[], f64::NAN).is_err());
        assert!(classify(&[], 1e-6).unwrap().real_poles.is_empty());
    }
}
