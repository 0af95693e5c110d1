//! Residue expansion for simple poles
//!
//! For a denominator with distinct roots `p₁ … pₙ` and leading coefficient
//! `a₀`, the residue at `pᵢ` is
//!
//! ```text
//! rᵢ = N(pᵢ) / (a₀ · Π_{j≠i} (pᵢ − pⱼ))
//! ```
//!
//! Repeated poles are out of scope and reported as an error instead of being
//! expanded into higher-order terms.

use super::polynomial::{polydiv, polyval, roots, trim_leading_zeros};
use super::traits::{PartialFractions, PoleResidueTerm, RationalDecomposer};
use super::transfer::TransferFunction;
use crate::types::{Complex, FilterError, FilterResult};
use std::cmp::Ordering;

/// Default pole separation, relative to the larger pole magnitude, at or
/// below which two poles count as repeated.
///
/// A numerically computed double root splits by about `1e-8` relative, while
/// distinct elliptic poles stay more than `1e-3` apart at any frequency scale.
pub const DEFAULT_REPEATED_POLE_TOLERANCE: f64 = 1e-6;

/// Partial-fraction expansion via polynomial roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueDecomposer {
    /// Relative pole separation treated as a repeated pole
    pub repeated_pole_tolerance: f64,
}

impl Default for ResidueDecomposer {
    fn default() -> Self {
        Self {
            repeated_pole_tolerance: DEFAULT_REPEATED_POLE_TOLERANCE,
        }
    }
}

impl ResidueDecomposer {
    pub fn new(repeated_pole_tolerance: f64) -> Self {
        Self {
            repeated_pole_tolerance,
        }
    }

    fn check_distinct(&self, poles: &[Complex]) -> FilterResult<()> {
        for (i, &a) in poles.iter().enumerate() {
            for &b in &poles[i + 1..] {
                let distance = (a - b).norm();
                if distance <= self.repeated_pole_tolerance * a.norm().max(b.norm()) {
                    return Err(FilterError::UnexpectedRepeatedPole { pole: a, distance });
                }
            }
        }
        Ok(())
    }
}

/// Deterministic order: magnitude, then imaginary part, then real part.
fn term_order(a: &PoleResidueTerm, b: &PoleResidueTerm) -> Ordering {
    a.pole
        .norm()
        .total_cmp(&b.pole.norm())
        .then(a.pole.im.total_cmp(&b.pole.im))
        .then(a.pole.re.total_cmp(&b.pole.re))
}

impl RationalDecomposer for ResidueDecomposer {
    fn expand(&self, tf: &TransferFunction) -> FilterResult<PartialFractions> {
        let den = trim_leading_zeros(&tf.denominator);
        if den.is_empty() {
            return Err(FilterError::ZeroDenominator);
        }
        let num = trim_leading_zeros(&tf.numerator);

        let (remainder, proper) = if num.len() >= den.len() {
            polydiv(num, den)
        } else {
            (Vec::new(), num.to_vec())
        };

        let poles = roots(den);
        self.check_distinct(&poles)?;

        let lead = den[0];
        let mut terms: Vec<PoleResidueTerm> = poles
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let spread: Complex = poles
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &q)| p - q)
                    .product();
                PoleResidueTerm {
                    residue: polyval(&proper, p) / (spread * lead),
                    pole: p,
                }
            })
            .collect();

        terms.sort_by(term_order);

        Ok(PartialFractions { terms, remainder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_real_poles() {
        // 1/((s+1)(s+2)) = 1/(s+1) - 1/(s+2)
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 3.0, 2.0]);
        let pf = ResidueDecomposer::default().decompose(&tf).unwrap();
        assert_eq!(pf.terms.len(), 2);
        assert!(pf.remainder.is_empty());

        assert_relative_eq!(pf.terms[0].pole.re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(pf.terms[0].residue.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pf.terms[1].pole.re, -2.0, epsilon = 1e-12);
        assert_relative_eq!(pf.terms[1].residue.re, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_pair_residues_are_conjugate() {
        // (s + 3) / (s² + 2s + 5), non-monic denominator
        let tf = TransferFunction::new(vec![2.0, 6.0], vec![2.0, 4.0, 10.0]);
        let pf = ResidueDecomposer::default().decompose(&tf).unwrap();
        assert_eq!(pf.terms.len(), 2);

        // Equal magnitude, so ordered by imaginary part
        let (lower, upper) = (pf.terms[0], pf.terms[1]);
        assert!(lower.pole.im < 0.0 && upper.pole.im > 0.0);
        assert_relative_eq!(upper.residue.re, lower.residue.re, epsilon = 1e-12);
        assert_relative_eq!(upper.residue.im, -lower.residue.im, epsilon = 1e-12);
        // r = (p + 3) / (p - p̄) at p = -1 + 2j → (2 + 2j) / 4j
        assert_relative_eq!(upper.residue.re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(upper.residue.im, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_expansion_reproduces_function() {
        let tf = TransferFunction::new(vec![1.0, 0.0, 4.0], vec![1.0, 5.0, 13.0, 19.0, 10.0]);
        let pf = ResidueDecomposer::default().decompose(&tf).unwrap();
        for &s in &[Complex::new(0.0, 0.7), Complex::new(1.5, -2.0), Complex::new(-0.3, 0.0)] {
            let direct = tf.eval(s);
            let expanded = pf.eval(s);
            assert_relative_eq!(direct.re, expanded.re, epsilon = 1e-10);
            assert_relative_eq!(direct.im, expanded.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_improper_has_remainder() {
        // (s² + 1) / (s² + 3s + 2) = 1 + (-3s - 1)/(s² + 3s + 2)
        let tf = TransferFunction::new(vec![1.0, 0.0, 1.0], vec![1.0, 3.0, 2.0]);
        let pf = ResidueDecomposer::default().expand(&tf).unwrap();
        assert_eq!(pf.remainder, vec![1.0]);

        let err = ResidueDecomposer::default().decompose(&tf).unwrap_err();
        assert_eq!(
            err,
            FilterError::ImproperTransferFunction {
                numerator_degree: 2,
                denominator_degree: 2,
            }
        );
    }

    #[test]
    fn test_leading_zeros_do_not_make_improper() {
        let tf = TransferFunction::new(vec![0.0, 0.0, 1.0], vec![1.0, 1.0]);
        assert!(ResidueDecomposer::default().decompose(&tf).is_ok());
    }

    #[test]
    fn test_zero_denominator() {
        let tf = TransferFunction::new(vec![1.0], vec![0.0, 0.0]);
        assert_eq!(
            ResidueDecomposer::default().expand(&tf),
            Err(FilterError::ZeroDenominator)
        );
    }

    #[test]
    fn test_repeated_pole_rejected() {
        // 1/(s+1)²
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 2.0, 1.0]);
        let err = ResidueDecomposer::default().decompose(&tf).unwrap_err();
        assert!(matches!(err, FilterError::UnexpectedRepeatedPole { .. }));
    }

    #[test]
    fn test_repeated_pole_tolerance_is_configurable() {
        // Poles at -1 and -1.01
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 2.01, 1.01]);
        assert!(ResidueDecomposer::new(1e-3).decompose(&tf).is_ok());
        assert!(ResidueDecomposer::new(0.1).decompose(&tf).is_err());
    }

    #[test]
    fn test_repeated_pole_check_is_scale_free() {
        // Same pole pattern at 1 rad/s and at 1e-4 rad/s
        for scale in [1.0, 1e-4] {
            let den = [1.0, 2.01 * scale, 1.01 * scale * scale];
            let tf = TransferFunction::new(vec![1.0], den.to_vec());
            assert!(ResidueDecomposer::default().decompose(&tf).is_ok(), "scale {}", scale);

            let double = [1.0, 2.0 * scale, scale * scale];
            let tf = TransferFunction::new(vec![1.0], double.to_vec());
            assert!(
                matches!(
                    ResidueDecomposer::default().decompose(&tf),
                    Err(FilterError::UnexpectedRepeatedPole { .. })
                ),
                "scale {}",
                scale
            );
        }
    }

    #[test]
    fn test_deterministic_order() {
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 5.0, 13.0, 19.0, 10.0]);
        let a = ResidueDecomposer::default().decompose(&tf).unwrap();
        let b = ResidueDecomposer::default().decompose(&tf).unwrap();
        assert_eq!(a, b);
        let mags: Vec<f64> = a.terms.iter().map(|t| t.pole.norm()).collect();
        assert!(mags.windows(2).all(|w| w[0] <= w[1]));
    }
}
