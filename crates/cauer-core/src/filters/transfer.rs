//! Rational transfer functions `H(s) = N(s) / D(s)`

use super::polynomial::{degree, polyval, trim_leading_zeros};
use crate::types::Complex;

/// Analog transfer function with coefficients in descending powers of `s`.
///
/// The denominator need not be monic. Properness is not enforced here; the
/// residue decomposer checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

impl TransferFunction {
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Degree of the numerator after trimming leading zeros.
    pub fn numerator_degree(&self) -> Option<usize> {
        degree(&self.numerator)
    }

    /// Degree of the denominator after trimming leading zeros.
    pub fn denominator_degree(&self) -> Option<usize> {
        degree(&self.denominator)
    }

    /// True when `deg(N) < deg(D)`, i.e. no direct term.
    pub fn is_strictly_proper(&self) -> bool {
        match (self.numerator_degree(), self.denominator_degree()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(n), Some(d)) => n < d,
        }
    }

    /// Evaluate `H(s)` at a complex point.
    pub fn eval(&self, s: Complex) -> Complex {
        polyval(trim_leading_zeros(&self.numerator), s)
            / polyval(trim_leading_zeros(&self.denominator), s)
    }

    /// Leading-coefficient ratio `b0 / a0` of the trimmed polynomials.
    ///
    /// For a strictly proper function of relative degree one this is the
    /// impulse response at `t = 0⁺`.
    pub fn leading_ratio(&self) -> Option<f64> {
        let num = trim_leading_zeros(&self.numerator);
        let den = trim_leading_zeros(&self.denominator);
        Some(*num.first()? / *den.first()?)
    }
}
