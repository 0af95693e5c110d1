//! Decomposition Traits
//!
//! Partial-fraction expansion is the numerically delicate step of the
//! pipeline, so it sits behind a trait and can be swapped for a
//! higher-precision implementation without touching the rest of the design
//! flow.
//!
//! ## Architecture
//!
//! ```text
//! RationalDecomposer (core trait)
//!    ├── expand()     raw expansion, direct term allowed   [required]
//!    └── decompose()  strictly proper only                 [provided]
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cauer_core::filters::{RationalDecomposer, ResidueDecomposer, TransferFunction};
//!
//! let tf = TransferFunction::new(vec![1.0], vec![1.0, 3.0, 2.0]);
//! let fractions = ResidueDecomposer::default().decompose(&tf)?;
//! assert_eq!(fractions.terms.len(), 2);
//! ```

use super::transfer::TransferFunction;
use crate::types::{Complex, FilterError, FilterResult};

/// One first-order term `residue / (s − pole)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleResidueTerm {
    pub residue: Complex,
    pub pole: Complex,
}

/// `N(s)/D(s) = remainder(s) + Σ residueᵢ / (s − poleᵢ)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialFractions {
    pub terms: Vec<PoleResidueTerm>,
    /// Direct polynomial term in descending powers, empty when strictly proper
    pub remainder: Vec<f64>,
}

impl PartialFractions {
    /// Evaluate the expansion at `s`.
    pub fn eval(&self, s: Complex) -> Complex {
        let direct = super::polynomial::polyval(&self.remainder, s);
        self.terms
            .iter()
            .fold(direct, |acc, t| acc + t.residue / (s - t.pole))
    }
}

/// Partial-fraction expansion of a rational transfer function.
///
/// Implementations must be deterministic: identical input gives identical
/// terms in identical order.
pub trait RationalDecomposer: Send + Sync {
    /// Expand `tf` into first-order terms plus any direct polynomial term.
    fn expand(&self, tf: &TransferFunction) -> FilterResult<PartialFractions>;

    /// Expand `tf`, rejecting any direct term.
    ///
    /// A non-empty remainder means `deg(N) >= deg(D)` and yields
    /// [`FilterError::ImproperTransferFunction`].
    fn decompose(&self, tf: &TransferFunction) -> FilterResult<PartialFractions> {
        let fractions = self.expand(tf)?;
        if fractions.remainder.is_empty() {
            return Ok(fractions);
        }
        Err(FilterError::ImproperTransferFunction {
            numerator_degree: tf.numerator_degree().unwrap_or(0),
            denominator_degree: tf.denominator_degree().unwrap_or(0),
        })
    }
}
