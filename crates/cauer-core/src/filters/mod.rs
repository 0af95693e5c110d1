//! Analog Elliptic Filters and Their Partial-Fraction Form
//!
//! This module provides the numerical stages of the design pipeline:
//!
//! - **Special functions** (`jacobi`): `K(m)`, Jacobi `sn/cn/dn`, degree equation
//! - **Polynomials** (`polynomial`): Horner evaluation, long division, roots
//! - **Synthesis** (`elliptic`): order estimate and transfer function
//! - **Frequency response** (`freqs`): `H(jω)`, Bode data, stopband edge
//! - **Decomposition** (`residue`, `traits`): first-order pole/residue terms
//! - **Folding** (`poles`): real poles and one member per conjugate pair
//!
//! ## Why Pole–Residue Form?
//!
//! A strictly proper `H(s)` with simple poles has the impulse response
//!
//! ```text
//! h(t) = Σ rᵢ · e^(pᵢ·t)
//! ```
//!
//! Each term is a one-pole complex resonator, so a band-limited step or
//! impulse can be synthesized at any fractional time offset without running
//! the filter at a high sample rate.

pub mod elliptic;
pub mod freqs;
pub mod jacobi;
pub mod poles;
pub mod polynomial;
pub mod residue;
pub mod traits;
pub mod transfer;

pub use elliptic::{estimate_order, order_bound, synthesize, AnalogPrototype};
pub use freqs::{
    bode, find_freqs, frequency_response, measure_stopband, BodeResponse, DEFAULT_SWEEP_POINTS,
};
pub use poles::{classify, PoleClassification, DEFAULT_REAL_POLE_TOLERANCE};
pub use residue::{ResidueDecomposer, DEFAULT_REPEATED_POLE_TOLERANCE};
pub use traits::{PartialFractions, PoleResidueTerm, RationalDecomposer};
pub use transfer::TransferFunction;
