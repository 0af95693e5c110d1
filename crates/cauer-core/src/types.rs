//! Core types for elliptic filter design
//!
//! This module defines the numeric aliases and error types shared by every
//! stage of the design pipeline.
//!
//! ## Two Error Layers
//!
//! Each numerical stage (estimator, synthesizer, measurer, decomposer,
//! classifier) reports a [`FilterError`]. Stages know nothing about which
//! named filter they are working on, so the pipeline wraps the stage error in
//! a [`DesignError`] that carries the filter's name:
//!
//! ```text
//!   measure_stopband() ──► FilterError::StopbandNotReached
//!                                   │
//!   EllipticDesigner::design() ─────┴──► DesignError { name: "Fast", .. }
//! ```

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// Result type for a single pipeline stage
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type for a complete named design
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors raised by an individual design stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid filter spec: {0}")]
    InvalidSpec(String),

    #[error("elliptic synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("stopband attenuation of {attenuation_db} dB not reached below {max_frequency} rad/s")]
    StopbandNotReached { attenuation_db: f64, max_frequency: f64 },

    #[error("denominator polynomial is zero")]
    ZeroDenominator,

    #[error(
        "non-proper transfer function; direct-term residue present \
         (numerator degree {numerator_degree} >= denominator degree {denominator_degree})"
    )]
    ImproperTransferFunction {
        numerator_degree: usize,
        denominator_degree: usize,
    },

    #[error("unexpected repeated pole near {pole} (separation {distance:e})")]
    UnexpectedRepeatedPole { pole: Complex, distance: f64 },

    #[error("complex poles are not in conjugate pairs: {upper} above the real axis, {lower} below")]
    UnpairedComplexPole { upper: usize, lower: usize },

    #[error("pole accounting mismatch: order {order}, but real + 2*complex = {accounted}")]
    PoleCountMismatch { order: usize, accounted: usize },
}

/// A stage failure attributed to a named filter spec.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("filter '{name}': {source}")]
pub struct DesignError {
    /// Name of the filter spec that failed
    pub name: String,
    /// The stage error
    #[source]
    pub source: FilterError,
}

impl DesignError {
    pub fn new(name: impl Into<String>, source: FilterError) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// The underlying stage error.
    pub fn kind(&self) -> &FilterError {
        &self.source
    }
}
