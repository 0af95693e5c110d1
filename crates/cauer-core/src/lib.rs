//! # Cauer: Elliptic Low-Pass Design to Pole–Residue Tables
//!
//! This crate designs analog elliptic (Cauer) low-pass filters from band-edge,
//! ripple and attenuation specifications and converts each transfer function
//! into a folded partial-fraction form for direct time-domain synthesis, such
//! as band-limited step and impulse segments in an audio DSP pipeline.
//!
//! ## Pipeline
//!
//! ```text
//! FilterSpec ─► order estimate ─► H(s) ─► stopband sweep ─► residues ─► folding ─► FilterDesign
//!                                                                                     │
//!                                                         CppHeaderEmitter / JsonEmitter
//! ```
//!
//! Summing `Re(c·e^(p·t))` over the folded poles of a [`FilterDesign`]
//! reproduces the filter's impulse response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cauer_core::prelude::*;
//!
//! let designer = EllipticDesigner::new(DesignOptions::default());
//! let designs = designer
//!     .design_batch(&[FilterSpec::fast(), FilterSpec::best()])
//!     .expect("both specs are realizable");
//!
//! let header = CppHeaderEmitter.render(&designs).expect("names are identifiers");
//! println!("{}", header);
//! ```

pub mod config;
pub mod design;
pub mod emit;
pub mod filters;
pub mod observe;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod types;

pub use config::{ConfigError, DesignConfig};
pub use design::{DesignOptions, EllipticDesigner, FilterDesign, FilterSpec};
pub use emit::{CppHeaderEmitter, DesignEmitter, EmitError, JsonEmitter};
pub use filters::{
    PartialFractions, PoleResidueTerm, RationalDecomposer, ResidueDecomposer, TransferFunction,
};
#[cfg(feature = "parallel")]
pub use parallel::ParallelDesigner;
pub use types::{Complex, DesignError, DesignResult, FilterError, FilterResult};

/// Common imports.
pub mod prelude {
    pub use crate::design::{DesignOptions, EllipticDesigner, FilterDesign, FilterSpec};
    pub use crate::emit::{CppHeaderEmitter, DesignEmitter, JsonEmitter};
    pub use crate::filters::{RationalDecomposer, ResidueDecomposer, TransferFunction};
    #[cfg(feature = "parallel")]
    pub use crate::parallel::ParallelDesigner;
    pub use crate::types::{Complex, DesignError, FilterError};
}
