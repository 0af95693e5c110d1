//! Parallel Batch Design
//!
//! Designs independent filter specs concurrently using Rayon.
//! Enabled by the `parallel` feature (on by default).
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! cauer-core = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Each design is a pure function of its spec, so results are identical to
//! the sequential [`EllipticDesigner`] and are returned in input order. The
//! Aberth root finder and the 2^15-point sweep dominate the cost, so only
//! batches of several filters benefit.

use rayon::prelude::*;

use crate::design::{DesignOptions, EllipticDesigner, FilterDesign, FilterSpec};
use crate::filters::residue::ResidueDecomposer;
use crate::filters::traits::RationalDecomposer;
use crate::types::DesignResult;

/// Parallel front end over an [`EllipticDesigner`].
#[derive(Debug, Clone)]
pub struct ParallelDesigner<D = ResidueDecomposer> {
    designer: EllipticDesigner<D>,
}

impl ParallelDesigner<ResidueDecomposer> {
    pub fn new(options: DesignOptions) -> Self {
        Self {
            designer: EllipticDesigner::new(options),
        }
    }
}

impl<D: RationalDecomposer> ParallelDesigner<D> {
    pub fn from_designer(designer: EllipticDesigner<D>) -> Self {
        Self { designer }
    }

    pub fn designer(&self) -> &EllipticDesigner<D> {
        &self.designer
    }

    /// Design every spec in parallel, keeping failures in place.
    pub fn design_all(&self, specs: &[FilterSpec]) -> Vec<DesignResult<FilterDesign>> {
        specs
            .par_iter()
            .map(|spec| self.designer.design(spec))
            .collect()
    }

    /// Design every spec in parallel; the first failure in input order wins.
    pub fn design_batch(&self, specs: &[FilterSpec]) -> DesignResult<Vec<FilterDesign>> {
        self.design_all(specs).into_iter().collect()
    }
}
