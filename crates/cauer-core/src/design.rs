//! Design Pipeline
//!
//! Turns a named low-pass specification into a folded pole–residue table.
//!
//! ```text
//! FilterSpec
//!    │ estimate_order()        minimal N, ωn
//!    │ synthesize()            H(s) = N(s)/D(s)
//!    │ measure_stopband()      achieved stopband edge
//!    │ RationalDecomposer      Σ rᵢ/(s − pᵢ), proper only
//!    │ classify()              real poles, folded conjugate pairs
//!    ▼
//! FilterDesign (immutable)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use cauer_core::design::{DesignOptions, EllipticDesigner, FilterSpec};
//!
//! let designer = EllipticDesigner::new(DesignOptions::default());
//! let design = designer.design(&FilterSpec::fast())?;
//! assert_eq!(design.order(), 11);
//! ```

use crate::filters::elliptic::{estimate_order, synthesize};
use crate::filters::freqs::{measure_stopband, DEFAULT_SWEEP_POINTS};
use crate::filters::poles::{classify, PoleClassification, DEFAULT_REAL_POLE_TOLERANCE};
use crate::filters::residue::{ResidueDecomposer, DEFAULT_REPEATED_POLE_TOLERANCE};
use crate::filters::traits::RationalDecomposer;
use crate::types::{Complex, DesignError, DesignResult, FilterError, FilterResult};
use serde::{Deserialize, Serialize};

/// A named analog low-pass specification.
///
/// Edges are angular frequencies in any consistent unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: String,
    pub passband_edge: f64,
    pub stopband_edge: f64,
    pub passband_ripple_db: f64,
    pub stopband_attenuation_db: f64,
}

impl FilterSpec {
    pub fn new(
        name: impl Into<String>,
        passband_edge: f64,
        stopband_edge: f64,
        passband_ripple_db: f64,
        stopband_attenuation_db: f64,
    ) -> Self {
        Self {
            name: name.into(),
            passband_edge,
            stopband_edge,
            passband_ripple_db,
            stopband_attenuation_db,
        }
    }

    /// Moderate anti-aliasing low-pass: 20k → 25k, 0.1 dB ripple, 97.5 dB.
    pub fn fast() -> Self {
        Self::new("Fast", 20000.0, 25000.0, 0.1, 97.5)
    }

    /// Steep anti-aliasing low-pass: 20k → 21k, 0.1 dB ripple, 180 dB.
    pub fn best() -> Self {
        Self::new("Best", 20000.0, 21000.0, 0.1, 180.0)
    }

    /// Check the band edges, ripple and attenuation.
    pub fn validate(&self) -> FilterResult<()> {
        if self.name.trim().is_empty() {
            return Err(FilterError::InvalidSpec("filter name is empty".into()));
        }
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(self.passband_edge) || !finite_positive(self.stopband_edge) {
            return Err(FilterError::InvalidSpec(format!(
                "band edges must be positive and finite, got {} and {}",
                self.passband_edge, self.stopband_edge
            )));
        }
        if self.passband_edge >= self.stopband_edge {
            return Err(FilterError::InvalidSpec(format!(
                "passband edge {} must lie below stopband edge {}",
                self.passband_edge, self.stopband_edge
            )));
        }
        if !finite_positive(self.passband_ripple_db) {
            return Err(FilterError::InvalidSpec(format!(
                "passband ripple must be positive, got {} dB",
                self.passband_ripple_db
            )));
        }
        if !finite_positive(self.stopband_attenuation_db) {
            return Err(FilterError::InvalidSpec(format!(
                "stopband attenuation must be positive, got {} dB",
                self.stopband_attenuation_db
            )));
        }
        Ok(())
    }
}

/// Numerical knobs of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignOptions {
    /// `|Im p|` below which a pole is real
    pub real_pole_tolerance: f64,
    /// Frequency sweep size for the stopband measurement
    pub sweep_points: usize,
    /// Pole separation, relative to the larger pole magnitude, treated as a
    /// repeated pole
    pub repeated_pole_tolerance: f64,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            real_pole_tolerance: DEFAULT_REAL_POLE_TOLERANCE,
            sweep_points: DEFAULT_SWEEP_POINTS,
            repeated_pole_tolerance: DEFAULT_REPEATED_POLE_TOLERANCE,
        }
    }
}

impl DesignOptions {
    pub fn validate(&self) -> FilterResult<()> {
        if !(self.real_pole_tolerance.is_finite() && self.real_pole_tolerance > 0.0) {
            return Err(FilterError::InvalidSpec(format!(
                "real_pole_tolerance must be positive, got {}",
                self.real_pole_tolerance
            )));
        }
        if self.sweep_points < 2 {
            return Err(FilterError::InvalidSpec(format!(
                "sweep_points must be at least 2, got {}",
                self.sweep_points
            )));
        }
        if !(self.repeated_pole_tolerance.is_finite() && self.repeated_pole_tolerance >= 0.0) {
            return Err(FilterError::InvalidSpec(format!(
                "repeated_pole_tolerance must be non-negative, got {}",
                self.repeated_pole_tolerance
            )));
        }
        Ok(())
    }
}

/// A finished design: folded pole–residue tables plus the spec it meets.
///
/// Only constructed through [`FilterDesign::new`], which checks that every
/// pole of the filter is accounted for exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDesign {
    name: String,
    order: usize,
    passband_edge: f64,
    achieved_stopband_edge: f64,
    nominal_stopband_edge: f64,
    passband_ripple_db: f64,
    stopband_attenuation_db: f64,
    natural_frequency: f64,
    real_poles: Vec<f64>,
    real_coeffs_direct: Vec<f64>,
    complex_poles: Vec<Complex>,
    complex_coeffs_direct: Vec<Complex>,
}

impl FilterDesign {
    /// Assemble a design record.
    ///
    /// Fails with [`FilterError::PoleCountMismatch`] unless
    /// `real + 2·complex == order`.
    pub fn new(
        spec: &FilterSpec,
        order: usize,
        natural_frequency: f64,
        achieved_stopband_edge: f64,
        poles: PoleClassification,
    ) -> FilterResult<Self> {
        if poles.real_poles.len() != poles.real_coeffs.len()
            || poles.complex_poles.len() != poles.complex_coeffs.len()
        {
            return Err(FilterError::SynthesisFailed(
                "pole and coefficient tables are not index-aligned".into(),
            ));
        }
        let accounted = poles.model_order();
        if accounted != order {
            return Err(FilterError::PoleCountMismatch { order, accounted });
        }

        Ok(Self {
            name: spec.name.clone(),
            order,
            passband_edge: spec.passband_edge,
            achieved_stopband_edge,
            nominal_stopband_edge: spec.stopband_edge,
            passband_ripple_db: spec.passband_ripple_db,
            stopband_attenuation_db: spec.stopband_attenuation_db,
            natural_frequency,
            real_poles: poles.real_poles,
            real_coeffs_direct: poles.real_coeffs,
            complex_poles: poles.complex_poles,
            complex_coeffs_direct: poles.complex_coeffs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn passband_edge(&self) -> f64 {
        self.passband_edge
    }

    /// Measured frequency where the response first reaches the attenuation.
    pub fn achieved_stopband_edge(&self) -> f64 {
        self.achieved_stopband_edge
    }

    /// Stopband edge as requested in the spec.
    pub fn nominal_stopband_edge(&self) -> f64 {
        self.nominal_stopband_edge
    }

    pub fn passband_ripple_db(&self) -> f64 {
        self.passband_ripple_db
    }

    pub fn stopband_attenuation_db(&self) -> f64 {
        self.stopband_attenuation_db
    }

    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    pub fn real_poles(&self) -> &[f64] {
        &self.real_poles
    }

    pub fn real_coeffs_direct(&self) -> &[f64] {
        &self.real_coeffs_direct
    }

    /// One member (positive imaginary part) per conjugate pair.
    pub fn complex_poles(&self) -> &[Complex] {
        &self.complex_poles
    }

    /// Residues of [`complex_poles`](Self::complex_poles), pre-scaled by 2.
    pub fn complex_coeffs_direct(&self) -> &[Complex] {
        &self.complex_coeffs_direct
    }

    fn complex_terms(&self) -> impl Iterator<Item = (Complex, Complex)> + '_ {
        self.complex_poles
            .iter()
            .copied()
            .zip(self.complex_coeffs_direct.iter().copied())
    }

    fn real_terms(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.real_poles
            .iter()
            .copied()
            .zip(self.real_coeffs_direct.iter().copied())
    }

    /// Impulse response `h(t) = Σ Re(c·e^(p·t))`, zero for `t < 0`.
    pub fn impulse_response(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        let complex: f64 = self.complex_terms().map(|(p, c)| (c * (p * t).exp()).re).sum();
        let real: f64 = self.real_terms().map(|(p, c)| c * (p * t).exp()).sum();
        complex + real
    }

    /// Step response `Σ Re(c/p·(e^(p·t) − 1))`, zero for `t < 0`.
    pub fn step_response(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        let complex: f64 = self
            .complex_terms()
            .map(|(p, c)| (c / p * ((p * t).exp() - 1.0)).re)
            .sum();
        let real: f64 = self.real_terms().map(|(p, c)| c / p * (p * t).exp_m1()).sum();
        complex + real
    }

    /// `H(0) = Σ Re(−c/p)`.
    pub fn dc_gain(&self) -> f64 {
        let complex: f64 = self.complex_terms().map(|(p, c)| (-c / p).re).sum();
        let real: f64 = self.real_terms().map(|(p, c)| -c / p).sum();
        complex + real
    }
}

/// Runs the design pipeline with a pluggable residue decomposer.
#[derive(Debug, Clone)]
pub struct EllipticDesigner<D = ResidueDecomposer> {
    decomposer: D,
    options: DesignOptions,
}

impl EllipticDesigner<ResidueDecomposer> {
    pub fn new(options: DesignOptions) -> Self {
        Self {
            decomposer: ResidueDecomposer::new(options.repeated_pole_tolerance),
            options,
        }
    }
}

impl Default for EllipticDesigner<ResidueDecomposer> {
    fn default() -> Self {
        Self::new(DesignOptions::default())
    }
}

impl<D: RationalDecomposer> EllipticDesigner<D> {
    pub fn with_decomposer(decomposer: D, options: DesignOptions) -> Self {
        Self {
            decomposer,
            options,
        }
    }

    pub fn options(&self) -> &DesignOptions {
        &self.options
    }

    pub fn decomposer(&self) -> &D {
        &self.decomposer
    }

    /// Design one filter.
    ///
    /// Any stage failure is returned with the spec's name attached.
    pub fn design(&self, spec: &FilterSpec) -> DesignResult<FilterDesign> {
        let span = tracing::info_span!("design", name = %spec.name);
        let _enter = span.enter();

        self.run(spec).map_err(|e| {
            tracing::warn!(error = %e, "design failed");
            DesignError::new(spec.name.clone(), e)
        })
    }

    /// Design every spec, keeping failures alongside successes.
    pub fn design_all(&self, specs: &[FilterSpec]) -> Vec<DesignResult<FilterDesign>> {
        specs.iter().map(|spec| self.design(spec)).collect()
    }

    /// Design every spec, stopping at the first failure.
    pub fn design_batch(&self, specs: &[FilterSpec]) -> DesignResult<Vec<FilterDesign>> {
        specs.iter().map(|spec| self.design(spec)).collect()
    }

    fn run(&self, spec: &FilterSpec) -> FilterResult<FilterDesign> {
        spec.validate()?;
        self.options.validate()?;

        let (order, natural_frequency) = estimate_order(
            spec.passband_edge,
            spec.stopband_edge,
            spec.passband_ripple_db,
            spec.stopband_attenuation_db,
        )?;
        tracing::debug!(order, natural_frequency, "order estimated");

        let tf = synthesize(
            order,
            spec.passband_ripple_db,
            spec.stopband_attenuation_db,
            natural_frequency,
        )?;
        tracing::debug!(
            numerator_degree = ?tf.numerator_degree(),
            denominator_degree = ?tf.denominator_degree(),
            "transfer function synthesized"
        );

        let achieved = measure_stopband(
            &tf,
            spec.stopband_attenuation_db,
            self.options.sweep_points,
        )?;
        tracing::debug!(
            achieved_stopband_edge = achieved,
            nominal_stopband_edge = spec.stopband_edge,
            "stopband measured"
        );

        let fractions = self.decomposer.decompose(&tf)?;
        tracing::debug!(terms = fractions.terms.len(), "transfer function decomposed");

        let poles = classify(&fractions.terms, self.options.real_pole_tolerance)?;
        let design = FilterDesign::new(spec, order, natural_frequency, achieved, poles)?;

        tracing::info!(
            order = design.order(),
            real = design.real_poles().len(),
            complex = design.complex_poles().len(),
            achieved_stopband_edge = design.achieved_stopband_edge(),
            "design complete"
        );
        Ok(design)
    }
}
