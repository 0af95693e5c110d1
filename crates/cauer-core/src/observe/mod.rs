//! # Observability
//!
//! The design pipeline reports through `tracing`:
//!
//! - a `design` span per filter, carrying the filter name
//! - debug events for each stage (order, stopband, decomposition, folding)
//! - an info event with the finished design's summary
//! - a warn event when a design fails
//!
//! ```text
//! EllipticDesigner::design()
//!   └─ span "design" { name }
//!        ├─ debug  order estimated        { order, natural_frequency }
//!        ├─ debug  transfer function      { numerator_degree, denominator_degree }
//!        ├─ debug  stopband measured      { achieved_stopband_edge }
//!        ├─ debug  decomposed             { terms }
//!        └─ info   design complete        { order, real, complex }
//! ```
//!
//! Installing a subscriber is left to the host; [`init_logging`] is provided
//! for binaries and tests.

pub mod logging;

pub use logging::{build_filter, init_logging, LogConfig, LogFormat, LogLevel};
