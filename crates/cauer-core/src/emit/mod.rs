//! Output Emitters
//!
//! Serializes finished designs for consumers outside this crate.
//!
//! - [`CppHeaderEmitter`]: `constexpr` coefficient tables in a C++ header
//! - [`JsonEmitter`]: JSON array of design records
//!
//! ```rust,ignore
//! use cauer_core::emit::{CppHeaderEmitter, DesignEmitter};
//!
//! let header = CppHeaderEmitter.render(&designs)?;
//! std::fs::write("coeffs.h", header)?;
//! ```

pub mod cpp;
pub mod json;

pub use cpp::CppHeaderEmitter;
pub use json::JsonEmitter;

use crate::design::FilterDesign;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Errors raised while writing designs.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),
}

/// Serializes an ordered list of designs.
pub trait DesignEmitter {
    /// Write all designs to `out`.
    fn emit(&self, designs: &[FilterDesign], out: &mut dyn Write) -> Result<(), EmitError>;

    /// Render all designs to a string.
    fn render(&self, designs: &[FilterDesign]) -> Result<String, EmitError> {
        let mut buf = Vec::new();
        self.emit(designs, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write all designs to a file, replacing it.
    fn emit_to_path(&self, designs: &[FilterDesign], path: &Path) -> Result<(), EmitError> {
        let mut out = BufWriter::new(std::fs::File::create(path)?);
        self.emit(designs, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
