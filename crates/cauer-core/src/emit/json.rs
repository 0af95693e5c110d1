//! JSON design records
//!
//! Complex values are written as `[re, im]` pairs.

use super::{DesignEmitter, EmitError};
use crate::design::FilterDesign;
use std::io::Write;

/// Writes designs as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    /// Indent the output
    pub pretty: bool,
}

impl JsonEmitter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DesignEmitter for JsonEmitter {
    fn emit(&self, designs: &[FilterDesign], out: &mut dyn Write) -> Result<(), EmitError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, designs)?;
        } else {
            serde_json::to_writer(&mut *out, designs)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
