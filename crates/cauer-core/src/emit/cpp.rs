//! C++ header tables
//!
//! One `template<typename Sample> struct <Name>Coeffs` per design:
//!
//! ```text
//! template<typename Sample>
//! struct FastCoeffs {
//!     static constexpr size_t complexCount = 5;
//!     static constexpr size_t realCount = 1;
//!     static constexpr size_t filterOrder = 11;
//!     static constexpr Sample fpass = Sample(20000.0);
//!     static constexpr Sample fstop = Sample(24168.597105037978);
//!     static constexpr std::array<std::complex<Sample>, complexCount> complexPoles{{ ... }};
//!     ...
//! };
//! ```
//!
//! Every number, band edges included, uses shortest round-trip formatting,
//! so the header holds every bit of the f64 values.

use super::{DesignEmitter, EmitError};
use crate::design::FilterDesign;
use crate::types::Complex;
use std::io::Write;

/// Writes designs as a `#pragma once` C++ header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppHeaderEmitter;

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn complex_entries(values: &[Complex]) -> String {
    values
        .iter()
        .map(|c| format!("{{Sample({:?}), Sample({:?})}}", c.re, c.im))
        .collect::<Vec<_>>()
        .join(",\n\t\t")
}

fn real_entries(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("Sample({:?})", v))
        .collect::<Vec<_>>()
        .join(",\n\t\t")
}

/// `static constexpr std::array<element, count> name{{ entries }};`
fn write_array(
    out: &mut dyn Write,
    element_and_count: &str,
    name: &str,
    entries: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        "\tstatic constexpr std::array<{}> {}{{{{\n\t\t{}\n\t}}}};",
        element_and_count, name, entries
    )
}

impl CppHeaderEmitter {
    fn write_struct(&self, design: &FilterDesign, out: &mut dyn Write) -> Result<(), EmitError> {
        if !is_identifier(design.name()) {
            return Err(EmitError::InvalidIdentifier(design.name().to_string()));
        }

        writeln!(out)?;
        writeln!(out, "template<typename Sample>")?;
        writeln!(out, "struct {}Coeffs {{", design.name())?;
        writeln!(
            out,
            "\tstatic constexpr size_t complexCount = {};",
            design.complex_poles().len()
        )?;
        writeln!(
            out,
            "\tstatic constexpr size_t realCount = {};",
            design.real_poles().len()
        )?;
        writeln!(out, "\tstatic constexpr size_t filterOrder = {};", design.order())?;
        writeln!(
            out,
            "\tstatic constexpr Sample fpass = Sample({:?});",
            design.passband_edge()
        )?;
        writeln!(
            out,
            "\tstatic constexpr Sample fstop = Sample({:?});",
            design.achieved_stopband_edge()
        )?;
        let complex = "std::complex<Sample>, complexCount";
        let real = "Sample, realCount";
        write_array(out, complex, "complexPoles", &complex_entries(design.complex_poles()))?;
        write_array(out, real, "realPoles", &real_entries(design.real_poles()))?;
        writeln!(
            out,
            "\t// Coeffs for direct bandlimited synthesis of a polynomial-segment waveform"
        )?;
        write_array(
            out,
            complex,
            "complexCoeffsDirect",
            &complex_entries(design.complex_coeffs_direct()),
        )?;
        write_array(
            out,
            real,
            "realCoeffsDirect",
            &real_entries(design.real_coeffs_direct()),
        )?;
        writeln!(out, "}};")?;
        Ok(())
    }
}

impl DesignEmitter for CppHeaderEmitter {
    fn emit(&self, designs: &[FilterDesign], out: &mut dyn Write) -> Result<(), EmitError> {
        writeln!(out, "#pragma once")?;
        writeln!(out, "#include <array>")?;
        writeln!(out, "#include <complex>")?;
        for design in designs {
            self.write_struct(design, out)?;
        }
        Ok(())
    }
}
