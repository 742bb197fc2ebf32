//! Conversion pipeline: parse with the source dialect, serialize with the
//! target dialect, de-duplicate the accumulated warnings.

use crate::error::FormatError;
use crate::registry::FormatRegistry;
use crate::warnings::{deduplicate_warnings, warn, ConversionWarning, Severity};

/// Inputs above this many characters are rejected before parsing.
pub const MAX_INPUT_SIZE: usize = 1_000_000;

/// The outcome of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub output: String,
    pub warnings: Vec<ConversionWarning>,
}

/// Convert `input` from one dialect to another.
///
/// Empty or whitespace-only input short-circuits to an empty result.
/// Over-long input short-circuits to an empty result carrying the only
/// error-severity warning the system ever produces. An unknown dialect id
/// is caller misuse and returns [`FormatError::FormatNotFound`].
pub fn convert(
    registry: &FormatRegistry,
    input: &str,
    source_format: &str,
    target_format: &str,
) -> Result<ConversionResult, FormatError> {
    if input.trim().is_empty() {
        return Ok(ConversionResult {
            output: String::new(),
            warnings: Vec::new(),
        });
    }

    let length = input.chars().count();
    if length > MAX_INPUT_SIZE {
        let message = format!(
            "Input too large ({:.1}MB). Maximum is 1MB.",
            length as f64 / 1_000_000.0
        );
        return Ok(ConversionResult {
            output: String::new(),
            warnings: vec![warn(Severity::Error, &message, None)],
        });
    }

    let source = registry.get(source_format)?;
    let target = registry.get(target_format)?;

    let parsed = source.parse(input)?;
    let mut warnings = parsed.warnings;
    let output = target.serialize(&parsed.tree, &mut warnings)?;

    Ok(ConversionResult {
        output,
        warnings: deduplicate_warnings(warnings),
    })
}
