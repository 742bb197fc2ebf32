//! End-to-end pipeline tests: input preconditions, warning handling, and
//! no-panic properties over arbitrary input.

use md_babel::{convert, FormatError, FormatRegistry, Severity, MAX_INPUT_SIZE};
use proptest::prelude::*;

#[test]
fn test_empty_input_yields_empty_result() {
    let registry = FormatRegistry::with_defaults();
    let result = convert(&registry, "   \n\t  ", "gfm", "slack").unwrap();
    assert_eq!(result.output, "");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_oversized_input_is_rejected_with_error_warning() {
    let registry = FormatRegistry::with_defaults();
    let input = "a".repeat(MAX_INPUT_SIZE + 1);
    let result = convert(&registry, &input, "gfm", "gfm").unwrap();
    assert_eq!(result.output, "");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].severity, Severity::Error);
    assert!(result.warnings[0].message.contains("Input too large"));
    assert!(result.warnings[0].message.contains("Maximum is 1MB"));
}

#[test]
fn test_input_at_the_cap_converts_normally() {
    let registry = FormatRegistry::with_defaults();
    let input = "a".repeat(MAX_INPUT_SIZE);
    let result = convert(&registry, &input, "gfm", "gfm").unwrap();
    assert!(!result.output.is_empty());
    assert!(result
        .warnings
        .iter()
        .all(|w| w.severity != Severity::Error));
}

#[test]
fn test_size_cap_counts_characters_not_bytes() {
    let registry = FormatRegistry::with_defaults();
    // Multi-byte characters, but exactly MAX_INPUT_SIZE of them.
    let input = "é".repeat(MAX_INPUT_SIZE);
    assert!(input.len() > MAX_INPUT_SIZE);
    let result = convert(&registry, &input, "gfm", "gfm").unwrap();
    assert!(result
        .warnings
        .iter()
        .all(|w| w.severity != Severity::Error));
}

#[test]
fn test_empty_code_span_converts_without_panic() {
    // An unclosed pair of backticks is valid chat input.
    let registry = FormatRegistry::with_defaults();
    let result = convert(&registry, "``x", "slack", "obsidian").unwrap();
    assert!(result.output.contains('x'), "got: {}", result.output);
}

#[test]
fn test_unknown_source_format_is_an_error() {
    let registry = FormatRegistry::with_defaults();
    let err = convert(&registry, "hello", "wordstar", "gfm").unwrap_err();
    assert!(matches!(err, FormatError::FormatNotFound(id) if id == "wordstar"));
}

#[test]
fn test_unknown_target_format_is_an_error() {
    let registry = FormatRegistry::with_defaults();
    let err = convert(&registry, "hello", "gfm", "wordstar").unwrap_err();
    assert!(matches!(err, FormatError::FormatNotFound(_)));
}

#[test]
fn test_repeated_losses_warn_once() {
    let registry = FormatRegistry::with_defaults();
    let input = "| a |\n| --- |\n| 1 |\n\ntext between\n\n| b |\n| --- |\n| 2 |\n";
    let result = convert(&registry, input, "gfm", "slack").unwrap();
    let table_warnings = result
        .warnings
        .iter()
        .filter(|w| w.message == md_babel::warnings::TABLE_TO_TEXT)
        .count();
    assert_eq!(table_warnings, 1);
}

#[test]
fn test_same_dialect_conversion_is_clean() {
    let registry = FormatRegistry::with_defaults();
    let result = convert(&registry, "# Title\n\nBody text.\n", "gfm", "gfm").unwrap();
    assert!(result.output.contains("# Title"));
    assert!(result.warnings.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn convert_never_panics_on_arbitrary_text(input in "\\PC{0,400}") {
        let registry = FormatRegistry::with_defaults();
        let _ = convert(&registry, &input, "gfm", "slack");
        let _ = convert(&registry, &input, "slack", "obsidian");
        let _ = convert(&registry, &input, "obsidian", "reddit");
    }

    #[test]
    fn conversion_output_carries_no_error_warnings(input in "[a-z *_~`#>\\[\\]()!\n-]{0,200}") {
        let registry = FormatRegistry::with_defaults();
        for target in ["gfm", "slack", "notion", "discord"] {
            if let Ok(result) = convert(&registry, &input, "gfm", target) {
                prop_assert!(result.warnings.iter().all(|w| w.severity != md_babel::Severity::Error));
            }
        }
    }
}
