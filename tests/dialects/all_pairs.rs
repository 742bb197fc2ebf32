//! Every dialect's fixture converts to every registered dialect without an
//! error, producing non-empty output and at worst warning-severity notes.

use md_babel::{convert, FormatRegistry, Severity};

use super::fixture;

#[test]
fn test_every_pair_converts() {
    let registry = FormatRegistry::with_defaults();
    let ids = registry.ids();
    assert_eq!(ids.len(), 16);

    for source in &ids {
        let input = fixture(source);
        for target in &ids {
            let result = convert(&registry, &input, source, target)
                .unwrap_or_else(|e| panic!("{source} -> {target}: {e}"));
            assert!(
                !result.output.trim().is_empty(),
                "{source} -> {target} produced empty output"
            );
            for warning in &result.warnings {
                assert_ne!(
                    warning.severity,
                    Severity::Error,
                    "{source} -> {target} produced error warning: {}",
                    warning.message
                );
            }
        }
    }
}

#[test]
fn test_every_fixture_round_trips_to_itself() {
    let registry = FormatRegistry::with_defaults();
    for id in registry.ids() {
        let input = fixture(id);
        let once = convert(&registry, &input, id, id)
            .unwrap_or_else(|e| panic!("{id} round trip: {e}"));
        let twice = convert(&registry, &once.output, id, id)
            .unwrap_or_else(|e| panic!("{id} second round trip: {e}"));
        // One pass may normalize surface syntax; a second pass must not
        // change anything further.
        assert_eq!(once.output, twice.output, "{id} did not stabilize");
    }
}
