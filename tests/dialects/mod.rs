//! Cross-dialect conversion tests, driven by one reference fixture per
//! dialect under tests/fixtures/.

use std::path::PathBuf;

pub mod all_pairs;
pub mod cross;

/// Load the reference fixture for a dialect id.
pub fn fixture(id: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{id}.md"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}
