//! Shared markdown bridge (Comrak-backed)
//!
//! Most dialects are "markdown plus a few quirks": they delegate standard
//! syntax to this bridge and layer their own span rules and rewrite
//! passes on top. Pipeline: source string ↔ Comrak AST ↔ IR tree.

mod parser;
mod serializer;

pub use parser::parse_markdown;
pub use serializer::serialize_markdown;

/// Feature toggles for the bridge, per dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions {
    /// Recognize `---` YAML frontmatter at the top of the document.
    pub frontmatter: bool,
    /// Recognize `$...$` and `$$...$$` math.
    pub math: bool,
}
