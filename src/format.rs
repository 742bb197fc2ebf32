//! Format trait definition
//!
//! This module defines the core Format trait that all dialect
//! implementations must implement. The trait provides a uniform interface
//! for parsing and serializing documents through the shared IR.

use crate::detect::Signal;
use crate::error::FormatError;
use crate::ir::Node;
use crate::warnings::ConversionWarning;

/// Result of parsing input text in some dialect.
pub struct ParseResult {
    /// Well-formed IR tree rooted at [`Node::Root`].
    pub tree: Node,
    /// Warnings produced while parsing.
    pub warnings: Vec<ConversionWarning>,
}

/// Trait for markdown dialects
///
/// Implementors provide bidirectional conversion between a dialect's text
/// form and the shared IR. A dialect's `serialize` must accept any
/// well-formed tree, including custom kinds from another dialect's
/// vocabulary, and downgrade what it cannot represent rather than fail.
///
/// # Examples
///
/// ```ignore
/// struct MyDialect;
///
/// impl Format for MyDialect {
///     fn id(&self) -> &'static str {
///         "my-dialect"
///     }
///
///     fn label(&self) -> &'static str {
///         "My Dialect"
///     }
///
///     fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
///         // Parse source to an IR tree
///         todo!()
///     }
///
///     fn serialize(
///         &self,
///         tree: &Node,
///         warnings: &mut Vec<ConversionWarning>,
///     ) -> Result<String, FormatError> {
///         // Serialize the IR tree to text
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The identifier of this dialect (e.g., "gfm", "slack", "obsidian")
    fn id(&self) -> &'static str;

    /// Human-readable display name
    fn label(&self) -> &'static str;

    /// Optional description of this dialect
    fn description(&self) -> &'static str {
        ""
    }

    /// Detection signals this dialect contributes to the sniffer.
    ///
    /// Dialects with no distinctive surface syntax return an empty slice.
    fn signals(&self) -> &[Signal] {
        &[]
    }

    /// Parse source text into an IR tree plus parse-time warnings.
    fn parse(&self, source: &str) -> Result<ParseResult, FormatError>;

    /// Serialize an IR tree into this dialect's text form.
    ///
    /// The tree is borrowed read-only; implementations clone before any
    /// destructive rewrite so the caller's tree stays reusable.
    fn serialize(
        &self,
        tree: &Node,
        warnings: &mut Vec<ConversionWarning>,
    ) -> Result<String, FormatError>;
}
