//! Google Docs dialect
//!
//! Detection watches for the styled-HTML paste residue that Google Docs
//! exports leave behind (inline `style` attributes, span soup). Output
//! is plain markdown, which Docs imports cleanly, so the serializer only
//! annotates the result with an informational note.

use regex::Regex;

use crate::common::downgrade::downgrade_custom_nodes;
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::Node;
use crate::warnings::{self, warn, ConversionWarning, Severity};

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

static SIGNALS: [Signal; 4] = [
    Signal::new(6.0, || {
        Regex::new(r#"(?i)style="[^"]*font-weight"#).unwrap()
    }),
    Signal::new(4.0, || Regex::new(r"(?i)<[a-z][^>]*\s[^>]*>").unwrap()),
    Signal::new(3.0, || Regex::new(r"(?i)<span[^>]*\s[^>]*>").unwrap()),
    Signal::new(2.0, || Regex::new(r#"(?i)class="[^"]*""#).unwrap()),
];

pub struct GdocsFormat;

impl Format for GdocsFormat {
    fn id(&self) -> &'static str {
        "gdocs"
    }

    fn label(&self) -> &'static str {
        "Google Docs"
    }

    fn description(&self) -> &'static str {
        "Google Docs compatible markdown"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        Ok(ParseResult {
            tree: parse_markdown(source, &OPTIONS)?,
            warnings: Vec::new(),
        })
    }

    fn serialize(
        &self,
        tree: &Node,
        warnings_out: &mut Vec<ConversionWarning>,
    ) -> Result<String, FormatError> {
        let mut cloned = tree.clone();
        downgrade_custom_nodes(&mut cloned, warnings_out, &[]);
        warnings_out.push(warn(Severity::Info, warnings::GDOCS_INFO, None));
        serialize_markdown(&cloned, &OPTIONS)
    }
}
