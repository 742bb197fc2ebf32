//! GitHub Flavored Markdown dialect
//!
//! The default dialect: full bridge feature set (frontmatter, math) plus
//! the shared `[!NOTE]` callout grammar.

use regex::Regex;

use crate::common::callouts::{parse_callouts, serialize_callouts};
use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::Node;
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: true,
    math: true,
};

// Callout syntax is shared with Obsidian, so it is weighted below
// Obsidian's version of the same signal.
static SIGNALS: [Signal; 3] = [
    Signal::new(2.0, || Regex::new(r"(?m)^>\s*\[!\w+\]").unwrap()),
    Signal::new(3.0, || Regex::new(r"\[\^[^\]]+\]").unwrap()),
    Signal::new(1.0, || Regex::new(r"(?m)^```\w+$").unwrap()),
];

pub struct GfmFormat;

impl Format for GfmFormat {
    fn id(&self) -> &'static str {
        "gfm"
    }

    fn label(&self) -> &'static str {
        "GitHub"
    }

    fn description(&self) -> &'static str {
        "GitHub Flavored Markdown"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
        parse_callouts(&mut tree);
        Ok(ParseResult {
            tree,
            warnings: Vec::new(),
        })
    }

    fn serialize(
        &self,
        tree: &Node,
        warnings: &mut Vec<ConversionWarning>,
    ) -> Result<String, FormatError> {
        let mut cloned = tree.clone();
        serialize_callouts(&mut cloned);
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[
                CustomKind::Callout,
                CustomKind::InlineMath,
                CustomKind::BlockMath,
                CustomKind::Frontmatter,
            ],
        );
        serialize_markdown(&cloned, &OPTIONS)
    }
}
