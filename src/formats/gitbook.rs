//! GitBook dialect
//!
//! Plain documentation markdown; the only quirk is that horizontal
//! rules are not supported and get dropped.

use crate::common::downgrade::downgrade_custom_nodes;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::formats::passes::remove_thematic_breaks;
use crate::ir::Node;
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

pub struct GitbookFormat;

impl Format for GitbookFormat {
    fn id(&self) -> &'static str {
        "gitbook"
    }

    fn label(&self) -> &'static str {
        "GitBook"
    }

    fn description(&self) -> &'static str {
        "GitBook documentation markdown"
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
        warnings: &mut Vec<ConversionWarning>,
    ) -> Result<String, FormatError> {
        let mut cloned = tree.clone();
        remove_thematic_breaks(&mut cloned, warnings);
        downgrade_custom_nodes(&mut cloned, warnings, &[]);
        serialize_markdown(&cloned, &OPTIONS)
    }
}
