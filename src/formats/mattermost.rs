//! Mattermost dialect
//!
//! Standard GFM-style markdown with the shared callout syntax.

use crate::common::callouts::{parse_callouts, serialize_callouts};
use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::Node;
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

pub struct MattermostFormat;

impl Format for MattermostFormat {
    fn id(&self) -> &'static str {
        "mattermost"
    }

    fn label(&self) -> &'static str {
        "Mattermost"
    }

    fn description(&self) -> &'static str {
        "Mattermost messaging markdown"
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
        downgrade_custom_nodes(&mut cloned, warnings, &[CustomKind::Callout]);
        serialize_markdown(&cloned, &OPTIONS)
    }
}
