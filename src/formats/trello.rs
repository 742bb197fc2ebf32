//! Trello card markdown
//!
//! Trello cards render a small markdown subset: no syntax highlighting,
//! no tables, and no task-list checkboxes. The serializer flattens
//! those constructs with a warning each.

use crate::common::downgrade::downgrade_custom_nodes;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::formats::passes::{strip_code_langs, strip_task_checkboxes, tables_to_text};
use crate::ir::Node;
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

pub struct TrelloFormat;

impl Format for TrelloFormat {
    fn id(&self) -> &'static str {
        "trello"
    }

    fn label(&self) -> &'static str {
        "Trello"
    }

    fn description(&self) -> &'static str {
        "Trello card description markdown"
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
        strip_code_langs(&mut cloned, warnings);
        tables_to_text(&mut cloned, warnings);
        strip_task_checkboxes(&mut cloned, warnings);
        downgrade_custom_nodes(&mut cloned, warnings, &[]);
        serialize_markdown(&cloned, &OPTIONS)
    }
}
