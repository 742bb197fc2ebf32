//! Slack mrkdwn dialect
//!
//! The one dialect with no markdown library behind it: parsing and
//! printing are hand-written (see `parser` and `serializer`).

mod parser;
mod serializer;

use regex::Regex;

use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::ir::Node;
use crate::warnings::ConversionWarning;

// Single-asterisk bold is deliberately absent: it is ambiguous with
// standard markdown italic. Line-start &gt; only, so HTML-encoded
// quotes in other dialects' prose do not count.
static SIGNALS: [Signal; 4] = [
    Signal::new(5.0, || Regex::new(r"<https?://[^>|]+\|[^>]+>").unwrap()),
    Signal::new(6.0, || Regex::new(r"<@U[A-Z0-9]+>").unwrap()),
    Signal::new(6.0, || Regex::new(r"<#C[A-Z0-9]+(\|[^>]+)?>").unwrap()),
    Signal::new(2.0, || Regex::new(r"(?m)^&gt;").unwrap()),
];

pub struct SlackFormat;

impl Format for SlackFormat {
    fn id(&self) -> &'static str {
        "slack"
    }

    fn label(&self) -> &'static str {
        "Slack"
    }

    fn description(&self) -> &'static str {
        "Slack messaging markup format"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        Ok(ParseResult {
            tree: parser::parse_mrkdwn(source),
            warnings: Vec::new(),
        })
    }

    fn serialize(
        &self,
        tree: &Node,
        warnings: &mut Vec<ConversionWarning>,
    ) -> Result<String, FormatError> {
        let mut cloned = tree.clone();
        // Mentions, emoji and callouts have native mrkdwn renderings.
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[CustomKind::Mention, CustomKind::Emoji, CustomKind::Callout],
        );
        Ok(serializer::serialize_mrkdwn(&cloned, warnings))
    }
}
