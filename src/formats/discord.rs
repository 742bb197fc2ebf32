//! Discord dialect
//!
//! Markdown with chat-specific inline syntax: `||spoilers||` and `-#`
//! subtext. Headings above `###` render literally in Discord, images and
//! tables do not render at all.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::common::spans::{extract_spans, SpanRule};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::formats::passes::{
    cap_heading_depth, images_to_links, remove_thematic_breaks, tables_to_text,
};
use crate::ir::nodes::{replace_node, Node};
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

const MAX_HEADING_DEPTH: u8 = 3;

static SPOILER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|\|(.+?)\|\|").unwrap());

static SIGNALS: [Signal; 3] = [
    Signal::new(5.0, || Regex::new(r"\|\|.+?\|\|").unwrap()),
    Signal::new(6.0, || Regex::new(r"(?m)^-# .+").unwrap()),
    Signal::new(5.0, || Regex::new(r"(?m)^>>>").unwrap()),
];

fn build_spoiler(caps: &Captures) -> Vec<Node> {
    vec![Node::Spoiler(vec![Node::text(&caps[1])])]
}

fn span_rules() -> [SpanRule; 1] {
    [SpanRule {
        pattern: &SPOILER,
        build: build_spoiler,
    }]
}

/// Reinterpret paragraphs opening with `-# ` as subtext blocks.
fn parse_subtext(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        parse_subtext(&mut children[i]);
        let Node::Paragraph(inlines) = &children[i] else {
            continue;
        };
        let Some(Node::Text(first)) = inlines.first() else {
            continue;
        };
        let Some(rest) = first.strip_prefix("-# ") else {
            continue;
        };
        let mut subtext = vec![Node::text(rest)];
        subtext.extend_from_slice(&inlines[1..]);
        replace_node(children, i, Node::Subtext(subtext));
    }
}

/// Rewrite spoiler and subtext nodes back to their Discord text forms.
fn render_chat_syntax(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        let rendered = match &children[i] {
            Node::Spoiler(inner) => {
                let text: String = inner.iter().map(|n| n.to_plain_string()).collect();
                Some(Node::text(format!("||{text}||")))
            }
            Node::Subtext(inner) => {
                let text: String = inner.iter().map(|n| n.to_plain_string()).collect();
                Some(Node::paragraph(vec![Node::text(format!("-# {text}"))]))
            }
            _ => None,
        };
        match rendered {
            Some(text) => replace_node(children, i, text),
            None => render_chat_syntax(&mut children[i]),
        }
    }
}

pub struct DiscordFormat;

impl Format for DiscordFormat {
    fn id(&self) -> &'static str {
        "discord"
    }

    fn label(&self) -> &'static str {
        "Discord"
    }

    fn description(&self) -> &'static str {
        "Discord chat markdown"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
        parse_subtext(&mut tree);
        extract_spans(&mut tree, &span_rules());
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
        cap_heading_depth(&mut cloned, MAX_HEADING_DEPTH);
        images_to_links(&mut cloned, warnings);
        tables_to_text(&mut cloned, warnings);
        remove_thematic_breaks(&mut cloned, warnings);
        render_chat_syntax(&mut cloned);
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[CustomKind::Spoiler, CustomKind::Subtext],
        );
        let result = serialize_markdown(&cloned, &OPTIONS)?;
        Ok(result
            .replace("\\|\\|", "||")
            .replace("\\-\\# ", "-# ")
            .replace("\\-# ", "-# "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spoiler_and_subtext() {
        let parsed = DiscordFormat
            .parse("the ||big twist|| revealed\n\n-# quiet aside")
            .unwrap();
        let Node::Root(blocks) = &parsed.tree else { panic!() };
        let Node::Paragraph(inline) = &blocks[0] else { panic!() };
        assert_eq!(
            inline[1],
            Node::Spoiler(vec![Node::text("big twist")])
        );
        assert_eq!(blocks[1], Node::Subtext(vec![Node::text("quiet aside")]));
    }

    #[test]
    fn test_serialize_caps_headings_and_flattens_tables() {
        let tree = Node::Root(vec![
            Node::heading(5, vec![Node::text("Deep")]),
            Node::Table(vec![Node::TableRow(vec![
                Node::TableCell(vec![Node::text("x")]),
                Node::TableCell(vec![Node::text("y")]),
            ])]),
        ]);
        let mut warnings = Vec::new();
        let out = DiscordFormat.serialize(&tree, &mut warnings).unwrap();
        assert!(out.contains("### Deep"), "got: {out}");
        assert!(out.contains("x | y"), "got: {out}");
        assert!(warnings
            .iter()
            .any(|w| w.message == crate::warnings::TABLES_NOT_SUPPORTED));
    }

    #[test]
    fn test_native_round_trip() {
        let parsed = DiscordFormat
            .parse("spoiler ||hidden|| here\n\n-# footnote text")
            .unwrap();
        let mut warnings = Vec::new();
        let out = DiscordFormat.serialize(&parsed.tree, &mut warnings).unwrap();
        assert!(out.contains("||hidden||"), "got: {out}");
        assert!(out.contains("-# footnote text"), "got: {out}");
        assert!(warnings.is_empty());
    }
}
