//! Notion dialect
//!
//! Notion's markdown export has no callout syntax of its own; callouts
//! round-trip as emoji-prefixed blockquotes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::callouts::parse_callouts;
use crate::common::downgrade::downgrade_custom_nodes;
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::nodes::{replace_node, Callout, Node};
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

/// Callout type ↔ emoji mapping, ordered: reverse lookup takes the first
/// matching entry (note before info for the shared ℹ️).
const CALLOUT_EMOJI: [(&str, &str); 15] = [
    ("note", "\u{2139}\u{FE0F}"),
    ("tip", "\u{1F4A1}"),
    ("important", "\u{2757}"),
    ("warning", "\u{26A0}\u{FE0F}"),
    ("caution", "\u{1F525}"),
    ("info", "\u{2139}\u{FE0F}"),
    ("success", "\u{2705}"),
    ("question", "\u{2753}"),
    ("quote", "\u{1F4AC}"),
    ("example", "\u{1F4DD}"),
    ("bug", "\u{1F41B}"),
    ("abstract", "\u{1F4C4}"),
    ("todo", "\u{2611}\u{FE0F}"),
    ("failure", "\u{274C}"),
    ("danger", "\u{26A1}"),
];

const DEFAULT_EMOJI: &str = "\u{2139}\u{FE0F}";

static EMOJI_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{FE00}-\x{FE0F}\x{1F900}-\x{1F9FF}\x{200D}\x{20E3}\x{E0020}-\x{E007F}\x{2139}\x{2757}\x{26A0}\x{2705}\x{2753}\x{274C}\x{26A1}\x{2611}]+)\s*(.*)",
    )
    .unwrap()
});

static SIGNALS: [Signal; 1] = [Signal::new(5.0, || {
    Regex::new(r"(?m)^>\s*[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{2139}\x{2757}\x{26A0}\x{2705}\x{2753}\x{274C}\x{26A1}]").unwrap()
})];

fn emoji_for(callout_type: &str) -> &'static str {
    CALLOUT_EMOJI
        .iter()
        .find(|(name, _)| *name == callout_type)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

fn type_for(emoji: &str) -> &'static str {
    CALLOUT_EMOJI
        .iter()
        .find(|(_, e)| *e == emoji)
        .map(|(name, _)| *name)
        .unwrap_or("note")
}

/// Reinterpret emoji-prefixed blockquotes as callouts, in place.
fn parse_emoji_callouts(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        parse_emoji_callouts(&mut children[i]);
        if let Some(callout) = emoji_callout_from_blockquote(&children[i]) {
            replace_node(children, i, callout);
        }
    }
}

fn emoji_callout_from_blockquote(node: &Node) -> Option<Node> {
    let Node::Blockquote(blocks) = node else {
        return None;
    };
    let Node::Paragraph(inlines) = blocks.first()? else {
        return None;
    };
    let Node::Text(first_text) = inlines.first()? else {
        return None;
    };

    let caps = EMOJI_PREFIX.captures(first_text)?;
    let callout_type = type_for(&caps[1]);
    // `.` stops at newlines while soft breaks coalesce runs, so the rest
    // of a multi-line quote sits beyond the capture.
    let rest_start = caps.get(2).map(|m| m.start()).unwrap_or(first_text.len());
    let rest_text = &first_text[rest_start..];

    let mut remaining: Vec<Node> = inlines[1..].to_vec();
    if !rest_text.is_empty() {
        remaining.insert(0, Node::text(rest_text));
    }

    let mut children = Vec::new();
    if !remaining.is_empty() {
        children.push(Node::Paragraph(remaining));
    }
    children.extend_from_slice(&blocks[1..]);

    Some(Node::Callout(Callout {
        callout_type: callout_type.to_string(),
        title: Some(callout_type.to_string()),
        foldable: false,
        children,
    }))
}

/// Rewrite callouts as emoji-prefixed blockquotes, in place.
fn serialize_emoji_callouts(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        serialize_emoji_callouts(&mut children[i]);
        if !matches!(children[i], Node::Callout(_)) {
            continue;
        }
        let Node::Callout(callout) =
            std::mem::replace(&mut children[i], Node::Text(String::new()))
        else {
            unreachable!()
        };
        let emoji = emoji_for(&callout.callout_type);

        let mut blocks = Vec::new();
        let mut rest = callout.children.into_iter();
        match rest.next() {
            Some(Node::Paragraph(mut inlines)) => {
                inlines.insert(0, Node::text(format!("{emoji} ")));
                blocks.push(Node::Paragraph(inlines));
            }
            Some(other) => {
                blocks.push(Node::paragraph(vec![Node::text(format!("{emoji} "))]));
                blocks.push(other);
            }
            None => {
                blocks.push(Node::paragraph(vec![Node::text(emoji)]));
            }
        }
        blocks.extend(rest);
        replace_node(children, i, Node::blockquote(blocks));
    }
}

pub struct NotionFormat;

impl Format for NotionFormat {
    fn id(&self) -> &'static str {
        "notion"
    }

    fn label(&self) -> &'static str {
        "Notion"
    }

    fn description(&self) -> &'static str {
        "Notion markdown export format"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
        parse_callouts(&mut tree);
        parse_emoji_callouts(&mut tree);
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
        serialize_emoji_callouts(&mut cloned);
        downgrade_custom_nodes(&mut cloned, warnings, &[]);
        serialize_markdown(&cloned, &OPTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_blockquote_parses_to_callout() {
        let parsed = NotionFormat
            .parse("> \u{26A0}\u{FE0F} Check this first")
            .unwrap();
        let Node::Root(blocks) = &parsed.tree else { panic!() };
        let Node::Callout(callout) = &blocks[0] else {
            panic!("expected callout, got {:?}", blocks[0]);
        };
        assert_eq!(callout.callout_type, "warning");
        assert_eq!(
            callout.children,
            vec![Node::Paragraph(vec![Node::text("Check this first")])]
        );
    }

    #[test]
    fn test_unknown_emoji_defaults_to_note() {
        let parsed = NotionFormat.parse("> \u{1F680} launch day").unwrap();
        let Node::Root(blocks) = &parsed.tree else { panic!() };
        let Node::Callout(callout) = &blocks[0] else { panic!() };
        assert_eq!(callout.callout_type, "note");
    }

    #[test]
    fn test_plain_blockquote_is_left_alone() {
        let parsed = NotionFormat.parse("> ordinary quote").unwrap();
        let Node::Root(blocks) = &parsed.tree else { panic!() };
        assert!(matches!(blocks[0], Node::Blockquote(_)));
    }

    #[test]
    fn test_callout_serializes_with_emoji_prefix() {
        let tree = Node::Root(vec![Node::Callout(Callout {
            callout_type: "tip".into(),
            title: Some("tip".into()),
            foldable: false,
            children: vec![Node::paragraph(vec![Node::text("use shortcuts")])],
        })]);
        let mut warnings = Vec::new();
        let out = NotionFormat.serialize(&tree, &mut warnings).unwrap();
        assert!(out.contains("> \u{1F4A1} use shortcuts"), "got: {out}");
    }

    #[test]
    fn test_gfm_style_callout_also_recognized() {
        let parsed = NotionFormat.parse("> [!NOTE]\n> body").unwrap();
        let Node::Root(blocks) = &parsed.tree else { panic!() };
        assert!(matches!(blocks[0], Node::Callout(_)));
    }
}
