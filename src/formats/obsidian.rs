//! Obsidian dialect
//!
//! Markdown plus vault syntax: `[[wikilinks]]`, `![[embeds]]`, `#tags`,
//! `> [!NOTE]` callouts, math and YAML frontmatter.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::common::callouts::{parse_callouts, serialize_callouts};
use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::common::spans::{extract_spans, SpanRule};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::nodes::{replace_node, Embed, Node, Wikilink};
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: true,
    math: true,
};

// One alternation so `![[embed]]` wins over `[[wikilink]]` at the same
// position. The tag branch consumes a guard character in place of
// lookbehind: tags must not follow a word character or `&` (HTML
// entities).
static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[\[([^\]]+)\]\]|\[\[([^\]]+)\]\]|(^|[^&\w])#([a-zA-Z][\w/-]*)").unwrap()
});

static ESCAPED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\#([a-zA-Z][\w/-]*)").unwrap());

static SIGNALS: [Signal; 4] = [
    Signal::new(6.0, || Regex::new(r"(?:^|[^!])\[\[[^\]]+\]\]").unwrap()),
    Signal::new(7.0, || Regex::new(r"!\[\[[^\]]+\]\]").unwrap()),
    Signal::new(4.0, || Regex::new(r"(?m)^>\s*\[!\w+\]").unwrap()),
    Signal::new(2.0, || {
        Regex::new(r"(?m)(?:^|\s)#[a-zA-Z][\w/-]+(?:\s|$)").unwrap()
    }),
];

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn build_inline(caps: &Captures) -> Vec<Node> {
    if let Some(embed) = caps.get(1) {
        let mut parts = embed.as_str().splitn(2, '|');
        let target = parts.next().unwrap_or("").trim().to_string();
        let alt = parts.next().and_then(non_empty);
        return vec![Node::Embed(Embed { target, alt })];
    }

    if let Some(link) = caps.get(2) {
        let full = link.as_str();
        let (path, alias) = match full.find('|') {
            Some(pipe) => (&full[..pipe], non_empty(&full[pipe + 1..])),
            None => (full, None),
        };
        let (target, heading) = match path.find('#') {
            Some(hash) => (path[..hash].trim().to_string(), non_empty(&path[hash + 1..])),
            None => (path.trim().to_string(), None),
        };
        return vec![Node::Wikilink(Wikilink {
            target,
            alias,
            heading,
        })];
    }

    // Tag: re-emit the consumed guard character, then the tag itself.
    let mut nodes = Vec::new();
    if let Some(prefix) = caps.get(3) {
        if !prefix.as_str().is_empty() {
            nodes.push(Node::text(prefix.as_str()));
        }
    }
    nodes.push(Node::Tag(caps[4].to_string()));
    nodes
}

fn span_rules() -> [SpanRule; 1] {
    [SpanRule {
        pattern: &INLINE,
        build: build_inline,
    }]
}

/// Rewrite vault nodes back to their text syntax before handing the tree
/// to the markdown bridge (which knows nothing about them).
fn render_vault_syntax(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        let rendered = match &children[i] {
            Node::Wikilink(wl) => {
                let heading = wl
                    .heading
                    .as_ref()
                    .map(|h| format!("#{h}"))
                    .unwrap_or_default();
                let alias = wl
                    .alias
                    .as_ref()
                    .map(|a| format!("|{a}"))
                    .unwrap_or_default();
                Some(Node::text(format!("[[{}{heading}{alias}]]", wl.target)))
            }
            Node::Embed(embed) => {
                let alt = embed
                    .alt
                    .as_ref()
                    .map(|a| format!("|{a}"))
                    .unwrap_or_default();
                Some(Node::text(format!("![[{}{alt}]]", embed.target)))
            }
            Node::Tag(name) => Some(Node::text(format!("#{name}"))),
            _ => None,
        };
        match rendered {
            Some(text) => replace_node(children, i, text),
            None => render_vault_syntax(&mut children[i]),
        }
    }
}

pub struct ObsidianFormat;

impl Format for ObsidianFormat {
    fn id(&self) -> &'static str {
        "obsidian"
    }

    fn label(&self) -> &'static str {
        "Obsidian"
    }

    fn description(&self) -> &'static str {
        "Obsidian markdown with wikilinks, embeds, callouts, and tags"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
        parse_callouts(&mut tree);
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
        serialize_callouts(&mut cloned);
        render_vault_syntax(&mut cloned);
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[
                CustomKind::Wikilink,
                CustomKind::Embed,
                CustomKind::Tag,
                CustomKind::Callout,
                CustomKind::InlineMath,
                CustomKind::BlockMath,
                CustomKind::Frontmatter,
            ],
        );
        let result = serialize_markdown(&cloned, &OPTIONS)?;
        // The bridge escapes `!`, `[`, and `#` in text; restore the vault
        // syntax it cannot know about.
        let result = result
            .replace("\\!\\[\\[", "![[")
            .replace("!\\[\\[", "![[")
            .replace("\\[\\[", "[[")
            .replace("\\]\\]", "]]");
        Ok(ESCAPED_TAG.replace_all(&result, "#$1").into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Node {
        ObsidianFormat.parse(source).unwrap().tree
    }

    fn first_paragraph(tree: &Node) -> &[Node] {
        let Node::Root(blocks) = tree else { panic!() };
        let Node::Paragraph(inline) = &blocks[0] else {
            panic!("expected paragraph, got {:?}", blocks[0]);
        };
        inline
    }

    #[test]
    fn test_parse_wikilink_variants() {
        let tree = parse("See [[Page]], [[Page#Section|label]], and [[Other|alias]].");
        let inline = first_paragraph(&tree);
        assert_eq!(
            inline[1],
            Node::Wikilink(Wikilink {
                target: "Page".into(),
                alias: None,
                heading: None,
            })
        );
        assert_eq!(
            inline[3],
            Node::Wikilink(Wikilink {
                target: "Page".into(),
                alias: Some("label".into()),
                heading: Some("Section".into()),
            })
        );
        assert_eq!(
            inline[5],
            Node::Wikilink(Wikilink {
                target: "Other".into(),
                alias: Some("alias".into()),
                heading: None,
            })
        );
    }

    #[test]
    fn test_parse_embed_and_tag() {
        let tree = parse("![[diagram.png|alt text]] tagged #project/alpha here");
        let inline = first_paragraph(&tree);
        assert_eq!(
            inline[0],
            Node::Embed(Embed {
                target: "diagram.png".into(),
                alt: Some("alt text".into()),
            })
        );
        assert!(inline.contains(&Node::Tag("project/alpha".into())));
    }

    #[test]
    fn test_tag_not_matched_mid_word_or_after_entity() {
        let tree = parse("performance#test and &#39;quoted&#39;");
        let inline = first_paragraph(&tree);
        assert!(!inline.iter().any(|n| matches!(n, Node::Tag(_))));
    }

    #[test]
    fn test_callout_parses_to_node() {
        let tree = parse("> [!NOTE]- Optional title\n> Body here");
        let Node::Root(blocks) = &tree else { panic!() };
        let Node::Callout(callout) = &blocks[0] else {
            panic!("expected callout, got {:?}", blocks[0]);
        };
        assert_eq!(callout.callout_type, "note");
        assert_eq!(callout.title.as_deref(), Some("Optional title"));
        assert!(callout.foldable);
    }

    #[test]
    fn test_round_trip_keeps_vault_syntax() {
        let source = "Link to [[Page|alias]] and embed ![[img.png]] with #tag here";
        let parsed = ObsidianFormat.parse(source).unwrap();
        let mut warnings = Vec::new();
        let out = ObsidianFormat
            .serialize(&parsed.tree, &mut warnings)
            .unwrap();
        assert!(out.contains("[[Page|alias]]"), "got: {out}");
        assert!(out.contains("![[img.png]]"), "got: {out}");
        assert!(out.contains("#tag"), "got: {out}");
        assert!(!out.contains('\\'), "got: {out}");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_callout_round_trip() {
        let parsed = ObsidianFormat.parse("> [!NOTE]\n> body").unwrap();
        let mut warnings = Vec::new();
        let out = ObsidianFormat
            .serialize(&parsed.tree, &mut warnings)
            .unwrap();
        assert!(out.contains("[!NOTE]"), "got: {out}");
    }
}
