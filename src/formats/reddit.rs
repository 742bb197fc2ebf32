//! Reddit dialect
//!
//! Markdown with `>!spoilers!<` and `^superscript` / `^(multi word)`
//! syntax. Reddit renders neither images nor syntax highlighting.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::common::spans::{extract_spans, SpanRule};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::formats::passes::{images_to_links, strip_code_langs};
use crate::ir::nodes::{replace_node, Node};
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: false,
};

static SPOILER: Lazy<Regex> = Lazy::new(|| Regex::new(r">!(.+?)!<").unwrap());
static SUPERSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^(?:\(([^)]+)\)|(\S+))").unwrap());

static SIGNALS: [Signal; 2] = [
    Signal::new(6.0, || Regex::new(r">!.+?!<").unwrap()),
    Signal::new(3.0, || Regex::new(r"\^(?:\([^)]+\)|\S+)").unwrap()),
];

fn build_spoiler(caps: &Captures) -> Vec<Node> {
    vec![Node::Spoiler(vec![Node::text(&caps[1])])]
}

fn build_superscript(caps: &Captures) -> Vec<Node> {
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or("");
    vec![Node::Superscript(value.to_string())]
}

/// Spoilers claim their region first; superscript only runs in the text
/// left between them, so a `^` inside a spoiler stays verbatim.
fn span_rules() -> [SpanRule; 2] {
    [
        SpanRule {
            pattern: &SPOILER,
            build: build_spoiler,
        },
        SpanRule {
            pattern: &SUPERSCRIPT,
            build: build_superscript,
        },
    ]
}

fn render_reddit_syntax(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        let rendered = match &children[i] {
            Node::Spoiler(inner) => {
                let text: String = inner.iter().map(|n| n.to_plain_string()).collect();
                Some(Node::text(format!(">!{text}!<")))
            }
            Node::Superscript(value) => {
                let text = if value.contains(' ') {
                    format!("^({value})")
                } else {
                    format!("^{value}")
                };
                Some(Node::text(text))
            }
            _ => None,
        };
        match rendered {
            Some(text) => replace_node(children, i, text),
            None => render_reddit_syntax(&mut children[i]),
        }
    }
}

pub struct RedditFormat;

impl Format for RedditFormat {
    fn id(&self) -> &'static str {
        "reddit"
    }

    fn label(&self) -> &'static str {
        "Reddit"
    }

    fn description(&self) -> &'static str {
        "Reddit markdown (snoomark)"
    }

    fn signals(&self) -> &[Signal] {
        &SIGNALS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
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
        strip_code_langs(&mut cloned, warnings);
        images_to_links(&mut cloned, warnings);
        render_reddit_syntax(&mut cloned);
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[CustomKind::Spoiler, CustomKind::Superscript],
        );
        let result = serialize_markdown(&cloned, &OPTIONS)?;
        Ok(result
            .replace("\\>\\!", ">!")
            .replace("\\>!", ">!")
            .replace("\\!\\<", "!<")
            .replace("\\!<", "!<")
            .replace("!\\<", "!<"))
    }
}
