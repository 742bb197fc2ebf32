//! Joplin dialect
//!
//! Markdown with `==highlight==` marks, plus callouts, math and
//! frontmatter via the shared bridge features.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::common::callouts::{parse_callouts, serialize_callouts};
use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::common::spans::{extract_spans, SpanRule};
use crate::detect::Signal;
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::nodes::{replace_node, Node};
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: true,
    math: true,
};

static HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"==(.+?)==").unwrap());

static SIGNALS: [Signal; 1] =
    [Signal::new(5.0, || Regex::new(r"==[^=]+==").unwrap())];

fn build_highlight(caps: &Captures) -> Vec<Node> {
    vec![Node::Highlight(vec![Node::text(&caps[1])])]
}

fn span_rules() -> [SpanRule; 1] {
    [SpanRule {
        pattern: &HIGHLIGHT,
        build: build_highlight,
    }]
}

fn render_highlights(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        if let Node::Highlight(inner) = &children[i] {
            let text: String = inner.iter().map(|n| n.to_plain_string()).collect();
            replace_node(children, i, Node::text(format!("=={text}==")));
        } else {
            render_highlights(&mut children[i]);
        }
    }
}

pub struct JoplinFormat;

impl Format for JoplinFormat {
    fn id(&self) -> &'static str {
        "joplin"
    }

    fn label(&self) -> &'static str {
        "Joplin"
    }

    fn description(&self) -> &'static str {
        "Joplin note-taking markdown"
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
        render_highlights(&mut cloned);
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[
                CustomKind::Callout,
                CustomKind::Highlight,
                CustomKind::InlineMath,
                CustomKind::BlockMath,
                CustomKind::Frontmatter,
            ],
        );
        let result = serialize_markdown(&cloned, &OPTIONS)?;
        // The bridge escapes a leading `=`; restore highlight marks that
        // open a line.
        Ok(result.replace("\\==", "=="))
    }
}
