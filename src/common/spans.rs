//! Generic inline-span extraction.
//!
//! Dialects with custom inline syntax (wikilinks, spoilers, highlights)
//! describe it as a table of [`SpanRule`]s; the extractor sweeps text
//! nodes left-to-right and splits out matched regions, leaving unmatched
//! spans as plain text.
//!
//! Rule order is a layering contract: a later rule only runs inside text
//! fragments left over by earlier rules, never across a boundary an
//! earlier rule already claimed. A spoiler delimiter therefore cannot be
//! split by a superscript rule listed after it.

use regex::{Captures, Regex};

use crate::ir::Node;

/// One custom inline syntax family.
///
/// `build` returns a small node sequence rather than a single node so
/// patterns that consume a guard character (a `(^|[^x])` prefix group
/// standing in for lookbehind) can re-emit it as text.
pub struct SpanRule {
    pub pattern: &'static Regex,
    pub build: fn(&Captures) -> Vec<Node>,
}

/// Apply `rules` to every text node in the tree, in place.
pub fn extract_spans(node: &mut Node, rules: &[SpanRule]) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for child in children.iter_mut() {
        extract_spans(child, rules);
    }
    if !children.iter().any(|c| matches!(c, Node::Text(_))) {
        return;
    }
    let mut rewritten = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        match child {
            Node::Text(value) => match split_text(&value, rules) {
                Some(parts) => rewritten.extend(parts),
                None => rewritten.push(Node::Text(value)),
            },
            other => rewritten.push(other),
        }
    }
    *children = rewritten;
}

/// Split one text run by the first rule that matches, then layer the
/// remaining rules over the leftover text fragments only.
///
/// Returns `None` when no rule matched, so callers can keep the original
/// node untouched.
pub fn split_text(text: &str, rules: &[SpanRule]) -> Option<Vec<Node>> {
    let (rule, rest) = rules.split_first()?;

    let mut parts: Vec<Node> = Vec::new();
    let mut last = 0;
    for caps in rule.pattern.captures_iter(text) {
        let m = caps.get(0).expect("capture group 0 always present");
        if m.start() > last {
            parts.push(Node::Text(text[last..m.start()].to_string()));
        }
        parts.extend((rule.build)(&caps));
        last = m.end();
    }
    if last == 0 {
        return split_text(text, rest);
    }
    if last < text.len() {
        parts.push(Node::Text(text[last..].to_string()));
    }

    let mut layered = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            Node::Text(value) => match split_text(&value, rest) {
                Some(sub) => layered.extend(sub),
                None => layered.push(Node::Text(value)),
            },
            other => layered.push(other),
        }
    }
    Some(layered)
}
