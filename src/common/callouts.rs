//! Callout grammar shared by several dialects.
//!
//! A blockquote whose first paragraph opens with `[!TYPE]` is a callout:
//!
//! ```text
//! > [!NOTE]- Optional title
//! > Body text.
//! ```
//!
//! The fold marker (`+` expanded, `-` collapsed) makes the callout
//! foldable either way.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::nodes::{replace_node, Callout, Node};

// The title gap must not cross the soft break, or the first body line
// would be captured as the title.
static CALLOUT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[!(\w+)\]([+-])?[^\S\n]*(.*)").unwrap());

/// Reinterpret `[!TYPE]`-headed blockquotes as callout nodes, in place.
///
/// Non-matching blockquotes are left untouched.
pub fn parse_callouts(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        parse_callouts(&mut children[i]);
        if let Node::Blockquote(_) = &children[i] {
            if let Some(callout) = callout_from_blockquote(&children[i]) {
                replace_node(children, i, callout);
            }
        }
    }
}

fn callout_from_blockquote(node: &Node) -> Option<Node> {
    let Node::Blockquote(blocks) = node else {
        return None;
    };
    let Node::Paragraph(inlines) = blocks.first()? else {
        return None;
    };
    let Node::Text(first_text) = inlines.first()? else {
        return None;
    };

    let caps = CALLOUT_HEADER.captures(first_text)?;
    let callout_type = caps[1].to_lowercase();
    let foldable = caps.get(2).is_some();
    let title_rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let title = if title_rest.is_empty() {
        caps[1].to_string()
    } else {
        title_rest.to_string()
    };

    // Soft breaks coalesce into one text run, so the body usually sits in
    // the same node as the header; the header line's trailing newline
    // belongs to the header, not the body.
    let header_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    let leftover = &first_text[header_end..];
    let mut remaining: Vec<Node> = Vec::new();
    if !leftover.is_empty() {
        let body = leftover.strip_prefix('\n').unwrap_or(leftover);
        remaining.push(Node::text(body));
    }
    remaining.extend_from_slice(&inlines[1..]);

    let mut children = Vec::new();
    let has_content = remaining.iter().any(|n| match n {
        Node::Text(value) => !value.trim().is_empty(),
        _ => true,
    });
    if has_content {
        children.push(Node::Paragraph(remaining));
    }
    children.extend_from_slice(&blocks[1..]);

    Some(Node::Callout(Callout {
        callout_type,
        title: Some(title),
        foldable,
        children,
    }))
}

/// Rewrite callout nodes back into `[!TYPE]`-headed blockquotes, in place.
pub fn serialize_callouts(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        serialize_callouts(&mut children[i]);
        if let Node::Callout(_) = &children[i] {
            let Node::Callout(callout) =
                std::mem::replace(&mut children[i], Node::Text(String::new()))
            else {
                unreachable!()
            };
            let type_str = callout.callout_type.to_uppercase();
            let title = match &callout.title {
                Some(t) if !t.eq_ignore_ascii_case(&callout.callout_type) => format!(" {t}"),
                _ => String::new(),
            };
            let fold = if callout.foldable { "-" } else { "" };
            let header =
                Node::paragraph(vec![Node::text(format!("[!{type_str}]{fold}{title}"))]);

            let mut blocks = vec![header];
            blocks.extend(callout.children);
            replace_node(children, i, Node::blockquote(blocks));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(inlines: Vec<Node>, rest: Vec<Node>) -> Node {
        let mut blocks = vec![Node::Paragraph(inlines)];
        blocks.extend(rest);
        Node::Root(vec![Node::blockquote(blocks)])
    }

    #[test]
    fn test_parse_basic_callout() {
        let mut root = quote(
            vec![Node::text("[!NOTE]\nThis is a note.")],
            Vec::new(),
        );
        parse_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Callout(callout) = &children[0] else {
            panic!("expected callout, got {:?}", children[0]);
        };
        assert_eq!(callout.callout_type, "note");
        assert_eq!(callout.title.as_deref(), Some("NOTE"));
        assert!(!callout.foldable);
        assert_eq!(
            callout.children,
            vec![Node::Paragraph(vec![Node::text("This is a note.")])]
        );
    }

    #[test]
    fn test_parse_foldable_with_title() {
        let mut root = quote(vec![Node::text("[!warning]- Watch out")], Vec::new());
        parse_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Callout(callout) = &children[0] else { panic!() };
        assert_eq!(callout.callout_type, "warning");
        assert_eq!(callout.title.as_deref(), Some("Watch out"));
        assert!(callout.foldable);
        assert!(callout.children.is_empty());
    }

    #[test]
    fn test_title_stops_at_line_end() {
        let mut root = quote(
            vec![Node::text("[!warning]- Watch out\nFirst body line")],
            Vec::new(),
        );
        parse_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Callout(callout) = &children[0] else { panic!() };
        assert_eq!(callout.title.as_deref(), Some("Watch out"));
        assert_eq!(
            callout.children,
            vec![Node::Paragraph(vec![Node::text("First body line")])]
        );
    }

    #[test]
    fn test_whitespace_only_leftover_inline_is_dropped() {
        let mut root = quote(vec![Node::text("[!TIP]\n  ")], Vec::new());
        parse_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Callout(callout) = &children[0] else { panic!() };
        assert!(callout.children.is_empty());
    }

    #[test]
    fn test_plain_blockquote_untouched() {
        let mut root = quote(vec![Node::text("just a quote")], Vec::new());
        let before = root.clone();
        parse_callouts(&mut root);
        assert_eq!(root, before);
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut root = quote(
            vec![Node::text("[!NOTE]\nbody")],
            vec![Node::paragraph(vec![Node::text("second block")])],
        );
        parse_callouts(&mut root);
        serialize_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Blockquote(blocks) = &children[0] else { panic!() };
        assert_eq!(
            blocks[0],
            Node::paragraph(vec![Node::text("[!NOTE]")])
        );
        assert_eq!(blocks[1], Node::Paragraph(vec![Node::text("body")]));
        assert_eq!(
            blocks[2],
            Node::paragraph(vec![Node::text("second block")])
        );
    }

    #[test]
    fn test_serialize_keeps_distinct_title_and_fold_marker() {
        let mut root = Node::Root(vec![Node::Callout(Callout {
            callout_type: "tip".into(),
            title: Some("Pro move".into()),
            foldable: true,
            children: Vec::new(),
        })]);
        serialize_callouts(&mut root);

        let Node::Root(children) = &root else { panic!() };
        let Node::Blockquote(blocks) = &children[0] else { panic!() };
        assert_eq!(
            blocks[0],
            Node::paragraph(vec![Node::text("[!TIP]- Pro move")])
        );
    }
}
