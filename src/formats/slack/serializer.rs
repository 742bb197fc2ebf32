//! Serialize an IR tree to Slack mrkdwn.
//!
//! Direct inverse of the scanner's emission rules: strong → `*…*`,
//! emphasis → `_…_`, delete → `~…~`, link → `<url|text>` (bare `<url>`
//! when the text equals the url), mention → `<@id>`, emoji → `:name:`.

use crate::ir::Node;
use crate::warnings::{self, warn, ConversionWarning, Severity};

/// Render a tree as mrkdwn; blocks are joined by blank lines.
pub fn serialize_mrkdwn(tree: &Node, warnings: &mut Vec<ConversionWarning>) -> String {
    let blocks = match tree {
        Node::Root(children) => children.as_slice(),
        other => std::slice::from_ref(other),
    };
    let parts: Vec<String> = blocks
        .iter()
        .filter_map(|node| serialize_block(node, warnings))
        .collect();
    parts.join("\n\n")
}

fn quote_lines(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_block(node: &Node, warnings: &mut Vec<ConversionWarning>) -> Option<String> {
    match node {
        Node::Paragraph(children) => Some(serialize_inlines(children, warnings)),

        // Slack has no headings; bold stands in for them.
        Node::Heading(heading) => {
            let text = serialize_inlines(&heading.children, warnings);
            warnings.push(warn(
                Severity::Warning,
                warnings::HEADING_TO_BOLD,
                Some("heading"),
            ));
            Some(format!("*{text}*"))
        }

        Node::Code(code) => {
            if code.lang.is_some() {
                warnings.push(warn(
                    Severity::Info,
                    warnings::CODE_BLOCK_LANG_DROPPED,
                    Some("code"),
                ));
            }
            Some(format!("```\n{}\n```", code.value))
        }

        Node::Blockquote(children) => {
            let content: Vec<String> = children
                .iter()
                .filter_map(|child| serialize_block(child, warnings))
                .collect();
            Some(quote_lines(&content.join("\n")))
        }

        Node::List(list) => {
            let items: Vec<String> = list
                .children
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let content: Vec<String> = item
                        .children()
                        .unwrap_or(&[])
                        .iter()
                        .filter_map(|child| serialize_block(child, warnings))
                        .collect();
                    let prefix = if list.ordered {
                        format!("{}. ", idx + 1)
                    } else {
                        "• ".to_string()
                    };
                    format!("{prefix}{}", content.join("\n"))
                })
                .collect();
            Some(items.join("\n"))
        }

        // No horizontal rule in Slack; a plain separator will do.
        Node::ThematicBreak => Some("---".to_string()),

        Node::Table(rows) => {
            warnings.push(warn(Severity::Warning, warnings::TABLE_TO_TEXT, Some("table")));
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    let cells: Vec<String> = row
                        .children()
                        .unwrap_or(&[])
                        .iter()
                        .map(|cell| {
                            serialize_inlines(cell.children().unwrap_or(&[]), warnings)
                        })
                        .collect();
                    cells.join(" | ")
                })
                .collect();
            Some(lines.join("\n"))
        }

        Node::Html(_) => {
            warnings.push(warn(Severity::Info, warnings::HTML_STRIPPED, Some("html")));
            None
        }

        Node::Callout(callout) => {
            let title = callout
                .title
                .clone()
                .unwrap_or_else(|| callout.callout_type.clone());
            let content: Vec<String> = callout
                .children
                .iter()
                .filter_map(|child| serialize_block(child, warnings))
                .collect();
            let content = content.join("\n");
            let body = if title.is_empty() {
                content
            } else if content.is_empty() {
                format!("*{title}*")
            } else {
                format!("*{title}*\n{content}")
            };
            Some(quote_lines(&body))
        }

        other => Some(other.to_plain_string()),
    }
}

fn serialize_inlines(children: &[Node], warnings: &mut Vec<ConversionWarning>) -> String {
    children
        .iter()
        .map(|child| serialize_inline(child, warnings))
        .collect()
}

fn serialize_inline(node: &Node, warnings: &mut Vec<ConversionWarning>) -> String {
    match node {
        Node::Text(value) => value.clone(),

        Node::Strong(children) => format!("*{}*", serialize_inlines(children, warnings)),
        Node::Emphasis(children) => format!("_{}_", serialize_inlines(children, warnings)),
        Node::Delete(children) => format!("~{}~", serialize_inlines(children, warnings)),

        Node::InlineCode(value) => format!("`{value}`"),

        Node::Link(link) => {
            let text = serialize_inlines(&link.children, warnings);
            if text == link.url {
                format!("<{}>", link.url)
            } else {
                format!("<{}|{text}>", link.url)
            }
        }

        Node::Image(image) => {
            warnings.push(warn(Severity::Info, warnings::IMAGE_LINK_ONLY, Some("image")));
            if image.alt.is_empty() {
                format!("<{}>", image.url)
            } else {
                format!("<{}|{}>", image.url, image.alt)
            }
        }

        Node::Break => "\n".to_string(),

        Node::Mention(mention) => format!("<@{}>", mention.id),
        Node::Emoji(name) => format!(":{name}:"),

        other => other.to_plain_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Callout, Heading, Image, List};

    fn render(tree: Node) -> (String, Vec<ConversionWarning>) {
        let mut warnings = Vec::new();
        let out = serialize_mrkdwn(&tree, &mut warnings);
        (out, warnings)
    }

    #[test]
    fn test_inline_round_trip_forms() {
        let tree = Node::Root(vec![Node::paragraph(vec![
            Node::strong(vec![Node::text("bold")]),
            Node::text(" and "),
            Node::emphasis(vec![Node::text("italic")]),
            Node::text(" with "),
            Node::link("https://x", vec![Node::text("label")]),
        ])]);
        let (out, _) = render(tree);
        assert_eq!(out, "*bold* and _italic_ with <https://x|label>");
    }

    #[test]
    fn test_heading_becomes_bold_with_warning() {
        let tree = Node::Root(vec![Node::Heading(Heading {
            depth: 2,
            children: vec![Node::text("Title")],
        })]);
        let (out, warnings) = render(tree);
        assert_eq!(out, "*Title*");
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert_eq!(warnings[0].message, warnings::HEADING_TO_BOLD);
    }

    #[test]
    fn test_bare_link_when_text_equals_url() {
        let tree = Node::Root(vec![Node::paragraph(vec![Node::link(
            "https://example.com",
            vec![Node::text("https://example.com")],
        )])]);
        let (out, _) = render(tree);
        assert_eq!(out, "<https://example.com>");
    }

    #[test]
    fn test_lists_render_with_slack_prefixes() {
        let tree = Node::Root(vec![
            Node::List(List {
                ordered: false,
                children: vec![
                    Node::list_item(vec![Node::paragraph(vec![Node::text("one")])]),
                    Node::list_item(vec![Node::paragraph(vec![Node::text("two")])]),
                ],
            }),
            Node::List(List {
                ordered: true,
                children: vec![
                    Node::list_item(vec![Node::paragraph(vec![Node::text("first")])]),
                    Node::list_item(vec![Node::paragraph(vec![Node::text("second")])]),
                ],
            }),
        ]);
        let (out, _) = render(tree);
        assert_eq!(out, "• one\n• two\n\n1. first\n2. second");
    }

    #[test]
    fn test_table_flattens_to_pipe_rows() {
        let tree = Node::Root(vec![Node::Table(vec![
            Node::TableRow(vec![
                Node::TableCell(vec![Node::text("a")]),
                Node::TableCell(vec![Node::text("b")]),
            ]),
            Node::TableRow(vec![
                Node::TableCell(vec![Node::text("1")]),
                Node::TableCell(vec![Node::text("2")]),
            ]),
        ])]);
        let (out, warnings) = render(tree);
        assert_eq!(out, "a | b\n1 | 2");
        assert_eq!(warnings[0].message, warnings::TABLE_TO_TEXT);
    }

    #[test]
    fn test_callout_renders_as_bold_titled_quote() {
        let tree = Node::Root(vec![Node::Callout(Callout {
            callout_type: "note".into(),
            title: Some("Note".into()),
            foldable: false,
            children: vec![Node::paragraph(vec![Node::text("body")])],
        })]);
        let (out, _) = render(tree);
        assert_eq!(out, "> *Note*\n> body");
    }

    #[test]
    fn test_image_renders_as_link_with_warning() {
        let tree = Node::Root(vec![Node::paragraph(vec![Node::Image(Image {
            url: "https://img/x.png".into(),
            alt: "pic".into(),
        })])]);
        let (out, warnings) = render(tree);
        assert_eq!(out, "<https://img/x.png|pic>");
        assert_eq!(warnings[0].message, warnings::IMAGE_LINK_ONLY);
    }

    #[test]
    fn test_mention_and_emoji_native_forms() {
        let tree = Node::Root(vec![Node::paragraph(vec![
            Node::mention("U123", None),
            Node::text(" says "),
            Node::Emoji("wave".into()),
        ])]);
        let (out, _) = render(tree);
        assert_eq!(out, "<@U123> says :wave:");
    }
}
