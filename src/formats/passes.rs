//! Cosmetic rewrite passes shared by several dialect serializers.
//!
//! Each pass is a small in-place tree rewrite applied to the serializer's
//! private clone before the downgrade step: cap heading depth, flatten
//! tables, turn images into links, and similar per-platform trims.

use crate::ir::nodes::{replace_node, splice_nodes, Link, Node};
use crate::warnings::{self, warn, ConversionWarning, Severity};

/// Clamp heading depth to `max` (e.g. Discord renders `####` literally).
pub(crate) fn cap_heading_depth(node: &mut Node, max: u8) {
    if let Node::Heading(heading) = node {
        heading.depth = heading.depth.min(max);
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            cap_heading_depth(child, max);
        }
    }
}

/// Replace images with links for dialects without image embedding.
pub(crate) fn images_to_links(node: &mut Node, warnings: &mut Vec<ConversionWarning>) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        if let Node::Image(image) = &children[i] {
            let text = if image.alt.is_empty() {
                image.url.clone()
            } else {
                image.alt.clone()
            };
            let link = Node::Link(Link {
                url: image.url.clone(),
                children: vec![Node::text(text)],
            });
            replace_node(children, i, link);
            warnings.push(warn(
                Severity::Info,
                warnings::IMAGES_NOT_SUPPORTED,
                Some("image"),
            ));
        } else {
            images_to_links(&mut children[i], warnings);
        }
    }
}

/// Flatten tables to pipe-joined plain-text rows.
pub(crate) fn tables_to_text(node: &mut Node, warnings: &mut Vec<ConversionWarning>) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for i in 0..children.len() {
        if let Node::Table(rows) = &children[i] {
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    let cells: Vec<String> = row
                        .children()
                        .unwrap_or(&[])
                        .iter()
                        .map(|cell| cell.to_plain_string())
                        .collect();
                    cells.join(" | ")
                })
                .collect();
            let para = Node::paragraph(vec![Node::text(lines.join("\n"))]);
            replace_node(children, i, para);
            warnings.push(warn(
                Severity::Warning,
                warnings::TABLES_NOT_SUPPORTED,
                Some("table"),
            ));
        } else {
            tables_to_text(&mut children[i], warnings);
        }
    }
}

/// Drop horizontal rules entirely.
pub(crate) fn remove_thematic_breaks(node: &mut Node, warnings: &mut Vec<ConversionWarning>) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let mut i = 0;
    while i < children.len() {
        if matches!(children[i], Node::ThematicBreak) {
            splice_nodes(children, i, 1, Vec::new());
            warnings.push(warn(
                Severity::Info,
                warnings::HR_NOT_SUPPORTED,
                Some("thematicBreak"),
            ));
        } else {
            remove_thematic_breaks(&mut children[i], warnings);
            i += 1;
        }
    }
}

/// Strip language hints from fenced code blocks.
pub(crate) fn strip_code_langs(node: &mut Node, warnings: &mut Vec<ConversionWarning>) {
    if let Node::Code(code) = node {
        if code.lang.take().is_some() {
            warnings.push(warn(
                Severity::Info,
                warnings::SYNTAX_HIGHLIGHT_DROPPED,
                Some("code"),
            ));
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            strip_code_langs(child, warnings);
        }
    }
}

/// Turn task-list items back into plain list items.
pub(crate) fn strip_task_checkboxes(node: &mut Node, warnings: &mut Vec<ConversionWarning>) {
    if let Node::ListItem(item) = node {
        if item.checked.take().is_some() {
            warnings.push(warn(
                Severity::Info,
                warnings::TASK_LIST_TO_LIST,
                Some("listItem"),
            ));
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            strip_task_checkboxes(child, warnings);
        }
    }
}
