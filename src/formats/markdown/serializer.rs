//! Markdown serialization (IR tree → source string)
//!
//! Builds a Comrak AST from the IR and delegates printing to Comrak's
//! CommonMark formatter, then repairs the small set of escapes the
//! formatter applies to syntax the dialects treat as literal.

use std::cell::RefCell;

use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeHtmlBlock,
    NodeLink, NodeList, NodeMath, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena};
use once_cell::sync::Lazy;
use regex::Regex;

use super::parser::comrak_options;
use super::MarkdownOptions;
use crate::error::FormatError;
use crate::ir::Node;

// Comrak escapes the `[`, `!`, and `]` of callout headers; undo them so
// `> [!NOTE]` survives the round trip.
static ESCAPED_CALLOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\[\\?!(\w+)\\?\]").unwrap());

/// Serialize an IR tree to markdown.
///
/// Custom kinds should have been downgraded or pre-rendered by the
/// calling dialect; stragglers are emitted as their plain-text content
/// rather than failing.
pub fn serialize_markdown(tree: &Node, opts: &MarkdownOptions) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = make(&arena, NodeValue::Document);

    match tree {
        Node::Root(blocks) => {
            for block in blocks {
                add_block(&arena, root, block);
            }
        }
        other => add_block(&arena, root, other),
    }

    let mut output = Vec::new();
    let options = comrak_options(opts);
    format_commonmark(root, &options, &mut output)
        .map_err(|e| FormatError::SerializationError(format!("comrak formatting failed: {e}")))?;
    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("invalid UTF-8 output: {e}")))?;

    Ok(clean_output(&markdown))
}

fn clean_output(markdown: &str) -> String {
    // Comrak separates consecutive lists with an HTML comment.
    let cleaned = markdown.replace("<!-- end list -->\n\n", "");
    ESCAPED_CALLOUT.replace_all(&cleaned, "[!$1]").into_owned()
}

fn make<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn bullet_list_data() -> NodeList {
    NodeList {
        list_type: ListType::Bullet,
        marker_offset: 0,
        padding: 2,
        start: 1,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    }
}

fn add_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    match node {
        Node::Root(children) => {
            for child in children {
                add_block(arena, parent, child);
            }
        }

        Node::Paragraph(children) => {
            let para = make(arena, NodeValue::Paragraph);
            parent.append(para);
            add_inlines(arena, para, children);
        }

        Node::Heading(heading) => {
            let ast = make(
                arena,
                NodeValue::Heading(NodeHeading {
                    level: heading.depth.clamp(1, 6),
                    setext: false,
                }),
            );
            parent.append(ast);
            add_inlines(arena, ast, &heading.children);
        }

        Node::Blockquote(children) => {
            let quote = make(arena, NodeValue::BlockQuote);
            parent.append(quote);
            for child in children {
                add_block(arena, quote, child);
            }
        }

        Node::List(list) => {
            let mut data = bullet_list_data();
            if list.ordered {
                data.list_type = ListType::Ordered;
                data.padding = 3;
            }
            let ast = make(arena, NodeValue::List(data));
            parent.append(ast);
            for item in &list.children {
                add_block(arena, ast, item);
            }
        }

        Node::ListItem(item) => {
            let value = match item.checked {
                Some(true) => NodeValue::TaskItem(Some('x')),
                Some(false) => NodeValue::TaskItem(None),
                None => NodeValue::Item(bullet_list_data()),
            };
            let ast = make(arena, value);
            parent.append(ast);
            for child in &item.children {
                add_block(arena, ast, child);
            }
        }

        Node::Code(code) => {
            let mut literal = code.value.clone();
            if !literal.ends_with('\n') {
                literal.push('\n');
            }
            let ast = make(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: code.lang.clone().unwrap_or_default(),
                    literal,
                }),
            );
            parent.append(ast);
        }

        Node::Table(rows) => {
            let num_columns = rows
                .first()
                .and_then(|row| row.children())
                .map(|cells| cells.len())
                .unwrap_or(0);
            let ast = make(
                arena,
                NodeValue::Table(NodeTable {
                    alignments: vec![TableAlignment::None; num_columns],
                    num_columns,
                    num_rows: rows.len(),
                    num_nonempty_cells: 0,
                }),
            );
            parent.append(ast);
            for (i, row) in rows.iter().enumerate() {
                let row_ast = make(arena, NodeValue::TableRow(i == 0));
                ast.append(row_ast);
                if let Some(cells) = row.children() {
                    for cell in cells {
                        let cell_ast = make(arena, NodeValue::TableCell);
                        row_ast.append(cell_ast);
                        if let Some(inlines) = cell.children() {
                            add_inlines(arena, cell_ast, inlines);
                        }
                    }
                }
            }
        }

        Node::ThematicBreak => {
            parent.append(make(arena, NodeValue::ThematicBreak));
        }

        Node::Html(literal) => {
            let mut literal = literal.clone();
            if !literal.ends_with('\n') {
                literal.push('\n');
            }
            parent.append(make(
                arena,
                NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal,
                }),
            ));
        }

        Node::Frontmatter(fm) => {
            parent.append(make(
                arena,
                NodeValue::FrontMatter(format!("---\n{}\n---\n\n", fm.value)),
            ));
        }

        Node::BlockMath(literal) => {
            let para = make(arena, NodeValue::Paragraph);
            parent.append(para);
            para.append(make(
                arena,
                NodeValue::Math(NodeMath {
                    dollar_math: true,
                    display_math: true,
                    literal: literal.clone(),
                }),
            ));
        }

        // An inline node loose at block level gets its own paragraph.
        other => {
            let para = make(arena, NodeValue::Paragraph);
            parent.append(para);
            add_inline(arena, para, other);
        }
    }
}

fn add_inlines<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, children: &[Node]) {
    for child in children {
        add_inline(arena, parent, child);
    }
}

fn add_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    match node {
        Node::Text(value) => add_text(arena, parent, value),

        Node::Strong(children) => {
            let ast = make(arena, NodeValue::Strong);
            parent.append(ast);
            add_inlines(arena, ast, children);
        }
        Node::Emphasis(children) => {
            let ast = make(arena, NodeValue::Emph);
            parent.append(ast);
            add_inlines(arena, ast, children);
        }
        Node::Delete(children) => {
            let ast = make(arena, NodeValue::Strikethrough);
            parent.append(ast);
            add_inlines(arena, ast, children);
        }

        Node::InlineCode(literal) => {
            // Comrak's formatter cannot print an empty code span.
            if literal.is_empty() {
                return;
            }
            parent.append(make(
                arena,
                NodeValue::Code(NodeCode {
                    num_backticks: 1,
                    literal: literal.clone(),
                }),
            ));
        }

        Node::Link(link) => {
            let ast = make(
                arena,
                NodeValue::Link(NodeLink {
                    url: link.url.clone(),
                    title: String::new(),
                }),
            );
            parent.append(ast);
            add_inlines(arena, ast, &link.children);
        }

        Node::Image(image) => {
            let ast = make(
                arena,
                NodeValue::Image(NodeLink {
                    url: image.url.clone(),
                    title: String::new(),
                }),
            );
            parent.append(ast);
            add_text(arena, ast, &image.alt);
        }

        Node::Break => {
            parent.append(make(arena, NodeValue::LineBreak));
        }

        Node::Html(literal) => {
            parent.append(make(arena, NodeValue::HtmlInline(literal.clone())));
        }

        Node::InlineMath(literal) => {
            parent.append(make(
                arena,
                NodeValue::Math(NodeMath {
                    dollar_math: true,
                    display_math: false,
                    literal: literal.clone(),
                }),
            ));
        }
        Node::BlockMath(literal) => {
            parent.append(make(
                arena,
                NodeValue::Math(NodeMath {
                    dollar_math: true,
                    display_math: true,
                    literal: literal.clone(),
                }),
            ));
        }

        // Custom kinds should already be gone; emit what is left as text.
        other => add_text(arena, parent, &other.to_plain_string()),
    }
}

/// Append text, turning embedded newlines into soft breaks so Comrak
/// re-prefixes continuation lines correctly inside blockquotes and items.
fn add_text<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, value: &str) {
    for (i, segment) in value.split('\n').enumerate() {
        if i > 0 {
            parent.append(make(arena, NodeValue::SoftBreak));
        }
        if !segment.is_empty() {
            parent.append(make(arena, NodeValue::Text(segment.to_string())));
        }
    }
}
