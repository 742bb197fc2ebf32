//! Markdown parsing (source string → IR tree)
//!
//! Converts GFM-flavored markdown to the shared IR via the Comrak AST.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

use super::MarkdownOptions;
use crate::error::FormatError;
use crate::ir::nodes::{
    CodeBlock, Frontmatter, FrontmatterFormat, Heading, Image, Link, List, ListItem, Node,
};

/// Parse a markdown string into an IR tree rooted at [`Node::Root`].
pub fn parse_markdown(source: &str, opts: &MarkdownOptions) -> Result<Node, FormatError> {
    let arena = Arena::new();
    let options = comrak_options(opts);
    let root = parse_document(&arena, source, &options);
    Ok(Node::Root(convert_blocks(root)))
}

pub(super) fn comrak_options(opts: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    if opts.frontmatter {
        options.extension.front_matter_delimiter = Some("---".to_string());
    }
    if opts.math {
        options.extension.math_dollars = true;
    }
    options
}

fn convert_blocks<'a>(parent: &'a AstNode<'a>) -> Vec<Node> {
    let mut blocks = Vec::new();
    for child in parent.children() {
        if let Some(node) = convert_block(child) {
            blocks.push(node);
        }
    }
    blocks
}

fn convert_block<'a>(node: &'a AstNode<'a>) -> Option<Node> {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::FrontMatter(literal) => {
            let value = literal
                .trim()
                .trim_start_matches("---")
                .trim_end_matches("---")
                .trim()
                .to_string();
            Some(Node::Frontmatter(Frontmatter {
                format: FrontmatterFormat::Yaml,
                value,
            }))
        }

        NodeValue::Heading(heading) => Some(Node::Heading(Heading {
            depth: heading.level,
            children: convert_inlines(node),
        })),

        NodeValue::Paragraph => {
            let inlines = convert_inlines(node);
            // A paragraph that is exactly one `$$…$$` region is display
            // math, a block construct in its own right.
            if let [Node::BlockMath(_)] = inlines.as_slice() {
                return inlines.into_iter().next();
            }
            Some(Node::Paragraph(inlines))
        }

        NodeValue::BlockQuote => Some(Node::Blockquote(convert_blocks(node))),

        NodeValue::List(list) => Some(Node::List(List {
            ordered: matches!(list.list_type, ListType::Ordered),
            children: convert_blocks(node),
        })),

        NodeValue::Item(_) => Some(Node::ListItem(ListItem {
            checked: None,
            children: convert_blocks(node),
        })),

        NodeValue::TaskItem(symbol) => Some(Node::ListItem(ListItem {
            checked: Some(symbol.is_some()),
            children: convert_blocks(node),
        })),

        NodeValue::CodeBlock(code) => {
            let lang = code
                .info
                .split_whitespace()
                .next()
                .map(|s| s.to_string());
            let value = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            Some(Node::Code(CodeBlock {
                lang,
                value: value.to_string(),
            }))
        }

        NodeValue::HtmlBlock(html) => Some(Node::Html(html.literal.trim_end().to_string())),

        NodeValue::ThematicBreak => Some(Node::ThematicBreak),

        NodeValue::Table(_) => Some(Node::Table(convert_blocks(node))),
        NodeValue::TableRow(_) => Some(Node::TableRow(convert_blocks(node))),
        NodeValue::TableCell => Some(Node::TableCell(convert_inlines(node))),

        // Inline content loose at block level (e.g. inside a table cell
        // handled above) falls through to the inline converter.
        _ => {
            let mut inlines = Vec::new();
            convert_inline(node, &mut inlines);
            inlines.into_iter().next()
        }
    }
}

/// Convert the inline children of a container, coalescing adjacent text.
///
/// Soft line breaks become literal newlines inside one text node, so
/// dialect passes that regex over text (callout headers, span rules) see
/// the same merged runs a line-based reading would.
fn convert_inlines<'a>(parent: &'a AstNode<'a>) -> Vec<Node> {
    let mut inlines = Vec::new();
    for child in parent.children() {
        convert_inline(child, &mut inlines);
    }
    inlines
}

fn push_text(inlines: &mut Vec<Node>, value: &str) {
    if let Some(Node::Text(last)) = inlines.last_mut() {
        last.push_str(value);
    } else {
        inlines.push(Node::Text(value.to_string()));
    }
}

fn convert_inline<'a>(node: &'a AstNode<'a>, inlines: &mut Vec<Node>) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(value) => push_text(inlines, value),
        NodeValue::SoftBreak => push_text(inlines, "\n"),
        NodeValue::LineBreak => inlines.push(Node::Break),

        NodeValue::Code(code) => inlines.push(Node::inline_code(code.literal.clone())),
        NodeValue::Emph => inlines.push(Node::Emphasis(convert_inlines(node))),
        NodeValue::Strong => inlines.push(Node::Strong(convert_inlines(node))),
        NodeValue::Strikethrough => inlines.push(Node::Delete(convert_inlines(node))),

        NodeValue::Link(link) => inlines.push(Node::Link(Link {
            url: link.url.clone(),
            children: convert_inlines(node),
        })),

        NodeValue::Image(link) => {
            let mut alt = String::new();
            collect_text(node, &mut alt);
            inlines.push(Node::Image(Image {
                url: link.url.clone(),
                alt,
            }));
        }

        NodeValue::Math(math) => {
            if math.display_math {
                inlines.push(Node::BlockMath(math.literal.clone()));
            } else {
                inlines.push(Node::InlineMath(math.literal.clone()));
            }
        }

        NodeValue::HtmlInline(literal) => inlines.push(Node::Html(literal.clone())),

        _ => {
            for child in node.children() {
                convert_inline(child, inlines);
            }
        }
    }
}

fn collect_text<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(value) => output.push_str(value),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}
