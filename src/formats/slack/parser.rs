//! Hand-written recursive descent parser for Slack mrkdwn.
//!
//! Slack has no backing markdown library here; this is a two-level
//! engine: a line-oriented block scanner and a character-position inline
//! scanner with escaping and depth-limited nesting.
//!
//! mrkdwn syntax:
//! - `*bold*` (not `**bold**`)
//! - `_italic_` (not `*italic*`)
//! - `~strike~` (not `~~strike~~`)
//! - `` `code` `` and ``` ``` ``` blocks
//! - `<url|text>` links, `<@U123>` mentions, `<#C123|name>` channels
//! - `:emoji:` shortcodes
//! - `>` quotes, `-`/`*`/`•` bullets, `1.`/`1)` ordered items

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::nodes::{CodeBlock, Link, List, Node};

const MAX_INLINE_DEPTH: usize = 20;
const MAX_EMOJI_NAME_LENGTH: usize = 50;

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•]\s").unwrap());
static ORDERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s").unwrap());

fn is_continuation_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    if line.starts_with("```") {
        return false;
    }
    if line.starts_with('>') || line.starts_with("&gt;") {
        return false;
    }
    if BULLET_PREFIX.is_match(line) || ORDERED_PREFIX.is_match(line) {
        return false;
    }
    true
}

/// Parse mrkdwn into an IR tree.
pub fn parse_mrkdwn(input: &str) -> Node {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut children = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        // Fenced code block
        if line.trim_start().starts_with("```") {
            let lang = line.trim_start()[3..].trim().to_string();
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                code_lines.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1; // closing fence
            }
            children.push(Node::Code(CodeBlock {
                lang: if lang.is_empty() { None } else { Some(lang) },
                value: code_lines.join("\n"),
            }));
            continue;
        }

        // Quote block; Slack web encodes the marker as &gt;
        if line.starts_with("&gt;") || line.starts_with('>') {
            let mut quote_lines = Vec::new();
            while i < lines.len() && (lines[i].starts_with("&gt;") || lines[i].starts_with('>')) {
                let stripped = if let Some(rest) = lines[i].strip_prefix("&gt;") {
                    rest
                } else {
                    &lines[i][1..]
                };
                quote_lines.push(stripped.strip_prefix(' ').unwrap_or(stripped));
                i += 1;
            }
            children.push(Node::blockquote(vec![Node::Paragraph(parse_inline(
                &quote_lines.join("\n"),
                0,
            ))]));
            continue;
        }

        // Unordered list
        if BULLET_PREFIX.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() && BULLET_PREFIX.is_match(lines[i]) {
                let content = BULLET_PREFIX.replace(lines[i], "");
                items.push(Node::list_item(vec![Node::Paragraph(parse_inline(
                    &content, 0,
                ))]));
                i += 1;
            }
            children.push(Node::List(List {
                ordered: false,
                children: items,
            }));
            continue;
        }

        // Ordered list
        if ORDERED_PREFIX.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() && ORDERED_PREFIX.is_match(lines[i]) {
                let content = ORDERED_PREFIX.replace(lines[i], "");
                items.push(Node::list_item(vec![Node::Paragraph(parse_inline(
                    &content, 0,
                ))]));
                i += 1;
            }
            children.push(Node::List(List {
                ordered: true,
                children: items,
            }));
            continue;
        }

        // Paragraph: maximal run of lines that start no other block form.
        // Internal line breaks stay as newlines inside the inline scan.
        let mut para_lines = Vec::new();
        while i < lines.len() && is_continuation_line(lines[i]) {
            para_lines.push(lines[i]);
            i += 1;
        }
        if !para_lines.is_empty() {
            children.push(Node::Paragraph(parse_inline(&para_lines.join("\n"), 0)));
        }
    }

    Node::Root(children)
}

fn is_special_char(ch: char) -> bool {
    matches!(ch, '*' | '_' | '~' | '`' | '<' | ':' | '\\')
}

fn is_escapable(ch: char) -> bool {
    matches!(ch, '*' | '_' | '~')
}

fn find_char(chars: &[char], start: usize, target: char) -> Option<usize> {
    chars[start..]
        .iter()
        .position(|&c| c == target)
        .map(|p| start + p)
}

/// A closing mark must not follow a space; an unclosed mark is literal.
fn find_closing_mark(chars: &[char], start: usize, mark: char) -> Option<usize> {
    (start..chars.len()).find(|&j| chars[j] == mark && chars[j - 1] != ' ')
}

fn push_text(result: &mut Vec<Node>, value: &str) {
    if let Some(Node::Text(last)) = result.last_mut() {
        last.push_str(value);
    } else {
        result.push(Node::text(value));
    }
}

/// Single-pass inline scanner over one text run.
///
/// Emphasis content recurses at `depth + 1`; past [`MAX_INLINE_DEPTH`]
/// the remaining text is emitted verbatim rather than failing.
fn parse_inline(text: &str, depth: usize) -> Vec<Node> {
    if depth > MAX_INLINE_DEPTH {
        return vec![Node::text(text)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut result: Vec<Node> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        // Escape: \* \_ \~ emit the character literally
        if ch == '\\' && i + 1 < chars.len() && is_escapable(chars[i + 1]) {
            push_text(&mut result, &chars[i + 1].to_string());
            i += 2;
            continue;
        }

        // Inline code: first closing backtick wins, no nesting
        if ch == '`' {
            if let Some(end) = find_char(&chars, i + 1, '`') {
                // An empty span carries nothing; keep the backticks as text.
                if end == i + 1 {
                    push_text(&mut result, "``");
                    i = end + 1;
                    continue;
                }
                let literal: String = chars[i + 1..end].iter().collect();
                result.push(Node::inline_code(literal));
                i = end + 1;
                continue;
            }
        }

        // Angle construct: <@mention>, <#channel|label>, <url|text>, <url>
        if ch == '<' {
            if let Some(end) = find_char(&chars, i + 1, '>') {
                let inner: String = chars[i + 1..end].iter().collect();

                if let Some(user_id) = inner.strip_prefix('@') {
                    result.push(Node::mention(user_id, None));
                    i = end + 1;
                    continue;
                }

                // Channel references render as text; channel semantics
                // have no portable equivalent.
                if let Some(channel) = inner.strip_prefix('#') {
                    let mut parts = channel.split('|');
                    let id = parts.next().unwrap_or(channel);
                    let label = parts.next().filter(|s| !s.is_empty()).unwrap_or(id);
                    push_text(&mut result, &format!("#{label}"));
                    i = end + 1;
                    continue;
                }

                let (url, link_text) = match inner.find('|') {
                    Some(pipe) => (&inner[..pipe], &inner[pipe + 1..]),
                    None => (inner.as_str(), inner.as_str()),
                };
                result.push(Node::Link(Link {
                    url: url.to_string(),
                    children: vec![Node::text(link_text)],
                }));
                i = end + 1;
                continue;
            }
        }

        // Emoji shortcode: bounded length, restricted charset
        if ch == ':' {
            if let Some(end) = find_char(&chars, i + 1, ':') {
                let name: String = chars[i + 1..end].iter().collect();
                if end - i < MAX_EMOJI_NAME_LENGTH
                    && !name.is_empty()
                    && name
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '+' | '-'))
                {
                    result.push(Node::Emoji(name));
                    i = end + 1;
                    continue;
                }
            }
        }

        // Emphasis marks: the opener must not be followed by a space
        if matches!(ch, '*' | '_' | '~') && i + 1 < chars.len() && chars[i + 1] != ' ' {
            if let Some(end) = find_closing_mark(&chars, i + 1, ch) {
                let inner: String = chars[i + 1..end].iter().collect();
                let children = parse_inline(&inner, depth + 1);
                result.push(match ch {
                    '*' => Node::Strong(children),
                    '_' => Node::Emphasis(children),
                    _ => Node::Delete(children),
                });
                i = end + 1;
                continue;
            }
        }

        // Plain text run until the next special character
        let mut text_end = i + 1;
        while text_end < chars.len() && !is_special_char(chars[text_end]) {
            text_end += 1;
        }
        let run: String = chars[i..text_end].iter().collect();
        push_text(&mut result, &run);
        i = text_end;
    }

    if result.is_empty() {
        result.push(Node::text(""));
    }
    result
}
