//! Conversion warnings and the message catalog.
//!
//! Lossy conversions never fail; they produce warnings. The message strings
//! below are a closed, versioned catalog; tests assert against them, so
//! changing one is an observable API change.

use serde::Serialize;

/// How serious a conversion warning is.
///
/// `Error` is reserved for the input-size precondition; a well-formed
/// conversion never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single note about information lost or changed during conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionWarning {
    pub severity: Severity,
    pub message: String,
    /// Kind tag of the node that triggered the warning, when one did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<&'static str>,
}

/// Build a warning.
pub fn warn(severity: Severity, message: &str, node_kind: Option<&'static str>) -> ConversionWarning {
    ConversionWarning {
        severity,
        message: message.to_string(),
        node_kind,
    }
}

/// Collapse duplicate warnings, keeping the first occurrence of each
/// (severity, message) pair.
pub fn deduplicate_warnings(warnings: Vec<ConversionWarning>) -> Vec<ConversionWarning> {
    let mut seen: Vec<(Severity, String)> = Vec::new();
    let mut out = Vec::new();
    for warning in warnings {
        let key = (warning.severity, warning.message.clone());
        if !seen.contains(&key) {
            seen.push(key);
            out.push(warning);
        }
    }
    out
}

pub const HEADING_TO_BOLD: &str = "Headings converted to bold text; heading levels lost";
pub const TABLE_TO_TEXT: &str = "Tables converted to plain text; formatting lost";
pub const WIKILINK_TO_LINK: &str = "Wikilinks converted to standard markdown links";
pub const EMBED_TO_LINK: &str = "Embeds converted to standard links";
pub const CALLOUT_TO_BLOCKQUOTE: &str = "Callouts converted to plain blockquotes; callout type lost";
pub const FRONTMATTER_DROPPED: &str = "YAML frontmatter removed (not supported in target format)";
pub const MATH_DROPPED: &str = "Math expressions removed (not supported in target format)";
pub const FOOTNOTE_DROPPED: &str = "Footnotes removed (not supported in target format)";
pub const TAG_DROPPED: &str = "Tags removed (not supported in target format)";
pub const MENTION_TO_TEXT: &str = "User mentions converted to plain text";
pub const EMOJI_TO_TEXT: &str = "Emoji shortcodes converted to text";
pub const STRIKETHROUGH_SYNTAX: &str = "Strikethrough syntax changed between formats";
pub const NESTED_LIST_FLAT: &str = "Nested lists flattened (limited nesting support)";
pub const GDOCS_INFO: &str = "Google Docs output is standard markdown (importable by Google Docs)";
pub const TASK_LIST_TO_LIST: &str = "Task list checkboxes removed (not supported in target format)";
pub const IMAGE_LINK_ONLY: &str = "Images kept as links (no embedding in target format)";
pub const CODE_BLOCK_LANG_DROPPED: &str = "Code block language hints removed";
pub const HTML_STRIPPED: &str = "Inline HTML stripped (not supported in target format)";
pub const SPOILER_TO_TEXT: &str = "Spoiler tags removed; hidden text shown as plain text";
pub const UNDERLINE_TO_EMPHASIS: &str = "Underline converted to emphasis (no underline in target format)";
pub const HIGHLIGHT_TO_BOLD: &str = "Highlighted text converted to bold (no highlight in target format)";
pub const SUBTEXT_TO_TEXT: &str = "Subtext converted to plain text (not supported in target format)";
pub const SUPERSCRIPT_TO_TEXT: &str = "Superscript converted to plain text (not supported in target format)";
pub const TABLES_NOT_SUPPORTED: &str = "Tables not supported in target format; converted to plain text";
pub const IMAGES_NOT_SUPPORTED: &str = "Images not supported; converted to links";
pub const HR_NOT_SUPPORTED: &str = "Horizontal rules not supported in target format; removed";
pub const SYNTAX_HIGHLIGHT_DROPPED: &str = "Syntax highlighting not supported; language hints removed";
