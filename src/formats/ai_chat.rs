//! AI assistant chat transcripts
//!
//! Claude, ChatGPT, Gemini and Grok all emit near-identical GFM-style
//! markdown, so a single implementation covers the four of them and the
//! registry registers one instance per assistant id. None of them carry
//! distinctive surface syntax, so they contribute no detection signals.

use crate::common::callouts::{parse_callouts, serialize_callouts};
use crate::common::downgrade::{downgrade_custom_nodes, CustomKind};
use crate::error::FormatError;
use crate::format::{Format, ParseResult};
use crate::formats::markdown::{parse_markdown, serialize_markdown, MarkdownOptions};
use crate::ir::Node;
use crate::warnings::ConversionWarning;

const OPTIONS: MarkdownOptions = MarkdownOptions {
    frontmatter: false,
    math: true,
};

pub struct AiChatFormat {
    id: &'static str,
    label: &'static str,
    description: &'static str,
}

impl AiChatFormat {
    pub fn claude() -> Self {
        AiChatFormat {
            id: "claude",
            label: "Claude",
            description: "Anthropic Claude markdown output",
        }
    }

    pub fn chatgpt() -> Self {
        AiChatFormat {
            id: "chatgpt",
            label: "ChatGPT",
            description: "OpenAI ChatGPT markdown output",
        }
    }

    pub fn gemini() -> Self {
        AiChatFormat {
            id: "gemini",
            label: "Gemini",
            description: "Google Gemini markdown output",
        }
    }

    pub fn grok() -> Self {
        AiChatFormat {
            id: "grok",
            label: "Grok",
            description: "xAI Grok markdown output",
        }
    }
}

impl Format for AiChatFormat {
    fn id(&self) -> &'static str {
        self.id
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
        let mut tree = parse_markdown(source, &OPTIONS)?;
        parse_callouts(&mut tree);
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
        downgrade_custom_nodes(
            &mut cloned,
            warnings,
            &[
                CustomKind::Callout,
                CustomKind::InlineMath,
                CustomKind::BlockMath,
            ],
        );
        serialize_markdown(&cloned, &OPTIONS)
    }
}
