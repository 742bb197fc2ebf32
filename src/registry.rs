//! Format registry for dialect discovery and selection
//!
//! This module provides a centralized registry for all available dialects.
//! Dialects can be registered and retrieved by id.
//!
//! Registration order is significant: it is the tie-break order for
//! detection and the display order for enumerations, so the registry is
//! backed by an ordered list rather than a keyed map.

use crate::error::FormatError;
use crate::format::Format;

/// Registry of markdown dialects
///
/// # Examples
///
/// ```ignore
/// let mut registry = FormatRegistry::new();
/// registry.register(MyDialect);
///
/// let format = registry.get("my-dialect")?;
/// let parsed = format.parse("source text")?;
/// ```
pub struct FormatRegistry {
    formats: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: Vec::new(),
        }
    }

    /// Register a dialect
    ///
    /// Re-registering an id replaces the dialect in place, keeping its
    /// original position in the order.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let id = format.id();
        match self.formats.iter_mut().find(|f| f.id() == id) {
            Some(slot) => *slot = Box::new(format),
            None => self.formats.push(Box::new(format)),
        }
    }

    /// Get a dialect by id
    pub fn get(&self, id: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .iter()
            .find(|f| f.id() == id)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(id.to_string()))
    }

    /// Check if a dialect exists
    pub fn has(&self, id: &str) -> bool {
        self.formats.iter().any(|f| f.id() == id)
    }

    /// All dialect ids, in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.id()).collect()
    }

    /// Iterate over dialects in registration order
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.iter().map(|f| f.as_ref())
    }

    /// Create a registry with every built-in dialect.
    ///
    /// The order below is a documented contract, not an accident of
    /// declaration: detection ties resolve toward the earlier entry.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::obsidian::ObsidianFormat);
        registry.register(crate::formats::notion::NotionFormat);
        registry.register(crate::formats::slack::SlackFormat);
        registry.register(crate::formats::discord::DiscordFormat);
        registry.register(crate::formats::linear::LinearFormat);
        registry.register(crate::formats::gfm::GfmFormat);
        registry.register(crate::formats::gitbook::GitbookFormat);
        registry.register(crate::formats::joplin::JoplinFormat);
        registry.register(crate::formats::reddit::RedditFormat);
        registry.register(crate::formats::gdocs::GdocsFormat);
        registry.register(crate::formats::mattermost::MattermostFormat);
        registry.register(crate::formats::trello::TrelloFormat);
        registry.register(crate::formats::ai_chat::AiChatFormat::claude());
        registry.register(crate::formats::ai_chat::AiChatFormat::chatgpt());
        registry.register(crate::formats::ai_chat::AiChatFormat::gemini());
        registry.register(crate::formats::ai_chat::AiChatFormat::grok());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Format, ParseResult};
    use crate::ir::Node;
    use crate::warnings::ConversionWarning;

    struct TestFormat;
    impl Format for TestFormat {
        fn id(&self) -> &'static str {
            "test"
        }
        fn label(&self) -> &'static str {
            "Test"
        }
        fn parse(&self, source: &str) -> Result<ParseResult, FormatError> {
            Ok(ParseResult {
                tree: Node::Root(vec![Node::paragraph(vec![Node::text(source)])]),
                warnings: Vec::new(),
            })
        }
        fn serialize(
            &self,
            _tree: &Node,
            _warnings: &mut Vec<ConversionWarning>,
        ) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        let format = registry.get("test");
        assert!(format.is_ok());
        assert_eq!(format.unwrap().id(), "test");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            Err(other) => panic!("expected FormatNotFound, got {other:?}"),
            Ok(_) => panic!("expected FormatNotFound, got a dialect"),
        }
    }

    #[test]
    fn test_registry_replace_keeps_position() {
        let mut registry = FormatRegistry::default();
        let before = registry.ids();
        registry.register(crate::formats::slack::SlackFormat);
        assert_eq!(registry.ids(), before);
    }

    #[test]
    fn test_registry_ids_in_registration_order() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(
            registry.ids(),
            vec![
                "obsidian",
                "notion",
                "slack",
                "discord",
                "linear",
                "gfm",
                "gitbook",
                "joplin",
                "reddit",
                "gdocs",
                "mattermost",
                "trello",
                "claude",
                "chatgpt",
                "gemini",
                "grok",
            ]
        );
    }

    #[test]
    fn test_registry_default_trait() {
        let registry = FormatRegistry::default();
        assert!(registry.has("gfm"));
        assert!(registry.has("slack"));
        assert!(registry.has("obsidian"));
    }
}
