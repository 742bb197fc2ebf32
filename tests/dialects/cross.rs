//! Targeted pair conversions checking the interesting lossy paths.

use md_babel::warnings;
use md_babel::{convert, FormatRegistry};

use super::fixture;

fn run(input: &str, source: &str, target: &str) -> md_babel::ConversionResult {
    let registry = FormatRegistry::with_defaults();
    convert(&registry, input, source, target).unwrap()
}

#[test]
fn test_obsidian_wikilinks_downgrade_for_slack() {
    let result = run(&fixture("obsidian"), "obsidian", "slack");
    assert!(result.output.contains("the roadmap"));
    assert!(!result.output.contains("[["));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::WIKILINK_TO_LINK));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::EMBED_TO_LINK));
}

#[test]
fn test_obsidian_vault_syntax_survives_to_obsidian() {
    let result = run(&fixture("obsidian"), "obsidian", "obsidian");
    assert!(result.output.contains("[[Projects/Roadmap|the roadmap]]"));
    assert!(result.output.contains("![[diagram.png]]"));
    assert!(result.output.contains("#planning"));
}

#[test]
fn test_gfm_headings_become_bold_in_slack() {
    let result = run(&fixture("gfm"), "gfm", "slack");
    assert!(result.output.contains("*Release notes*"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::HEADING_TO_BOLD));
}

#[test]
fn test_slack_mentions_flatten_for_github() {
    let result = run(&fixture("slack"), "slack", "gfm");
    assert!(result.output.contains("**Status update**"));
    assert!(result.output.contains("@U02ABCDEF"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::MENTION_TO_TEXT));
}

#[test]
fn test_obsidian_callout_crosses_to_github() {
    let result = run(&fixture("obsidian"), "obsidian", "gfm");
    assert!(result.output.contains("[!TIP]- Folded"));
}

#[test]
fn test_callout_flattens_for_notion_emoji_form() {
    let result = run("> [!warning]\n> Mind the gap.\n", "gfm", "notion");
    assert!(result.output.contains("⚠️"));
    assert!(result.output.contains("Mind the gap."));
}

#[test]
fn test_notion_emoji_callout_crosses_to_obsidian() {
    let result = run(&fixture("notion"), "notion", "obsidian");
    assert!(result.output.contains("[!NOTE]"));
    assert!(result.output.contains("Remember to share the recording"));
}

#[test]
fn test_reddit_spoiler_crosses_to_discord() {
    let result = run(&fixture("reddit"), "reddit", "discord");
    assert!(result.output.contains("||the narrator did it||"));
}

#[test]
fn test_discord_spoiler_crosses_to_reddit() {
    let result = run(&fixture("discord"), "discord", "reddit");
    assert!(result.output.contains(">!a legendary sword!<"));
}

#[test]
fn test_spoiler_flattens_for_github() {
    let result = run(&fixture("discord"), "discord", "gfm");
    assert!(result.output.contains("a legendary sword"));
    assert!(!result.output.contains("||"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::SPOILER_TO_TEXT));
}

#[test]
fn test_joplin_highlight_becomes_bold_elsewhere() {
    let result = run(&fixture("joplin"), "joplin", "trello");
    assert!(result.output.contains("**deadline is Friday**"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::HIGHLIGHT_TO_BOLD));
}

#[test]
fn test_frontmatter_drops_outside_vault_formats() {
    let result = run(&fixture("obsidian"), "obsidian", "slack");
    assert!(!result.output.contains("title: Vault note"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message == warnings::FRONTMATTER_DROPPED));
}

#[test]
fn test_frontmatter_survives_between_vault_formats() {
    let result = run(&fixture("obsidian"), "obsidian", "gfm");
    assert!(result.output.contains("title: Vault note"));
}

#[test]
fn test_task_lists_survive_to_discord() {
    let result = run(&fixture("gfm"), "gfm", "discord");
    assert!(result.output.contains("[x] ship it"));
}

#[test]
fn test_math_drops_to_plain_text_in_notion() {
    let result = run(&fixture("claude"), "claude", "notion");
    assert!(result.output.contains("2x"));
    assert!(result.output.contains("```python") || result.output.contains("``` python"));
}
