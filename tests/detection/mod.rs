//! Dialect sniffing tests: one distinctive sample per detectable dialect,
//! plus the fallback behavior.

use md_babel::{detect_format, FormatRegistry, DEFAULT_FORMAT};

fn detect(input: &str) -> String {
    let registry = FormatRegistry::with_defaults();
    detect_format(&registry, input).to_string()
}

#[test]
fn test_empty_input_falls_back_to_default() {
    assert_eq!(detect(""), DEFAULT_FORMAT);
    assert_eq!(detect("  \n  "), DEFAULT_FORMAT);
}

#[test]
fn test_plain_text_falls_back_to_default() {
    assert_eq!(detect("Just a sentence with nothing distinctive."), "gfm");
}

#[test]
fn test_obsidian_wikilinks() {
    assert_eq!(
        detect("See [[Some Note]] and the graph view.\n\nAlso [[Another|aliased]]."),
        "obsidian"
    );
}

#[test]
fn test_obsidian_embeds_and_tags() {
    assert_eq!(
        detect("![[attachment.pdf]]\n\nFiled under #projects/alpha today."),
        "obsidian"
    );
}

#[test]
fn test_slack_mrkdwn_links_and_mentions() {
    assert_eq!(
        detect("ping <@U02ABCDEF> about <https://example.com|the doc>"),
        "slack"
    );
}

#[test]
fn test_slack_channels_and_quotes() {
    assert_eq!(
        detect("&gt; from the thread\nsee <#C024BE91L|general>"),
        "slack"
    );
}

#[test]
fn test_discord_spoilers_and_subtext() {
    assert_eq!(
        detect("The ending is ||spoiled here||.\n-# this is subtext\n"),
        "discord"
    );
}

#[test]
fn test_reddit_spoilers() {
    assert_eq!(
        detect("Spoiler: >!he was dead all along!< and it lands well."),
        "reddit"
    );
}

#[test]
fn test_joplin_highlights() {
    assert_eq!(detect("Remember ==this part== of the lecture."), "joplin");
}

#[test]
fn test_notion_emoji_callouts() {
    assert_eq!(
        detect("> ⚠️ Do not deploy on Fridays.\n\nRegular prose follows."),
        "notion"
    );
}

#[test]
fn test_gdocs_styled_html_paste() {
    assert_eq!(
        detect(r#"<span style="font-weight:700" class="c1">Bold text</span> pasted"#),
        "gdocs"
    );
}

#[test]
fn test_gfm_footnotes_and_fences() {
    // Callouts alone are ambiguous with Obsidian; footnotes and fenced
    // code tip the balance to GitHub.
    assert_eq!(
        detect("Breaking change in v2[^1].\n\n```rust\nfn main() {}\n```\n\n[^1]: changelog"),
        "gfm"
    );
}

#[test]
fn test_obsidian_outranks_gfm_on_shared_callout_syntax() {
    // Same callout plus a wikilink tips the balance to Obsidian.
    assert_eq!(
        detect("> [!WARNING]\n> See [[Migration Guide]] first."),
        "obsidian"
    );
}
