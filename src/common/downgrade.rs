//! Downgrade engine: rewrite custom node kinds to portable equivalents.
//!
//! Every serializer runs this before emitting output, passing the set of
//! kinds it supports natively as the skip set. The pass is idempotent: a
//! downgraded tree contains no custom kinds, so a second run performs zero
//! rewrites and emits zero warnings.

use crate::ir::nodes::{replace_node, splice_nodes, Node};
use crate::warnings::{self, warn, ConversionWarning, Severity};

/// The custom node kinds the downgrade engine knows how to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomKind {
    Wikilink,
    Embed,
    Callout,
    Tag,
    Mention,
    Emoji,
    Spoiler,
    Underline,
    Highlight,
    Subtext,
    Superscript,
    InlineMath,
    BlockMath,
    Frontmatter,
}

const ALL_CUSTOM_KINDS: [CustomKind; 14] = [
    CustomKind::Wikilink,
    CustomKind::Embed,
    CustomKind::Callout,
    CustomKind::Tag,
    CustomKind::Mention,
    CustomKind::Emoji,
    CustomKind::Spoiler,
    CustomKind::Underline,
    CustomKind::Highlight,
    CustomKind::Subtext,
    CustomKind::Superscript,
    CustomKind::InlineMath,
    CustomKind::BlockMath,
    CustomKind::Frontmatter,
];

/// Rewrite every custom-kind node not in `skip` to its nearest standard
/// equivalent, appending one warning per substitution.
///
/// Runs one independent depth-first pass per kind, so skip-set membership
/// is checked once per kind rather than per node.
pub fn downgrade_custom_nodes(
    root: &mut Node,
    warnings: &mut Vec<ConversionWarning>,
    skip: &[CustomKind],
) {
    for kind in ALL_CUSTOM_KINDS {
        if skip.contains(&kind) {
            continue;
        }
        apply_rule(root, kind, warnings);
    }
}

fn matches_kind(node: &Node, kind: CustomKind) -> bool {
    matches!(
        (node, kind),
        (Node::Wikilink(_), CustomKind::Wikilink)
            | (Node::Embed(_), CustomKind::Embed)
            | (Node::Callout(_), CustomKind::Callout)
            | (Node::Tag(_), CustomKind::Tag)
            | (Node::Mention(_), CustomKind::Mention)
            | (Node::Emoji(_), CustomKind::Emoji)
            | (Node::Spoiler(_), CustomKind::Spoiler)
            | (Node::Underline(_), CustomKind::Underline)
            | (Node::Highlight(_), CustomKind::Highlight)
            | (Node::Subtext(_), CustomKind::Subtext)
            | (Node::Superscript(_), CustomKind::Superscript)
            | (Node::InlineMath(_), CustomKind::InlineMath)
            | (Node::BlockMath(_), CustomKind::BlockMath)
            | (Node::Frontmatter(_), CustomKind::Frontmatter)
    )
}

/// One depth-first pass for a single kind.
///
/// The walk stays at the rewrite index instead of advancing, so spliced-in
/// children and replacement subtrees are themselves examined on the next
/// iteration, so nothing inserted mid-walk escapes the rule.
fn apply_rule(node: &mut Node, kind: CustomKind, warnings: &mut Vec<ConversionWarning>) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let mut i = 0;
    while i < children.len() {
        if matches_kind(&children[i], kind) {
            rewrite(children, i, warnings);
        } else {
            apply_rule(&mut children[i], kind, warnings);
            i += 1;
        }
    }
}

fn rewrite(children: &mut Vec<Node>, index: usize, warnings: &mut Vec<ConversionWarning>) {
    let node = std::mem::replace(&mut children[index], Node::Text(String::new()));
    match node {
        Node::Wikilink(wl) => {
            let text = wl.alias.clone().unwrap_or_else(|| wl.target.clone());
            let url = match &wl.heading {
                Some(heading) => format!("{}#{heading}", wl.target),
                None => wl.target,
            };
            replace_node(children, index, Node::link(url, vec![Node::text(text)]));
            warnings.push(warn(
                Severity::Warning,
                warnings::WIKILINK_TO_LINK,
                Some("wikilink"),
            ));
        }
        Node::Embed(embed) => {
            let text = embed.alt.unwrap_or_else(|| embed.target.clone());
            replace_node(
                children,
                index,
                Node::link(embed.target, vec![Node::text(text)]),
            );
            warnings.push(warn(Severity::Warning, warnings::EMBED_TO_LINK, Some("embed")));
        }
        Node::Callout(callout) => {
            let title = callout
                .title
                .unwrap_or_else(|| callout.callout_type.clone());
            let mut quote_children =
                vec![Node::paragraph(vec![Node::strong(vec![Node::text(title)])])];
            quote_children.extend(callout.children);
            replace_node(children, index, Node::blockquote(quote_children));
            warnings.push(warn(
                Severity::Info,
                warnings::CALLOUT_TO_BLOCKQUOTE,
                Some("callout"),
            ));
        }
        Node::Tag(name) => {
            replace_node(children, index, Node::text(format!("#{name}")));
            warnings.push(warn(Severity::Info, warnings::TAG_DROPPED, Some("tag")));
        }
        Node::Mention(mention) => {
            let label = mention.label.unwrap_or(mention.id);
            replace_node(children, index, Node::text(format!("@{label}")));
            warnings.push(warn(
                Severity::Info,
                warnings::MENTION_TO_TEXT,
                Some("mention"),
            ));
        }
        Node::Emoji(name) => {
            replace_node(children, index, Node::text(format!(":{name}:")));
            warnings.push(warn(Severity::Info, warnings::EMOJI_TO_TEXT, Some("emoji")));
        }
        Node::Spoiler(inner) => {
            splice_nodes(children, index, 1, inner);
            warnings.push(warn(
                Severity::Info,
                warnings::SPOILER_TO_TEXT,
                Some("spoiler"),
            ));
        }
        Node::Subtext(inner) => {
            splice_nodes(children, index, 1, inner);
            warnings.push(warn(
                Severity::Info,
                warnings::SUBTEXT_TO_TEXT,
                Some("subtext"),
            ));
        }
        Node::Underline(inner) => {
            replace_node(children, index, Node::emphasis(inner));
            warnings.push(warn(
                Severity::Info,
                warnings::UNDERLINE_TO_EMPHASIS,
                Some("underline"),
            ));
        }
        Node::Highlight(inner) => {
            replace_node(children, index, Node::strong(inner));
            warnings.push(warn(
                Severity::Info,
                warnings::HIGHLIGHT_TO_BOLD,
                Some("highlight"),
            ));
        }
        Node::Superscript(text) => {
            replace_node(children, index, Node::text(text));
            warnings.push(warn(
                Severity::Info,
                warnings::SUPERSCRIPT_TO_TEXT,
                Some("superscript"),
            ));
        }
        // Math content is preserved verbatim, so no warning is emitted.
        Node::InlineMath(text) => {
            replace_node(children, index, Node::text(format!("${text}$")));
        }
        Node::BlockMath(text) => {
            replace_node(children, index, Node::code(Some("math".to_string()), text));
        }
        Node::Frontmatter(_) => {
            splice_nodes(children, index, 1, Vec::new());
            warnings.push(warn(
                Severity::Info,
                warnings::FRONTMATTER_DROPPED,
                Some("frontmatter"),
            ));
        }
        other => {
            // Not a custom kind; put it back untouched.
            children[index] = other;
        }
    }
}
