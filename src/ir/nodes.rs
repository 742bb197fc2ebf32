//! Core data structures for the Intermediate Representation (IR).
//!
//! Every dialect parses into this tree and serializes out of it. The kind
//! set is closed: adding a kind means touching every exhaustive match, so
//! new kinds are a compile-time-checked exercise rather than a runtime
//! surprise.

/// A universal, semantic representation of a document node.
///
/// Standard kinds map one-to-one onto the common markdown vocabulary.
/// Custom kinds carry dialect-specific constructs; serializers for dialects
/// that lack a construct downgrade it (see `common::downgrade`) rather than
/// failing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Standard block kinds
    Root(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading(Heading),
    Blockquote(Vec<Node>),
    List(List),
    ListItem(ListItem),
    Code(CodeBlock),
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    ThematicBreak,
    Html(String),
    Frontmatter(Frontmatter),

    // Standard inline kinds
    Text(String),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    Delete(Vec<Node>),
    InlineCode(String),
    Link(Link),
    Image(Image),
    Break,

    // Custom kinds
    Wikilink(Wikilink),
    Embed(Embed),
    Callout(Callout),
    Tag(String),
    Mention(Mention),
    Emoji(String),
    Spoiler(Vec<Node>),
    Underline(Vec<Node>),
    Highlight(Vec<Node>),
    Subtext(Vec<Node>),
    Superscript(String),
    InlineMath(String),
    BlockMath(String),
}

/// Represents a heading with a depth of 1 through 6.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

/// Represents a list; children are `ListItem` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub children: Vec<Node>,
}

/// Represents a list item. `checked` is set for task-list items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub children: Vec<Node>,
}

/// Represents a fenced code block with an optional language tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub lang: Option<String>,
    pub value: String,
}

/// Represents a link; children are the link text.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub children: Vec<Node>,
}

/// Represents an image embed.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

/// Frontmatter block; the value is the raw content without delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub format: FrontmatterFormat,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

/// `[[target#heading|alias]]` style internal link.
#[derive(Debug, Clone, PartialEq)]
pub struct Wikilink {
    pub target: String,
    pub alias: Option<String>,
    pub heading: Option<String>,
}

/// `![[target|alt]]` style embed.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub target: String,
    pub alt: Option<String>,
}

/// A typed, titled block rendered from `> [!TYPE]` style blockquotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub callout_type: String,
    pub title: Option<String>,
    pub foldable: bool,
    pub children: Vec<Node>,
}

/// A user mention such as Slack's `<@U123>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    pub id: String,
    pub label: Option<String>,
}

impl Node {
    pub fn text(value: impl Into<String>) -> Node {
        Node::Text(value.into())
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph(children)
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Node {
        Node::Heading(Heading { depth, children })
    }

    pub fn strong(children: Vec<Node>) -> Node {
        Node::Strong(children)
    }

    pub fn emphasis(children: Vec<Node>) -> Node {
        Node::Emphasis(children)
    }

    pub fn delete(children: Vec<Node>) -> Node {
        Node::Delete(children)
    }

    pub fn blockquote(children: Vec<Node>) -> Node {
        Node::Blockquote(children)
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Link(Link {
            url: url.into(),
            children,
        })
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Node {
        Node::Image(Image {
            url: url.into(),
            alt: alt.into(),
        })
    }

    pub fn code(lang: Option<String>, value: impl Into<String>) -> Node {
        Node::Code(CodeBlock {
            lang,
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Node {
        Node::InlineCode(value.into())
    }

    pub fn list(ordered: bool, children: Vec<Node>) -> Node {
        Node::List(List { ordered, children })
    }

    pub fn list_item(children: Vec<Node>) -> Node {
        Node::ListItem(ListItem {
            checked: None,
            children,
        })
    }

    pub fn mention(id: impl Into<String>, label: Option<String>) -> Node {
        Node::Mention(Mention {
            id: id.into(),
            label,
        })
    }

    /// The stable string tag for this kind, used in warnings.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Root(_) => "root",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::Blockquote(_) => "blockquote",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Code(_) => "code",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::ThematicBreak => "thematicBreak",
            Node::Html(_) => "html",
            Node::Frontmatter(_) => "frontmatter",
            Node::Text(_) => "text",
            Node::Strong(_) => "strong",
            Node::Emphasis(_) => "emphasis",
            Node::Delete(_) => "delete",
            Node::InlineCode(_) => "inlineCode",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::Break => "break",
            Node::Wikilink(_) => "wikilink",
            Node::Embed(_) => "embed",
            Node::Callout(_) => "callout",
            Node::Tag(_) => "tag",
            Node::Mention(_) => "mention",
            Node::Emoji(_) => "emoji",
            Node::Spoiler(_) => "spoiler",
            Node::Underline(_) => "underline",
            Node::Highlight(_) => "highlight",
            Node::Subtext(_) => "subtext",
            Node::Superscript(_) => "superscript",
            Node::InlineMath(_) => "inlineMath",
            Node::BlockMath(_) => "math",
        }
    }

    /// Immutable view of a parent kind's children; `None` for leaf kinds.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::Table(children)
            | Node::TableRow(children)
            | Node::TableCell(children)
            | Node::Strong(children)
            | Node::Emphasis(children)
            | Node::Delete(children)
            | Node::Spoiler(children)
            | Node::Underline(children)
            | Node::Highlight(children)
            | Node::Subtext(children) => Some(children),
            Node::Heading(h) => Some(&h.children),
            Node::List(l) => Some(&l.children),
            Node::ListItem(li) => Some(&li.children),
            Node::Link(l) => Some(&l.children),
            Node::Callout(c) => Some(&c.children),
            Node::Code(_)
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::Frontmatter(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Break
            | Node::Wikilink(_)
            | Node::Embed(_)
            | Node::Tag(_)
            | Node::Mention(_)
            | Node::Emoji(_)
            | Node::Superscript(_)
            | Node::InlineMath(_)
            | Node::BlockMath(_) => None,
        }
    }

    /// Mutable access to a parent kind's children; `None` for leaf kinds.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::Table(children)
            | Node::TableRow(children)
            | Node::TableCell(children)
            | Node::Strong(children)
            | Node::Emphasis(children)
            | Node::Delete(children)
            | Node::Spoiler(children)
            | Node::Underline(children)
            | Node::Highlight(children)
            | Node::Subtext(children) => Some(children),
            Node::Heading(h) => Some(&mut h.children),
            Node::List(l) => Some(&mut l.children),
            Node::ListItem(li) => Some(&mut li.children),
            Node::Link(l) => Some(&mut l.children),
            Node::Callout(c) => Some(&mut c.children),
            Node::Code(_)
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::Frontmatter(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Break
            | Node::Wikilink(_)
            | Node::Embed(_)
            | Node::Tag(_)
            | Node::Mention(_)
            | Node::Emoji(_)
            | Node::Superscript(_)
            | Node::InlineMath(_)
            | Node::BlockMath(_) => None,
        }
    }

    /// Recursive plain-text projection of a subtree.
    ///
    /// Literal kinds contribute their value, parent kinds the concatenation
    /// of their children. Structural-only kinds contribute nothing.
    pub fn to_plain_string(&self) -> String {
        match self {
            Node::Text(value)
            | Node::InlineCode(value)
            | Node::Html(value)
            | Node::Superscript(value)
            | Node::InlineMath(value)
            | Node::BlockMath(value)
            | Node::Emoji(value)
            | Node::Tag(value) => value.clone(),
            Node::Code(code) => code.value.clone(),
            Node::Image(image) => image.alt.clone(),
            Node::Wikilink(wl) => wl.alias.clone().unwrap_or_else(|| wl.target.clone()),
            Node::Embed(embed) => embed.alt.clone().unwrap_or_else(|| embed.target.clone()),
            Node::Mention(mention) => mention.label.clone().unwrap_or_else(|| mention.id.clone()),
            Node::Frontmatter(fm) => fm.value.clone(),
            Node::ThematicBreak | Node::Break => String::new(),
            _ => {
                let mut out = String::new();
                if let Some(children) = self.children() {
                    for child in children {
                        out.push_str(&child.to_plain_string());
                    }
                }
                out
            }
        }
    }
}

/// Replace the child at `index` with `node`.
///
/// All rewrites share this discipline: locate parent and index, replace or
/// splice, never rebuild whole subtrees.
pub fn replace_node(children: &mut Vec<Node>, index: usize, node: Node) {
    children[index] = node;
}

/// Remove `delete_count` children at `index` and insert `nodes` in their place.
pub fn splice_nodes(children: &mut Vec<Node>, index: usize, delete_count: usize, nodes: Vec<Node>) {
    children.splice(index..index + delete_count, nodes);
}
