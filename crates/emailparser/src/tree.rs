//! Parse tree for a single address.
//!
//! The typed view ([`Mailbox`] and friends) encodes the grammar invariants in
//! its shape: a local part is exactly one of quoted or dotted, a subdomain is
//! a non-empty list of labels with the dots between them implied. The generic
//! view ([`Node`]) is the ordered, labeled tree with every terminal present,
//! whose concatenated text equals the parsed input.

use std::fmt;

/// Production name of a parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Production {
    /// `local_part "@" domain`.
    Mailbox,
    /// `quoted_string / dot_string`.
    LocalPart,
    /// `dquote quoted_content dquote`.
    QuotedString,
    /// Body of a quoted string, escapes kept verbatim.
    QuotedContent,
    /// Atoms and dots of an unquoted local part.
    DotString,
    /// A double quote.
    Dquote,
    /// A single `.`.
    Dot,
    /// Run of unquoted local-part characters.
    Atom,
    /// The `@` separator.
    At,
    /// Domain after `@`.
    Domain,
    /// Dot-separated labels.
    Subdomain,
    /// One domain label.
    Label,
}

impl Production {
    /// Returns the production name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mailbox => "mailbox",
            Self::LocalPart => "local_part",
            Self::QuotedString => "quoted_string",
            Self::QuotedContent => "quoted_content",
            Self::DotString => "dot_string",
            Self::Dquote => "dquote",
            Self::Dot => "dot",
            Self::Atom => "atom",
            Self::At => "at",
            Self::Domain => "domain",
            Self::Subdomain => "subdomain",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed `local_part "@" domain`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mailbox<'a> {
    local_part: LocalPart<'a>,
    domain: Domain<'a>,
}

impl<'a> Mailbox<'a> {
    pub(crate) const fn new(local_part: LocalPart<'a>, domain: Domain<'a>) -> Self {
        Self { local_part, domain }
    }

    /// Returns the part before `@`.
    #[must_use]
    pub const fn local_part(&self) -> &LocalPart<'a> {
        &self.local_part
    }

    /// Returns the part after `@`.
    #[must_use]
    pub const fn domain(&self) -> &Domain<'a> {
        &self.domain
    }

    /// Converts to the generic labeled tree.
    #[must_use]
    pub fn to_node(&self) -> Node<'a> {
        Node::branch(
            Production::Mailbox,
            vec![
                self.local_part.to_node(),
                Node::leaf(Production::At, "@"),
                self.domain.to_node(),
            ],
        )
    }
}

impl fmt::Display for Mailbox<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// Part of the address before `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocalPart<'a> {
    /// `"..."` form.
    Quoted(QuotedString<'a>),
    /// Unquoted atoms and dots.
    Dotted(DotString<'a>),
}

impl<'a> LocalPart<'a> {
    /// Returns true for the quoted form.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        matches!(self, Self::Quoted(_))
    }

    fn to_node(&self) -> Node<'a> {
        let child = match self {
            Self::Quoted(q) => q.to_node(),
            Self::Dotted(d) => d.to_node(),
        };
        Node::branch(Production::LocalPart, vec![child])
    }
}

impl fmt::Display for LocalPart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quoted(q) => write!(f, "\"{}\"", q.content),
            Self::Dotted(d) => d.tokens.iter().try_for_each(|t| f.write_str(t.as_str())),
        }
    }
}

/// Quoted local part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuotedString<'a> {
    content: &'a str,
}

impl<'a> QuotedString<'a> {
    pub(crate) const fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Returns the text between the quotes, escapes included.
    #[must_use]
    pub const fn content(&self) -> &'a str {
        self.content
    }

    /// Returns the content with backslash escapes resolved.
    #[must_use]
    pub fn unescaped(&self) -> String {
        let mut out = String::with_capacity(self.content.len());
        let mut chars = self.content.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn to_node(&self) -> Node<'a> {
        Node::branch(
            Production::QuotedString,
            vec![
                Node::leaf(Production::Dquote, "\""),
                Node::leaf(Production::QuotedContent, self.content),
                Node::leaf(Production::Dquote, "\""),
            ],
        )
    }
}

/// Terminal of an unquoted local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocalToken<'a> {
    /// A single `.`.
    Dot,
    /// A run of `atext`.
    Atom(&'a str),
}

impl<'a> LocalToken<'a> {
    /// Returns the matched text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match *self {
            Self::Dot => ".",
            Self::Atom(text) => text,
        }
    }

    const fn to_node(self) -> Node<'a> {
        match self {
            Self::Dot => Node::leaf(Production::Dot, "."),
            Self::Atom(text) => Node::leaf(Production::Atom, text),
        }
    }
}

/// Unquoted local part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DotString<'a> {
    tokens: Vec<LocalToken<'a>>,
}

impl<'a> DotString<'a> {
    pub(crate) const fn new(tokens: Vec<LocalToken<'a>>) -> Self {
        Self { tokens }
    }

    /// Returns the dots and atoms in input order.
    #[must_use]
    pub fn tokens(&self) -> &[LocalToken<'a>] {
        &self.tokens
    }

    /// Returns the atoms, skipping dots.
    pub fn atoms(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            LocalToken::Atom(text) => Some(*text),
            LocalToken::Dot => None,
        })
    }

    fn to_node(&self) -> Node<'a> {
        Node::branch(
            Production::DotString,
            self.tokens.iter().map(|t| t.to_node()).collect(),
        )
    }
}

/// Part of the address after `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Domain<'a> {
    subdomain: Subdomain<'a>,
}

impl<'a> Domain<'a> {
    pub(crate) const fn new(subdomain: Subdomain<'a>) -> Self {
        Self { subdomain }
    }

    /// Returns the dot-separated labels.
    #[must_use]
    pub const fn subdomain(&self) -> &Subdomain<'a> {
        &self.subdomain
    }

    /// Returns the labels in order.
    #[must_use]
    pub fn labels(&self) -> &[&'a str] {
        &self.subdomain.labels
    }

    fn to_node(&self) -> Node<'a> {
        Node::branch(Production::Domain, vec![self.subdomain.to_node()])
    }
}

impl fmt::Display for Domain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subdomain.labels.join("."))
    }
}

/// Non-empty sequence of labels separated by single dots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Subdomain<'a> {
    labels: Vec<&'a str>,
}

impl<'a> Subdomain<'a> {
    pub(crate) fn new(first: &'a str) -> Self {
        Self {
            labels: vec![first],
        }
    }

    pub(crate) fn push(&mut self, label: &'a str) {
        self.labels.push(label);
    }

    /// Returns the labels in order.
    #[must_use]
    pub fn labels(&self) -> &[&'a str] {
        &self.labels
    }

    fn to_node(&self) -> Node<'a> {
        let mut children = Vec::with_capacity(self.labels.len() * 2);
        for (i, &label) in self.labels.iter().enumerate() {
            if i > 0 {
                children.push(Node::leaf(Production::Dot, "."));
            }
            children.push(Node::leaf(Production::Label, label));
        }
        Node::branch(Production::Subdomain, children)
    }
}

/// Node of the generic parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node<'a> {
    production: Production,
    #[cfg_attr(feature = "serde", serde(flatten))]
    kind: NodeKind<'a>,
}

/// Contents of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind<'a> {
    /// Child nodes in production order.
    Children(Vec<Node<'a>>),
    /// Raw matched text of a terminal.
    Text(&'a str),
}

impl<'a> Node<'a> {
    const fn branch(production: Production, children: Vec<Self>) -> Self {
        Self {
            production,
            kind: NodeKind::Children(children),
        }
    }

    const fn leaf(production: Production, text: &'a str) -> Self {
        Self {
            production,
            kind: NodeKind::Text(text),
        }
    }

    /// Returns the production this node was matched by.
    #[must_use]
    pub const fn production(&self) -> Production {
        self.production
    }

    /// Returns the node contents.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind<'a> {
        &self.kind
    }

    /// Returns the children of a branch node; empty for terminals.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            NodeKind::Children(children) => children,
            NodeKind::Text(_) => &[],
        }
    }

    /// Returns the matched text of a terminal node.
    #[must_use]
    pub const fn text(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Children(_) => None,
        }
    }

    /// Returns all terminals under this node, left to right.
    #[must_use]
    pub fn terminals(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals(&self, out: &mut Vec<&'a str>) {
        match &self.kind {
            NodeKind::Text(text) => out.push(*text),
            NodeKind::Children(children) => {
                for child in children {
                    child.collect_terminals(out);
                }
            }
        }
    }

    /// Concatenates the terminal text under this node.
    #[must_use]
    pub fn source(&self) -> String {
        self.terminals().concat()
    }
}

/// Writes the node as an s-expression, e.g. `(label "b")`.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.production)?;
        match &self.kind {
            NodeKind::Text(text) => write!(f, " {text:?}")?,
            NodeKind::Children(children) => {
                for child in children {
                    write!(f, " {child}")?;
                }
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    fn sample() -> Mailbox<'static> {
        let mut sub = Subdomain::new("example");
        sub.push("com");
        Mailbox::new(
            LocalPart::Dotted(DotString::new(vec![
                LocalToken::Atom("john"),
                LocalToken::Dot,
                LocalToken::Atom("doe"),
            ])),
            Domain::new(sub),
        )
    }

    #[test]
    fn test_display_round_trips_text() {
        assert_eq!(sample().to_string(), "john.doe@example.com");
    }

    #[test]
    fn test_node_source_matches_display() {
        let mailbox = sample();
        assert_eq!(mailbox.to_node().source(), mailbox.to_string());
    }

    #[test]
    fn test_mailbox_node_shape() {
        let node = sample().to_node();
        assert_eq!(node.production(), Production::Mailbox);
        let kinds: Vec<_> = node.children().iter().map(Node::production).collect();
        assert_eq!(
            kinds,
            vec![Production::LocalPart, Production::At, Production::Domain]
        );
        assert_eq!(node.children()[1].text(), Some("@"));
    }

    #[test]
    fn test_subdomain_node_interleaves_dots() {
        let node = sample().to_node();
        let subdomain = &node.children()[2].children()[0];
        let kinds: Vec<_> = subdomain.children().iter().map(Node::production).collect();
        assert_eq!(
            kinds,
            vec![Production::Label, Production::Dot, Production::Label]
        );
    }

    #[test]
    fn test_sexp_display() {
        let mut sub = Subdomain::new("b");
        let mailbox = Mailbox::new(
            LocalPart::Quoted(QuotedString::new("a b")),
            Domain::new({
                sub.push("c");
                sub
            }),
        );
        assert_eq!(
            mailbox.to_node().to_string(),
            r#"(mailbox (local_part (quoted_string (dquote "\"") (quoted_content "a b") (dquote "\""))) (at "@") (domain (subdomain (label "b") (dot ".") (label "c"))))"#
        );
    }

    #[test]
    fn test_unescaped_quoted_content() {
        let q = QuotedString::new(r#"a\"b\\c\d"#);
        assert_eq!(q.unescaped(), r#"a"b\cd"#);
    }

    #[test]
    fn test_dot_string_atoms() {
        let d = DotString::new(vec![
            LocalToken::Dot,
            LocalToken::Atom("a"),
            LocalToken::Dot,
            LocalToken::Dot,
            LocalToken::Atom("b"),
        ]);
        assert_eq!(d.atoms().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
