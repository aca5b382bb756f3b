//! Generic block tree for bake descriptor files.
//!
//! The tree mirrors the nested-block grammar without knowing which block
//! kinds mean what; [`super::decode`] maps it onto the bake model.

/// Contents of a file or of one block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    /// `key = value` attributes, in source order.
    pub attributes: Vec<Attribute>,
    /// Nested blocks, in source order.
    pub blocks: Vec<Block>,
}

impl Body {
    /// Returns the first attribute named `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Expr> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }
}

/// A `key = value` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: Expr,
}

/// A `kind "label" ... { body }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block kind (`target`, `group`, ...).
    pub kind: String,
    /// Zero or more labels.
    pub labels: Vec<String>,
    /// Block contents.
    pub body: Body,
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Quoted string, escapes resolved.
    String(String),
    /// Number as written.
    Number(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// Bare identifier or traversal such as `target.base.tags`.
    Reference(String),
    /// `[a, b]`.
    List(Vec<Expr>),
    /// `{ k = v }`, in source order.
    Object(Vec<(String, Expr)>),
}

impl Expr {
    /// Short name of the expression type, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Reference(_) => "reference",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a textual form for scalar values.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::String(s) | Self::Number(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => Some(String::new()),
            Self::Reference(_) | Self::List(_) | Self::Object(_) => None,
        }
    }
}
