#![forbid(unsafe_code)]

//! In-memory document model.
//!
//! [`Document`] is a small arena-backed element tree with just enough of the
//! browser DOM to run the page behaviors off-browser: attributes, class lists,
//! inline style, form-control values, deep clone, an HTML fragment parser, a
//! serializer and a CSS selector subset. It implements [`jgabs_core::Dom`].

pub mod document;
pub mod html;
pub mod selector;

mod host;

pub use document::{Document, NodeId};
pub use selector::SelectorList;

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// Document operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The handle does not belong to this document.
    InvalidNode(NodeId),
    /// The operation needs an element but the node is text or the document.
    NotAnElement(NodeId),
    /// The HTML source could not be parsed.
    HtmlParse(String),
    /// The selector uses syntax outside the supported subset.
    UnsupportedSelector(String),
    /// Appending would make a node its own ancestor.
    Cycle,
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNode(id) => write!(f, "invalid node handle {}", id.index()),
            Self::NotAnElement(id) => write!(f, "node {} is not an element", id.index()),
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(sel) => write!(f, "unsupported selector: {sel}"),
            Self::Cycle => write!(f, "append would create a cycle"),
        }
    }
}

impl std::error::Error for DomError {}
