#![forbid(unsafe_code)]

//! The document host abstraction.
//!
//! Behaviors never touch a concrete document. They talk to a [`Dom`], which
//! is implemented by the in-memory `jgabs_dom::Document` (tests, host-driven
//! runs) and by the browser binding in `jgabs-web` (wasm32).
//!
//! Node handles are cheap to clone and compare by identity. Every operation
//! that can fail on a host returns `Result<_, Self::Error>`; a missing
//! *optional* element is never an error and is reported as `None` or an
//! empty list instead.

use std::fmt::Debug;

/// A document host that behaviors can query and mutate.
pub trait Dom {
    /// Handle to an element in this document.
    type Node: Clone + PartialEq + Debug;
    /// Host failure type.
    type Error: std::error::Error;

    /// Path component of the current page location (e.g. `/about.html`).
    fn location_path(&self) -> String;

    /// Element with the given `id`, first in document order.
    fn element_by_id(&self, id: &str) -> Result<Option<Self::Node>, Self::Error>;

    /// All elements matching `selector`, in document order.
    ///
    /// With `scope = None` the whole document is searched, otherwise only
    /// descendants of `scope`.
    fn query_all(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Vec<Self::Node>, Self::Error>;

    /// First element matching `selector`.
    fn query(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Option<Self::Node>, Self::Error> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    /// Attribute value, `None` when absent.
    fn attr(&self, node: &Self::Node, name: &str) -> Result<Option<String>, Self::Error>;

    fn set_attr(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_attr(&mut self, node: &Self::Node, name: &str) -> Result<(), Self::Error>;

    fn has_class(&self, node: &Self::Node, class: &str) -> Result<bool, Self::Error>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), Self::Error>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), Self::Error>;

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self, node: &Self::Node) -> Result<String, Self::Error>;

    /// Replace all children with a single text node (none when `text` is empty).
    fn set_text_content(&mut self, node: &Self::Node, text: &str) -> Result<(), Self::Error>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node)
    -> Result<(), Self::Error>;

    /// Remove every child of `node`.
    fn clear_children(&mut self, node: &Self::Node) -> Result<(), Self::Error>;

    /// Detached deep copy of `node` and its subtree.
    fn clone_deep(&mut self, node: &Self::Node) -> Result<Self::Node, Self::Error>;

    /// Set one inline style property; an empty `value` removes it.
    fn set_style(
        &mut self,
        node: &Self::Node,
        property: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// Current value of a form control (`select`, `input`, `textarea`).
    fn control_value(&self, node: &Self::Node) -> Result<String, Self::Error>;

    /// Restore every control inside `form` to its default value.
    fn reset_form(&mut self, form: &Self::Node) -> Result<(), Self::Error>;
}
