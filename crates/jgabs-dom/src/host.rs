#![forbid(unsafe_code)]

//! [`Dom`] implementation for the in-memory [`Document`].

use jgabs_core::Dom;

use crate::DomError;
use crate::document::{Document, NodeId};

impl Dom for Document {
    type Node = NodeId;
    type Error = DomError;

    fn location_path(&self) -> String {
        self.location().to_string()
    }

    fn element_by_id(&self, id: &str) -> Result<Option<NodeId>, DomError> {
        Document::element_by_id(self, id)
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Result<Vec<NodeId>, DomError> {
        Document::query_all(self, scope.copied(), selector)
    }

    fn attr(&self, node: &NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(Document::attr(self, *node, name)?.map(str::to_string))
    }

    fn set_attr(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        Document::set_attr(self, *node, name, value)
    }

    fn remove_attr(&mut self, node: &NodeId, name: &str) -> Result<(), DomError> {
        Document::remove_attr(self, *node, name)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> Result<bool, DomError> {
        Document::has_class(self, *node, class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        Document::add_class(self, *node, class)
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        Document::remove_class(self, *node, class)
    }

    fn text_content(&self, node: &NodeId) -> Result<String, DomError> {
        Document::text_content(self, *node)
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        Document::set_text_content(self, *node, text)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(Document::create_element(self, tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        Document::append_child(self, *parent, *child)
    }

    fn clear_children(&mut self, node: &NodeId) -> Result<(), DomError> {
        self.remove_children(*node)
    }

    fn clone_deep(&mut self, node: &NodeId) -> Result<NodeId, DomError> {
        self.clone_subtree(*node)
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        Document::set_style(self, *node, property, value)
    }

    fn control_value(&self, node: &NodeId) -> Result<String, DomError> {
        Document::control_value(self, *node)
    }

    fn reset_form(&mut self, form: &NodeId) -> Result<(), DomError> {
        Document::reset_form(self, *form)
    }
}
