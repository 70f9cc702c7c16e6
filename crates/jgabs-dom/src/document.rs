#![forbid(unsafe_code)]

//! Arena-backed document tree.
//!
//! Nodes are never freed: removing children only detaches them, so every
//! [`NodeId`] handed out stays valid for the lifetime of the [`Document`].
//! Attribute names are stored lower-cased in insertion order, which keeps
//! serialization deterministic.

use crate::selector::SelectorList;
use crate::{DomError, Result, html};

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Value set by the user, shadowing the markup default until reset.
    dirty_value: Option<String>,
}

/// In-memory document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    location: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document at location `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            location: "/".to_string(),
        }
    }

    /// Parse `source` into a new document.
    pub fn parse(source: &str) -> Result<Self> {
        let mut doc = Self::new();
        let root = doc.root();
        html::parse_into(&mut doc, root, source)?;
        Ok(doc)
    }

    /// Set the location path reported to behaviors.
    #[must_use]
    pub fn with_location(mut self, path: impl Into<String>) -> Self {
        self.location = path.into();
        self
    }

    pub fn set_location(&mut self, path: impl Into<String>) {
        self.location = path.into();
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Nodes allocated so far, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Tree structure ---

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(DomError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::InvalidNode(id))
    }

    fn element(&self, id: NodeId) -> Result<&Element> {
        match &self.node(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Create a detached element. The tag is lower-cased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            dirty_value: None,
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_ok()
    }

    /// Lower-case tag name, `None` for text and document nodes.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|e| e.tag.as_str())
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Whether `id` is attached (transitively) to the document node.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root() {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if matches!(self.node(parent)?.kind, NodeKind::Text(_)) {
            return Err(DomError::NotAnElement(parent));
        }
        if child == self.root() {
            return Err(DomError::Cycle);
        }
        self.node(child)?;
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(DomError::Cycle);
            }
            cursor = self.parent(current);
        }

        if let Some(old) = self.parent(child) {
            self.node_mut(old)?.children.retain(|c| *c != child);
        }
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach every child of `id`.
    pub fn remove_children(&mut self, id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Detached deep copy of `id`. User-entered control values are copied too.
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        let kind = match &self.node(id)?.kind {
            NodeKind::Document => return Err(DomError::NotAnElement(id)),
            other => other.clone(),
        };
        let copy = self.push_node(kind);
        let children = self.node(id)?.children.clone();
        for child in children {
            let child_copy = self.clone_subtree(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    /// Elements under `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out)?;
        Ok(out)
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) -> Result<()> {
        for child in &self.node(id)?.children {
            if self.is_element(*child) {
                out.push(*child);
            }
            self.collect_descendants(*child, out)?;
        }
        Ok(())
    }

    // --- Attributes ---

    /// Attribute value; names are case-insensitive.
    pub fn attr(&self, id: NodeId, name: &str) -> Result<Option<&str>> {
        let name = name.to_ascii_lowercase();
        Ok(self
            .element(id)?
            .attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str()))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id)?;
        match element.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element.attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        self.element_mut(id)?.attrs.retain(|(k, _)| *k != name);
        Ok(())
    }

    /// All attributes in insertion order.
    pub fn attrs(&self, id: NodeId) -> Result<&[(String, String)]> {
        Ok(&self.element(id)?.attrs)
    }

    // --- Class list ---

    pub fn classes(&self, id: NodeId) -> Result<Vec<&str>> {
        Ok(self
            .attr(id, "class")?
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.classes(id)?.contains(&class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let mut classes: Vec<String> = self.classes(id)?.into_iter().map(str::to_string).collect();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.set_attr(id, "class", &classes.join(" "))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        if self.attr(id, "class")?.is_none() {
            return Ok(());
        }
        let classes: Vec<String> = self
            .classes(id)?
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        self.set_attr(id, "class", &classes.join(" "))
    }

    // --- Inline style ---

    fn declarations(&self, id: NodeId) -> Result<Vec<(String, String)>> {
        Ok(self
            .attr(id, "style")?
            .map(parse_declarations)
            .unwrap_or_default())
    }

    /// Inline style property value, if set.
    pub fn style(&self, id: NodeId, property: &str) -> Result<Option<String>> {
        let property = property.to_ascii_lowercase();
        Ok(self
            .declarations(id)?
            .into_iter()
            .find(|(k, _)| *k == property)
            .map(|(_, v)| v))
    }

    /// Set an inline style property; an empty value removes it.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        let property = property.to_ascii_lowercase();
        let mut decls = self.declarations(id)?;
        let value = value.trim();
        if value.is_empty() {
            if decls.is_empty() {
                return Ok(());
            }
            decls.retain(|(k, _)| *k != property);
        } else {
            match decls.iter_mut().find(|(k, _)| *k == property) {
                Some((_, v)) => *v = value.to_string(),
                None => decls.push((property, value.to_string())),
            }
        }
        let serialized = decls
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "style", &serialized)
    }

    // --- Text ---

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Text(text) => Ok(text.clone()),
            _ => {
                let mut out = String::new();
                for child in &node.children {
                    out.push_str(&self.text_content(*child)?);
                }
                Ok(out)
            }
        }
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        if let NodeKind::Text(existing) = &mut self.node_mut(id)?.kind {
            *existing = text.to_string();
            return Ok(());
        }
        self.remove_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    pub(crate) fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    // --- Lookup ---

    /// First connected element with the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Result<Option<NodeId>> {
        if id.is_empty() {
            return Ok(None);
        }
        for node in self.descendants(self.root())? {
            if self.attr(node, "id")? == Some(id) {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Elements matching `selector` under `scope` (whole document when `None`).
    pub fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>> {
        let selectors = SelectorList::parse(selector)?;
        self.select(scope, &selectors)
    }

    /// First element matching `selector`.
    pub fn query(&self, scope: Option<NodeId>, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    /// Run a pre-parsed selector list.
    pub fn select(&self, scope: Option<NodeId>, selectors: &SelectorList) -> Result<Vec<NodeId>> {
        let scope = scope.unwrap_or(self.root());
        Ok(self
            .descendants(scope)?
            .into_iter()
            .filter(|node| selectors.matches(self, *node))
            .collect())
    }

    // --- Form controls ---

    /// Current value of an `input`, `textarea`, `select` or `option`.
    pub fn control_value(&self, id: NodeId) -> Result<String> {
        let element = self.element(id)?;
        if let Some(value) = &element.dirty_value {
            return Ok(value.clone());
        }
        self.default_value(id)
    }

    fn default_value(&self, id: NodeId) -> Result<String> {
        match self.element(id)?.tag.as_str() {
            "textarea" => self.text_content(id),
            "select" => {
                let options = self.query_all(Some(id), "option")?;
                let chosen = options
                    .iter()
                    .copied()
                    .find(|o| matches!(self.attr(*o, "selected"), Ok(Some(_))))
                    .or_else(|| options.first().copied());
                match chosen {
                    Some(option) => self.control_value(option),
                    None => Ok(String::new()),
                }
            }
            "option" => match self.attr(id, "value")? {
                Some(value) => Ok(value.to_string()),
                None => Ok(self.text_content(id)?.trim().to_string()),
            },
            _ => Ok(self.attr(id, "value")?.unwrap_or_default().to_string()),
        }
    }

    /// Simulate the user entering or selecting `value`.
    pub fn set_control_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        self.element_mut(id)?.dirty_value = Some(value.to_string());
        Ok(())
    }

    /// Drop user-entered values of every control under `form`.
    pub fn reset_form(&mut self, form: NodeId) -> Result<()> {
        for node in self.descendants(form)? {
            self.element_mut(node)?.dirty_value = None;
        }
        Ok(())
    }

    // --- Serialization ---

    /// Serialized markup of `id` including itself.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        html::write_node(self, id, &mut out)?;
        Ok(out)
    }

    /// Serialized markup of the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        for child in self.children(id)? {
            html::write_node(self, *child, &mut out)?;
        }
        Ok(out)
    }

    /// Serialized markup of the whole document.
    pub fn to_html(&self) -> Result<String> {
        self.inner_html(self.root())
    }
}

fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim().to_ascii_lowercase();
            let v = v.trim();
            (!k.is_empty() && !v.is_empty()).then(|| (k, v.to_string()))
        })
        .collect()
}
