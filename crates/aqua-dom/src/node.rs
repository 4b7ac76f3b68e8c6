//! DOM Node
//!
//! Arena node with parent/children links. `class` and `style` are kept as
//! structured data and surfaced through the generic attribute accessors.

use std::borrow::Cow;

use crate::{DOMRect, DOMTokenList, InlineStyle, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (None if root or detached)
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element-specific data
#[derive(Debug, Default)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `class` and `style`
    pub attrs: Vec<(String, String)>,
    /// Class list
    pub classes: DOMTokenList,
    /// Inline style
    pub style: InlineStyle,
    /// Bounding client rect supplied by the host
    pub rect: DOMRect,
    /// Form control value
    pub value: String,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "class" if !self.classes.is_empty() => Some(Cow::Owned(self.classes.value())),
            "style" if !self.style.is_empty() => Some(Cow::Owned(self.style.css_text())),
            "class" | "style" => None,
            _ => self
                .attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| Cow::Borrowed(v.as_str())),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.classes.set_value(value),
            "style" => self.style = InlineStyle::parse(value),
            _ => match self.attrs.iter_mut().find(|(n, _)| *n == name) {
                Some(attr) => attr.1 = value.to_string(),
                None => self.attrs.push((name, value.to_string())),
            },
        }
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match name {
            "class" => {
                let had = !self.classes.is_empty();
                self.classes = DOMTokenList::new();
                had
            }
            "style" => {
                let had = !self.style.is_empty();
                self.style = InlineStyle::new();
                had
            }
            _ => {
                let before = self.attrs.len();
                self.attrs.retain(|(n, _)| n != name);
                self.attrs.len() < before
            }
        }
    }
}
