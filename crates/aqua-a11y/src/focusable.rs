//! Focusable elements
//!
//! Decides whether an element takes part in sequential keyboard navigation.

use aqua_dom::{Document, NodeId};

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// No tabindex attribute
    Unset,
    /// tabindex="0" or positive
    Sequential(i32),
    /// Negative tabindex: focusable by script only
    NotFocusable,
}

impl TabIndex {
    /// Parse a tabindex attribute. A present but unparsable value still puts
    /// the element in the tab order, like `tabindex="0"`.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Unset;
        };
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Self::NotFocusable,
            Ok(n) => Self::Sequential(n),
            Err(_) => Self::Sequential(0),
        }
    }

    pub fn of(doc: &Document, node: NodeId) -> Self {
        Self::parse(doc.get_attribute(node, "tabindex").as_deref())
    }
}

/// Tags that can carry the `disabled` attribute
const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea"];

/// Whether `node` is keyboard-reachable: a link with `href`, an enabled form
/// control, or any element with a non-negative tabindex.
pub fn is_focusable(doc: &Document, node: NodeId) -> bool {
    let Some(tag) = doc.tag_name(node) else {
        return false;
    };

    let tab_index = TabIndex::of(doc, node);
    if tab_index == TabIndex::NotFocusable {
        return false;
    }

    let is_control = FORM_CONTROLS.contains(&tag);
    if is_control && doc.has_attribute(node, "disabled") {
        return false;
    }

    is_control
        || (tag == "a" && doc.has_attribute(node, "href"))
        || matches!(tab_index, TabIndex::Sequential(_))
}

/// Focusable descendants of `container` in document order
pub fn focusable_descendants(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.descendant_elements(container)
        .into_iter()
        .filter(|&node| is_focusable(doc, node))
        .collect()
}
