//! AquaScript DOM - Platform surface
//!
//! Arena-backed document model that the AquaScript interaction layer runs
//! against: class lists, inline styles, bounding boxes, focus, typed event
//! dispatch, timers on a virtual clock and the reduced-motion media preference.

mod classlist;
mod document;
mod error;
mod event;
mod geometry;
mod listener;
mod media;
mod node;
mod selector;
mod style;
mod timers;

pub use classlist::DOMTokenList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use event::{
    AnimationData, Event, EventKind, EventPayload, KeyData, KeyModifiers, PointerData,
};
pub use geometry::DOMRect;
pub use listener::{Listener, ListenerId, ListenerOptions};
pub use media::MediaPreferences;
pub use node::{ElementData, Node, NodeData};
pub use selector::{
    AttributeMatcher, AttributeSelector, Combinator, Component, Compound, Selector,
    SelectorError, SelectorList,
};
pub use style::{property, InlineStyle};
pub use timers::TimerId;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
