//! DOM Events
//!
//! Typed events for the interaction layer: pointer, keyboard, focus, form
//! and animation lifecycle.

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    MouseEnter,
    MouseLeave,
    KeyDown,
    KeyUp,
    Focus,
    Blur,
    Input,
    Change,
    Submit,
    AnimationEnd,
    TransitionEnd,
    DragStart,
    DragEnd,
}

impl EventKind {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(
            self,
            EventKind::Focus | EventKind::Blur | EventKind::MouseEnter | EventKind::MouseLeave
        )
    }

    /// Check if the default action can be suppressed
    pub fn cancelable(&self) -> bool {
        matches!(
            self,
            EventKind::Click
                | EventKind::MouseDown
                | EventKind::MouseUp
                | EventKind::KeyDown
                | EventKind::KeyUp
                | EventKind::Submit
                | EventKind::DragStart
        )
    }

    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Submit => "submit",
            EventKind::AnimationEnd => "animationend",
            EventKind::TransitionEnd => "transitionend",
            EventKind::DragStart => "dragstart",
            EventKind::DragEnd => "dragend",
        }
    }
}

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Keyboard payload
#[derive(Debug, Clone, PartialEq)]
pub struct KeyData {
    pub key: String,
    pub modifiers: KeyModifiers,
}

/// Pointer payload (viewport coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerData {
    pub client_x: f64,
    pub client_y: f64,
    pub button: i16,
}

/// Animation lifecycle payload
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationData {
    pub animation_name: String,
    pub elapsed_ms: f64,
}

/// Event-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Pointer(PointerData),
    Key(KeyData),
    Animation(AnimationData),
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: Option<NodeId>,
    pub current_target: Option<NodeId>,
    pub payload: EventPayload,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Virtual clock time of dispatch (ms)
    pub timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event with the kind's default flags and no payload
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            payload: EventPayload::None,
            bubbles: kind.bubbles(),
            cancelable: kind.cancelable(),
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Pointer event at viewport coordinates (primary button)
    pub fn with_pointer(kind: EventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            payload: EventPayload::Pointer(PointerData {
                client_x,
                client_y,
                button: 0,
            }),
            ..Self::new(kind)
        }
    }

    /// Create a click event
    pub fn click(client_x: f64, client_y: f64) -> Self {
        Self::with_pointer(EventKind::Click, client_x, client_y)
    }

    /// Create a mouse down event
    pub fn mouse_down(client_x: f64, client_y: f64) -> Self {
        Self::with_pointer(EventKind::MouseDown, client_x, client_y)
    }

    /// Create a keydown event
    pub fn key_down(key: &str, modifiers: KeyModifiers) -> Self {
        Self {
            payload: EventPayload::Key(KeyData {
                key: key.to_string(),
                modifiers,
            }),
            ..Self::new(EventKind::KeyDown)
        }
    }

    /// Create an animationend event
    pub fn animation_end(animation_name: &str, elapsed_ms: f64) -> Self {
        Self {
            payload: EventPayload::Animation(AnimationData {
                animation_name: animation_name.to_string(),
                elapsed_ms,
            }),
            ..Self::new(EventKind::AnimationEnd)
        }
    }

    pub fn pointer(&self) -> Option<&PointerData> {
        match &self.payload {
            EventPayload::Pointer(p) => Some(p),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&KeyData> {
        match &self.payload {
            EventPayload::Key(k) => Some(k),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&AnimationData> {
        match &self.payload {
            EventPayload::Animation(a) => Some(a),
            _ => None,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
