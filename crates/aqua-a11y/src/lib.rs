//! AquaScript Accessibility
//!
//! Keyboard focus containment for dialogs and the reduced-motion guard.
//!
//! Features:
//! - Focusable capability predicate (native controls, links, tabindex)
//! - Focus trap sessions that wrap Tab / Shift+Tab at the boundaries
//! - prefers-reduced-motion detection and animation suppression

pub mod focusable;
pub mod focus_trap;
pub mod reduced_motion;

pub use focusable::{focusable_descendants, is_focusable, TabIndex};
pub use focus_trap::{trap_focus, FocusTrap};
pub use reduced_motion::{
    prefers_reduced_motion, suppress_all_animations, suppress_animations, MotionPreference,
    AQUA_CLASS_MARKER, REDUCED_MOTION_QUERY,
};
