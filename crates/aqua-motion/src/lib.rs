//! AquaScript Motion
//!
//! Class-driven CSS animations with awaitable completion, timed class pulses
//! and pointer ripples.

pub mod animation;
pub mod ripple;

pub use animation::{
    pulse_class, run_animation, AnimationEnd, AnimationOptions, CompleteCallback, Completion,
    Iterations, DEFAULT_DURATION_MS, DEFAULT_PULSE_MS,
};
pub use ripple::{
    attach_ripple, attach_ripple_on, emit_ripple, RippleOptions, DEFAULT_RIPPLE_COLOR,
    DEFAULT_RIPPLE_MS, RIPPLE_CLASS,
};
