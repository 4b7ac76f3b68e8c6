//! AquaScript
//!
//! Interaction layer for AquaScriptCSS components: awaitable class-driven
//! animations, focus trapping, pointer ripples and a reduced-motion guard,
//! plus the wiring that attaches them to `aq-*` components.
//!
//! # Example
//! ```rust,ignore
//! use aquascript::{Aqua, AquaConfig};
//! use aquascript::dom::Document;
//!
//! let aqua = Aqua::new(AquaConfig::load_or_default());
//! let mut doc = Document::new();
//! aqua.init(&mut doc)?;
//! let done = aqua.animate(&mut doc, doc.query_selector(".aq-alert")?, "aq-alert-shake");
//! ```

mod aqua;
mod config;
mod error;
pub mod components;
pub mod registry;

pub use aqua::{Aqua, InitOutcome};
pub use components::{ComponentEvent, Context, ModalController, Notifier};
pub use config::{AlertConfig, AnimationConfig, AquaConfig, ClassConfig, RippleConfig, CONFIG_FILE};
pub use error::{AquaError, Result};
pub use registry::{Binding, Registry, Trigger};

// Re-export sub-crates for advanced usage
pub use aqua_a11y as a11y;
pub use aqua_dom as dom;
pub use aqua_motion as motion;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
