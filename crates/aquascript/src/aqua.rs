//! Animation facade
//!
//! One entry point over the motion and accessibility utilities, with the
//! configured defaults applied, plus the one-shot component initialization.

use aqua_a11y::{FocusTrap, MotionPreference};
use aqua_dom::{Document, Event, ListenerId, NodeId, TimerId};
use aqua_motion::{AnimationOptions, Completion};

use crate::components::{self, ComponentEvent, Context, ModalController};
use crate::registry::Registry;
use crate::{AquaConfig, Result};

/// Which branch [`Aqua::init`] took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Reduced motion is preferred; animations were switched off on this many
    /// elements and no components were wired
    Suppressed { elements: usize },
    /// Components were wired with this many element bindings
    Initialized { bindings: usize },
}

/// The AquaScript facade
#[derive(Debug, Clone, Default)]
pub struct Aqua {
    ctx: Context,
}

impl Aqua {
    pub fn new(config: AquaConfig) -> Self {
        Self {
            ctx: Context::new(config),
        }
    }

    pub fn config(&self) -> &AquaConfig {
        &self.ctx.config
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn modals(&self) -> &ModalController {
        &self.ctx.modals
    }

    /// Receive every component notification
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&mut Document, &ComponentEvent) + 'static,
    {
        self.ctx.events.subscribe(callback);
    }

    /// The component wiring table `init` applies
    pub fn registry(&self) -> Registry {
        components::registry(&self.ctx)
    }

    /// Wire every component, unless the user prefers reduced motion, in which
    /// case library animations are switched off instead. The preference is
    /// read once here; later changes are not tracked.
    pub fn init(&self, doc: &mut Document) -> Result<InitOutcome> {
        if MotionPreference::from_document(doc).should_reduce() {
            let elements = self.suppress_all_animations(doc);
            tracing::info!("Reduced motion preferred, suppressed {} elements", elements);
            return Ok(InitOutcome::Suppressed { elements });
        }

        let bindings = self.registry().apply(doc)?;
        let body = doc.body();
        doc.add_class(body, &self.ctx.config.classes.initialized);
        self.ctx.events.emit(doc, ComponentEvent::ComponentsInitialized);
        tracing::info!("AquaScript components initialized ({} bindings)", bindings);
        Ok(InitOutcome::Initialized { bindings })
    }

    pub fn run_animation(
        &self,
        doc: &mut Document,
        target: Option<NodeId>,
        animation_class: &str,
        options: AnimationOptions,
    ) -> Completion {
        aqua_motion::run_animation(doc, target, animation_class, options)
    }

    /// Run an animation once with the configured default duration
    pub fn animate(&self, doc: &mut Document, target: Option<NodeId>, animation_class: &str) -> Completion {
        let options = self.ctx.config.animation_options();
        aqua_motion::run_animation(doc, target, animation_class, options)
    }

    /// Timed class pulse; `None` uses the configured pulse duration
    pub fn pulse_class(
        &self,
        doc: &mut Document,
        target: Option<NodeId>,
        class: &str,
        duration_ms: Option<u64>,
    ) -> Option<TimerId> {
        let duration = duration_ms.unwrap_or(self.ctx.config.animation.pulse_duration_ms);
        aqua_motion::pulse_class(doc, target, class, duration)
    }

    pub fn trap_focus(&self, doc: &mut Document, container: Option<NodeId>) -> FocusTrap {
        aqua_a11y::trap_focus(doc, container)
    }

    /// Ripple with the configured colour and duration
    pub fn emit_ripple(&self, doc: &mut Document, event: &Event) {
        aqua_motion::emit_ripple(doc, event, &self.ctx.config.ripple_options());
    }

    pub fn attach_ripple(&self, doc: &mut Document, element: NodeId) -> Option<ListenerId> {
        aqua_motion::attach_ripple(doc, element, self.ctx.config.ripple_options())
    }

    pub fn prefers_reduced_motion(&self, doc: &Document) -> bool {
        aqua_a11y::prefers_reduced_motion(doc)
    }

    /// Switch off animations on elements carrying the configured class marker
    pub fn suppress_all_animations(&self, doc: &mut Document) -> usize {
        aqua_a11y::suppress_animations(doc, &self.ctx.config.classes.marker)
    }
}
