//! Class-driven animations
//!
//! An animation is a CSS class whose keyframes the stylesheet defines. Running
//! one adds the class plus inline timing, then waits for `animationend` and
//! puts the element back the way it was.

use std::cell::Cell;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

use aqua_dom::{property, Document, Event, EventKind, ListenerOptions, NodeId, TimerId};
use smol::channel::{self, Receiver, TryRecvError};

/// Default animation duration
pub const DEFAULT_DURATION_MS: u64 = 600;

/// Default duration of a timed class pulse
pub const DEFAULT_PULSE_MS: u64 = 800;

/// animation-iteration-count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Infinite => f.write_str("infinite"),
        }
    }
}

/// Callback run once the animation has been cleaned up
pub type CompleteCallback = Box<dyn FnOnce(&mut Document, &AnimationEnd)>;

/// Animation options
pub struct AnimationOptions {
    pub duration_ms: u64,
    pub iterations: Iterations,
    pub on_complete: Option<CompleteCallback>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            iterations: Iterations::default(),
            on_complete: None,
        }
    }
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn infinite(self) -> Self {
        self.iterations(Iterations::Infinite)
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Document, &AnimationEnd) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("duration_ms", &self.duration_ms)
            .field("iterations", &self.iterations)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// The `animationend` notification that finished a run
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEnd {
    /// Element the animation ran on
    pub element: NodeId,
    /// Node the event originated from; a descendant when it bubbled up
    pub target: NodeId,
    pub animation_name: String,
    pub elapsed_ms: f64,
}

impl AnimationEnd {
    fn from_event(element: NodeId, animation_class: &str, event: &Event) -> Self {
        let data = event.animation();
        Self {
            element,
            target: event.target.unwrap_or(element),
            animation_name: data
                .map(|a| a.animation_name.clone())
                .unwrap_or_else(|| animation_class.to_string()),
            elapsed_ms: data.map_or(0.0, |a| a.elapsed_ms),
        }
    }
}

/// Completion of one animation run
///
/// Resolves exactly once: with the terminating event, or with `None` when
/// there was nothing to animate. Await it, or inspect it synchronously with
/// [`Completion::is_resolved`] and [`Completion::event`].
#[derive(Debug)]
pub struct Completion {
    receiver: Receiver<AnimationEnd>,
    outcome: Option<Option<AnimationEnd>>,
}

impl Completion {
    fn pending(receiver: Receiver<AnimationEnd>) -> Self {
        Self {
            receiver,
            outcome: None,
        }
    }

    /// Completion that is already resolved with nothing
    pub fn empty() -> Self {
        let (_, receiver) = channel::bounded(1);
        Self {
            receiver,
            outcome: Some(None),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some() || !self.receiver.is_empty() || self.receiver.is_closed()
    }

    fn settle(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        match self.receiver.try_recv() {
            Ok(end) => self.outcome = Some(Some(end)),
            Err(TryRecvError::Closed) => self.outcome = Some(None),
            Err(TryRecvError::Empty) => {}
        }
    }

    /// Terminating event, if the run has finished with one
    pub fn event(&mut self) -> Option<&AnimationEnd> {
        self.settle();
        self.outcome.as_ref().and_then(Option::as_ref)
    }

    /// Wait for the run to finish
    pub async fn wait(mut self) -> Option<AnimationEnd> {
        if let Some(outcome) = self.outcome.take() {
            return outcome;
        }
        // A closed channel means the listener went away without firing
        self.receiver.recv().await.ok()
    }
}

impl IntoFuture for Completion {
    type Output = Option<AnimationEnd>;
    type IntoFuture = Pin<Box<dyn Future<Output = Option<AnimationEnd>>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

/// Run `animation_class` on `target`.
///
/// Sets inline `animation-duration` and `animation-iteration-count`, adds the
/// class and waits for the first `animationend` that reaches the element,
/// including one bubbling up from a descendant. Then removes the class,
/// clears both inline properties, runs `on_complete` and resolves.
///
/// With no target, or a node that is not an element, nothing happens and the
/// returned completion is already resolved with `None`. Infinite animations
/// never complete. Overlapping runs on one element are not coordinated.
pub fn run_animation(
    doc: &mut Document,
    target: Option<NodeId>,
    animation_class: &str,
    options: AnimationOptions,
) -> Completion {
    let Some(element) = target.filter(|&node| doc.is_element(node)) else {
        tracing::debug!("run_animation({}): no target element", animation_class);
        return Completion::empty();
    };

    let AnimationOptions {
        duration_ms,
        iterations,
        on_complete,
    } = options;

    doc.set_style(element, property::ANIMATION_DURATION, &format!("{duration_ms}ms"));
    doc.set_style(element, property::ANIMATION_ITERATION_COUNT, &iterations.to_string());
    doc.add_class(element, animation_class);
    tracing::trace!(
        "Animating {:?} with {} ({}ms x {})",
        element,
        animation_class,
        duration_ms,
        iterations
    );

    let (sender, receiver) = channel::bounded(1);
    let on_complete = Cell::new(on_complete);
    let class = animation_class.to_string();

    doc.add_event_listener_with(
        element,
        EventKind::AnimationEnd,
        ListenerOptions::once(),
        move |doc: &mut Document, event: &mut Event| {
            doc.remove_class(element, &class);
            doc.set_style(element, property::ANIMATION_DURATION, "");
            doc.set_style(element, property::ANIMATION_ITERATION_COUNT, "");

            let end = AnimationEnd::from_event(element, &class, event);
            if let Some(callback) = on_complete.take() {
                callback(doc, &end);
            }
            // The caller may have dropped the completion
            let _ = sender.try_send(end);
        },
    );

    Completion::pending(receiver)
}

/// Add `class` to `target` and remove it again after `duration_ms`.
/// Needs no animation event. Returns the removal timer.
pub fn pulse_class(
    doc: &mut Document,
    target: Option<NodeId>,
    class: &str,
    duration_ms: u64,
) -> Option<TimerId> {
    let element = target.filter(|&node| doc.is_element(node))?;
    doc.add_class(element, class);

    let class = class.to_string();
    Some(doc.set_timeout(duration_ms, move |doc| doc.remove_class(element, &class)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn element(doc: &mut Document) -> NodeId {
        let el = doc.create_element("div");
        let body = doc.body();
        doc.append_child(body, el).unwrap();
        el
    }

    #[test]
    fn test_iterations_display() {
        assert_eq!(Iterations::Count(3).to_string(), "3");
        assert_eq!(Iterations::Infinite.to_string(), "infinite");
        assert_eq!(Iterations::default(), Iterations::Count(1));
    }

    #[test]
    fn test_sets_transient_state() {
        let mut doc = Document::new();
        let el = element(&mut doc);
        let completion = run_animation(
            &mut doc,
            Some(el),
            "aq-btn-pulse",
            AnimationOptions::new().duration(2000).infinite(),
        );

        assert!(!completion.is_resolved());
        assert!(doc.has_class(el, "aq-btn-pulse"));
        assert_eq!(doc.get_style(el, property::ANIMATION_DURATION), Some("2000ms"));
        assert_eq!(doc.get_style(el, property::ANIMATION_ITERATION_COUNT), Some("infinite"));
    }

    #[test]
    fn test_cleanup_on_animationend() {
        let mut doc = Document::new();
        let el = element(&mut doc);
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        let mut completion = run_animation(
            &mut doc,
            Some(el),
            "aq-alert-shake",
            AnimationOptions::new().on_complete(move |_, end| {
                assert_eq!(end.animation_name, "aq-alert-shake");
                flag.set(true);
            }),
        );

        doc.dispatch_event(el, Event::animation_end("aq-alert-shake", 600.0));
        assert!(called.get());
        assert!(!doc.has_class(el, "aq-alert-shake"));
        assert_eq!(doc.get_style(el, property::ANIMATION_DURATION), None);
        assert_eq!(completion.event().map(|e| e.elapsed_ms), Some(600.0));
    }

    #[test]
    fn test_absent_target_resolves_empty() {
        let mut doc = Document::new();
        let mut completion = run_animation(&mut doc, None, "aq-card-stagger", AnimationOptions::new());
        assert!(completion.is_resolved());
        assert!(completion.event().is_none());
        assert_eq!(smol::block_on(async { completion.await }), None);
    }

    #[test]
    fn test_pulse_class() {
        let mut doc = Document::new();
        let el = element(&mut doc);
        assert!(pulse_class(&mut doc, Some(el), "interactive", 300).is_some());
        assert!(doc.has_class(el, "interactive"));
        doc.advance(300);
        assert!(!doc.has_class(el, "interactive"));

        assert!(pulse_class(&mut doc, None, "interactive", 300).is_none());
    }
}
