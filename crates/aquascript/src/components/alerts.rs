//! Alerts
//!
//! Dismissal with a slide-out, auto-close, clickable shake, progress-driven
//! dismissal and programmatic creation.

use std::rc::Rc;

use aqua_dom::{Document, DomResult, EventKind, NodeId};
use aqua_motion::{run_animation, AnimationOptions};

use super::{closest, element_with_class, find, ComponentEvent, Context, Notifier};
use crate::registry::Binding;

pub const SLIDE_IN: &str = "aq-alert-slide-in";
pub const SLIDE_OUT: &str = "aq-alert-slide-out";
pub const SHAKE: &str = "aq-alert-shake";

const SLIDE_IN_MS: u64 = 600;
const SHAKE_MS: u64 = 600;

/// Click handler for an alert action button
pub type ActionCallback = Rc<dyn Fn(&mut Document)>;

/// Button in the alert's action row
#[derive(Clone)]
pub struct AlertAction {
    pub label: String,
    pub class: String,
    pub on_click: Option<ActionCallback>,
}

impl AlertAction {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            class: String::new(),
            on_click: None,
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Document) + 'static,
    {
        self.on_click = Some(Rc::new(callback));
        self
    }
}

impl std::fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .field("class", &self.class)
            .finish()
    }
}

/// Description of an alert built by [`show`]
#[derive(Debug, Clone)]
pub struct AlertOptions {
    pub title: String,
    pub description: String,
    /// Variant class: info, success, warning, danger
    pub kind: String,
    /// Extra style class, e.g. `outline`
    pub style: String,
    pub icon: Option<String>,
    pub actions: Vec<AlertAction>,
    pub autoclose_ms: Option<u64>,
    /// Parent element; defaults to `.aq-alert-container.top-right` or `<body>`
    pub container: Option<NodeId>,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: "info".to_string(),
            style: String::new(),
            icon: None,
            actions: Vec::new(),
            autoclose_ms: None,
            container: None,
        }
    }
}

impl AlertOptions {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn action(mut self, action: AlertAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn autoclose(mut self, ms: u64) -> Self {
        self.autoclose_ms = Some(ms);
        self
    }

    pub fn container(mut self, container: NodeId) -> Self {
        self.container = Some(container);
        self
    }
}

/// Dismiss an alert: slide it out, then remove it. Returns false if it is
/// already closing.
pub fn close(doc: &mut Document, ctx: &Context, alert: NodeId) -> bool {
    close_with(doc, ctx.config.alerts.dismiss_duration_ms, &ctx.events, alert)
}

fn close_with(doc: &mut Document, dismiss_ms: u64, events: &Notifier, alert: NodeId) -> bool {
    if !doc.is_element(alert) || doc.has_class(alert, "closing") {
        return false;
    }
    doc.add_class(alert, "closing");
    tracing::debug!("Closing alert {:?}", alert);

    let events = events.clone();
    run_animation(
        doc,
        Some(alert),
        SLIDE_OUT,
        AnimationOptions::new()
            .duration(dismiss_ms)
            .on_complete(move |doc, _| {
                if let Err(err) = doc.remove(alert) {
                    tracing::debug!("Alert {:?} already gone: {}", alert, err);
                }
                events.emit(doc, ComponentEvent::AlertClosed { alert });
            }),
    );
    true
}

/// Parse `data-autoclose`, falling back when it is not a positive number
pub fn autoclose_delay(value: Option<&str>, fallback_ms: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(fallback_ms)
}

fn schedule_close(doc: &mut Document, ctx: &Context, alert: NodeId, delay_ms: u64) {
    let dismiss_ms = ctx.config.alerts.dismiss_duration_ms;
    let events = ctx.events.clone();
    doc.set_timeout(delay_ms, move |doc| {
        close_with(doc, dismiss_ms, &events, alert);
    });
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let close_ctx = ctx.clone();
    let progress_ctx = ctx.clone();
    let auto_ctx = ctx.clone();
    let clicked = ctx.events.clone();

    vec![
        Binding::on(".aq-alert-close", EventKind::Click, move |doc, button, _| {
            if let Some(alert) = closest(doc, button, ".aq-alert") {
                close(doc, &close_ctx, alert);
            }
        }),
        Binding::on(".aq-alert.clickable", EventKind::Click, move |doc, alert, _| {
            run_animation(doc, Some(alert), SHAKE, AnimationOptions::new().duration(SHAKE_MS));
            clicked.emit(doc, ComponentEvent::AlertClicked { alert });
        }),
        Binding::on(
            ".aq-alert.with-progress .aq-alert-progress",
            EventKind::AnimationEnd,
            move |doc, bar, event| {
                // Only the bar's own countdown, not animations bubbling from inside it
                if event.target != Some(bar) {
                    return;
                }
                // The countdown's end must not reach the alert, where it would
                // finish the slide-out that close is about to start
                event.stop_propagation();
                if let Some(alert) = closest(doc, bar, ".aq-alert") {
                    close(doc, &progress_ctx, alert);
                }
            },
        ),
        Binding::init(".aq-alert[data-autoclose]", move |doc, alert| {
            let fallback = auto_ctx.config.alerts.autoclose_fallback_ms;
            let delay = autoclose_delay(doc.get_attribute(alert, "data-autoclose").as_deref(), fallback);
            schedule_close(doc, &auto_ctx, alert, delay);
        }),
        Binding::init(".aq-alert", |doc, alert| {
            if doc.has_class(alert, "aq-animated") {
                return;
            }
            run_animation(doc, Some(alert), SLIDE_IN, AnimationOptions::new().duration(SLIDE_IN_MS));
            doc.add_class(alert, "aq-animated");
        }),
    ]
}

/// Build an alert, attach it and schedule its auto-close
pub fn show(doc: &mut Document, ctx: &Context, options: AlertOptions) -> DomResult<NodeId> {
    let class = format!("aq-alert {} {}", options.kind, options.style);
    let alert = element_with_class(doc, "div", class.trim());
    doc.set_attribute(alert, "role", "alert")?;

    if let Some(icon) = &options.icon {
        let span = element_with_class(doc, "span", "aq-alert-icon");
        doc.set_text_content(span, icon)?;
        doc.append_child(alert, span)?;
    }

    let content = element_with_class(doc, "div", "aq-alert-content");
    doc.append_child(alert, content)?;
    if !options.title.is_empty() {
        let title = element_with_class(doc, "div", "aq-alert-title");
        doc.set_text_content(title, &options.title)?;
        doc.append_child(content, title)?;
    }
    if !options.description.is_empty() {
        let description = element_with_class(doc, "div", "aq-alert-description");
        doc.set_text_content(description, &options.description)?;
        doc.append_child(content, description)?;
    }

    if !options.actions.is_empty() {
        let row = element_with_class(doc, "div", "aq-alert-actions");
        doc.append_child(content, row)?;
        for action in &options.actions {
            let class = format!("aq-btn {}", action.class);
            let button = element_with_class(doc, "button", class.trim());
            doc.set_attribute(button, "type", "button")?;
            doc.set_text_content(button, &action.label)?;
            doc.append_child(row, button)?;
            if let Some(callback) = action.on_click.clone() {
                doc.add_event_listener(button, EventKind::Click, move |doc, _| callback(doc));
            }
        }
    }

    let close_button = element_with_class(doc, "button", "aq-alert-close");
    doc.set_attribute(close_button, "type", "button")?;
    doc.set_attribute(close_button, "aria-label", "Close")?;
    doc.set_text_content(close_button, "\u{00d7}")?;
    doc.append_child(alert, close_button)?;
    let close_ctx = ctx.clone();
    doc.add_event_listener(close_button, EventKind::Click, move |doc, _| {
        close(doc, &close_ctx, alert);
    });

    if let Some(ms) = options.autoclose_ms {
        doc.set_attribute(alert, "data-autoclose", &ms.to_string())?;
    }

    let parent = match options.container {
        Some(container) => container,
        None => match find(doc, doc.root(), ".aq-alert-container.top-right") {
            Some(container) => container,
            None => doc.body(),
        },
    };
    doc.append_child(parent, alert)?;
    ctx.events.emit(doc, ComponentEvent::AlertShown { alert });

    if let Some(ms) = options.autoclose_ms {
        schedule_close(doc, ctx, alert, ms);
    }
    Ok(alert)
}
