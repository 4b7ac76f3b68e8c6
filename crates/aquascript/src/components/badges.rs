//! Badges

use aqua_dom::{Document, DomResult, EventKind, NodeId};
use aqua_motion::{pulse_class, run_animation, AnimationOptions};

use super::{element_with_class, find, ComponentEvent, Context};
use crate::registry::Binding;

pub const COUNTER_POP: &str = "aq-badge-counter-pop";
pub const PULSE: &str = "aq-badge-pulse";

/// Presence status shown by a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStatus {
    Online,
    Offline,
    Busy,
    Away,
}

impl BadgeStatus {
    pub const ALL: [BadgeStatus; 4] = [Self::Online, Self::Offline, Self::Busy, Self::Away];

    pub fn class(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Busy => "busy",
            Self::Away => "away",
        }
    }
}

/// Replace any status class on `badge` with `status`
pub fn set_status(doc: &mut Document, badge: NodeId, status: BadgeStatus) {
    if let Some(classes) = doc.class_list_mut(badge) {
        let all: Vec<&str> = BadgeStatus::ALL.iter().map(BadgeStatus::class).collect();
        classes.remove(&all);
        classes.add(&[status.class()]);
    }
}

/// Show `count` in the badge's counter, creating it if needed, and pop it
pub fn update_counter(doc: &mut Document, badge: NodeId, count: i64) -> DomResult<NodeId> {
    let counter = match find(doc, badge, ".aq-badge.counter") {
        Some(counter) => counter,
        None => {
            let counter = element_with_class(doc, "span", "aq-badge counter");
            doc.append_child(badge, counter)?;
            counter
        }
    };
    doc.set_text_content(counter, &count.to_string())?;
    run_animation(doc, Some(counter), COUNTER_POP, AnimationOptions::new().duration(300));
    Ok(counter)
}

fn looping(doc: &mut Document, element: NodeId, class: &str, duration_ms: u64) {
    run_animation(doc, Some(element), class, AnimationOptions::new().duration(duration_ms).infinite());
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let clicked = ctx.events.clone();

    vec![
        Binding::init(".aq-badge.counter", |doc, badge| {
            run_animation(doc, Some(badge), COUNTER_POP, AnimationOptions::new().duration(300));
        }),
        Binding::init(".aq-badge.pulse", |doc, badge| looping(doc, badge, PULSE, 2000)),
        Binding::init(".aq-badge.bounce", |doc, badge| looping(doc, badge, "aq-badge-bounce", 2000)),
        Binding::init(".aq-badge.shake", |doc, badge| {
            run_animation(doc, Some(badge), "aq-badge-shake", AnimationOptions::new().duration(500));
        }),
        Binding::init(".aq-badge.spin .aq-badge-icon", |doc, icon| {
            looping(doc, icon, "aq-badge-spin", 1000)
        }),
        Binding::on(".aq-badge.clickable", EventKind::Click, move |doc, badge, _| {
            doc.toggle_class(badge, "active", None);
            clicked.emit(doc, ComponentEvent::BadgeClicked { badge });
        }),
        Binding::on(".aq-badge.ripple", EventKind::MouseDown, |doc, badge, _| {
            pulse_class(doc, Some(badge), PULSE, 600);
        }),
    ]
}
