//! Cards

use aqua_dom::{property, Document, DomResult, EventKind, NodeId};
use aqua_motion::{run_animation, AnimationOptions};

use super::{element_with_class, find, find_all, ComponentEvent, Context};
use crate::registry::Binding;

pub const STAGGER: &str = "aq-card-stagger";
pub const SHIMMER: &str = "aq-card-shimmer";

/// Delay between consecutive children of a staggered card
pub const STAGGER_STEP_MS: u64 = 100;

const FLIP_TRANSFORM: &str = "rotateY(15deg) rotateX(5deg)";

/// Children animated by a staggered card: header, then body, then footer
pub fn stagger_targets(doc: &Document, card: NodeId) -> Vec<NodeId> {
    [".aq-card-header > *", ".aq-card-body > *", ".aq-card-footer > *"]
        .into_iter()
        .flat_map(|selector| find_all(doc, card, selector))
        .collect()
}

fn stagger(doc: &mut Document, card: NodeId) {
    for (i, child) in stagger_targets(doc, card).into_iter().enumerate() {
        doc.set_timeout(i as u64 * STAGGER_STEP_MS, move |doc| {
            run_animation(doc, Some(child), STAGGER, AnimationOptions::new().duration(600));
        });
    }
}

/// Turn the skeleton shimmer on or off
pub fn shimmer(doc: &mut Document, card: NodeId, enable: bool) {
    doc.toggle_class(card, "skeleton", Some(enable));
}

/// Set the card's progress bar to `percent`, creating the bar if needed
pub fn set_progress(doc: &mut Document, card: NodeId, percent: f64) -> DomResult<NodeId> {
    let bar = match find(doc, card, ".aq-card-progress-bar") {
        Some(bar) => bar,
        None => {
            let progress = match find(doc, card, ".aq-card-progress") {
                Some(progress) => progress,
                None => {
                    let progress = element_with_class(doc, "div", "aq-card-progress");
                    doc.append_child(card, progress)?;
                    progress
                }
            };
            let bar = element_with_class(doc, "div", "aq-card-progress-bar");
            doc.append_child(progress, bar)?;
            bar
        }
    };
    doc.set_style(bar, property::WIDTH, &format!("{percent}%"));
    Ok(bar)
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let clicked = ctx.events.clone();
    let drag_start = ctx.events.clone();
    let drag_end = ctx.events.clone();

    vec![
        Binding::on(".aq-card.stagger", EventKind::MouseEnter, |doc, card, _| stagger(doc, card)),
        Binding::on(".aq-card.hover-reveal", EventKind::MouseEnter, |doc, card, _| {
            let content = find(doc, card, ".aq-card-hover-content");
            run_animation(doc, content, STAGGER, AnimationOptions::new().duration(600));
        }),
        Binding::on(".aq-card.flip", EventKind::MouseEnter, |doc, card, _| {
            doc.set_style(card, property::TRANSFORM, FLIP_TRANSFORM)
        }),
        Binding::on(".aq-card.flip", EventKind::MouseLeave, |doc, card, _| {
            doc.set_style(card, property::TRANSFORM, "")
        }),
        Binding::init(".aq-card.skeleton", |doc, card| {
            run_animation(doc, Some(card), SHIMMER, AnimationOptions::new().duration(1500).infinite());
        }),
        Binding::on(".aq-card.clickable", EventKind::Click, move |doc, card, _| {
            clicked.emit(doc, ComponentEvent::CardClicked { card })
        }),
        Binding::init(".aq-card.draggable", |doc, card| {
            if let Err(err) = doc.set_attribute(card, "draggable", "true") {
                tracing::warn!("Cannot make card {:?} draggable: {}", card, err);
            }
        }),
        Binding::on(".aq-card.draggable", EventKind::DragStart, move |doc, card, _| {
            doc.add_class(card, "dragging");
            drag_start.emit(doc, ComponentEvent::CardDragStart { card });
        }),
        Binding::on(".aq-card.draggable", EventKind::DragEnd, move |doc, card, _| {
            doc.remove_class(card, "dragging");
            drag_end.emit(doc, ComponentEvent::CardDragEnd { card });
        }),
    ]
}
