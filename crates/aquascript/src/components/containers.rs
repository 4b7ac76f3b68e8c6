//! Containers

use aqua_dom::EventKind;
use aqua_motion::pulse_class;

use super::Context;
use crate::registry::Binding;

/// Press feedback class on clickable containers
pub const INTERACTIVE: &str = "interactive";

const PRESS_MS: u64 = 300;

pub(crate) fn bindings(_ctx: &Context) -> Vec<Binding> {
    vec![Binding::on(".aq-container.clickable", EventKind::MouseDown, |doc, container, _| {
        pulse_class(doc, Some(container), INTERACTIVE, PRESS_MS);
    })]
}
