//! Forms
//!
//! Floating labels, blur-time validation with a shake on failure, animated
//! feedback, check-input notifications and submit blocking while any control
//! is marked invalid.

use aqua_dom::{Document, DomResult, EventKind, NodeId};
use aqua_motion::{pulse_class, run_animation, AnimationOptions};

use super::{find_all, ComponentEvent, Context};
use crate::registry::Binding;

pub const SHAKE: &str = "shake";
pub const INIT_SHAKE: &str = "aq-form-shake";
pub const FADE_IN: &str = "aq-form-fade-in";

const SHAKE_MS: u64 = 500;

/// Constraint validation for a form control.
///
/// A control is invalid when it is `required` and its trimmed value is empty,
/// when it is `type="email"` with a non-empty value lacking `@`, or when a
/// non-empty value is shorter than `minlength`.
pub fn check_validity(doc: &Document, control: NodeId) -> bool {
    let value = doc.value(control).unwrap_or_default();

    if doc.has_attribute(control, "required") && value.trim().is_empty() {
        return false;
    }
    if value.is_empty() {
        return true;
    }

    let is_email = doc
        .get_attribute(control, "type")
        .is_some_and(|t| t.eq_ignore_ascii_case("email"));
    if is_email && !value.contains('@') {
        return false;
    }

    match doc
        .get_attribute(control, "minlength")
        .and_then(|n| n.trim().parse::<usize>().ok())
    {
        Some(min) => value.chars().count() >= min,
        None => true,
    }
}

fn mark(doc: &mut Document, control: NodeId, valid: bool) {
    doc.toggle_class(control, "valid", Some(valid));
    doc.toggle_class(control, "invalid", Some(!valid));
}

/// Validate every `.aq-form-control` in `form`, marking each `valid` or
/// `invalid`. Returns whether all passed.
pub fn validate(doc: &mut Document, form: NodeId) -> bool {
    let mut all_valid = true;
    for control in find_all(doc, form, ".aq-form-control") {
        let valid = check_validity(doc, control);
        mark(doc, control, valid);
        all_valid &= valid;
    }
    tracing::debug!("Validated form {:?}: {}", form, all_valid);
    all_valid
}

/// Toggle the form's loading state and the `disabled` flag on its controls
pub fn set_loading(doc: &mut Document, form: NodeId, loading: bool) -> DomResult<()> {
    doc.toggle_class(form, "aq-form-loading", Some(loading));
    for control in find_all(doc, form, ".aq-form-control") {
        if loading {
            doc.set_attribute(control, "disabled", "")?;
        } else {
            doc.remove_attribute(control, "disabled");
        }
    }
    Ok(())
}

fn floating_label(doc: &Document, control: NodeId) -> Option<NodeId> {
    doc.next_element_sibling(control)
        .filter(|&label| doc.has_class(label, "aq-form-label"))
}

fn has_value(doc: &Document, control: NodeId) -> bool {
    doc.value(control).is_some_and(|v| !v.is_empty())
}

pub(crate) fn bindings(ctx: &Context) -> Vec<Binding> {
    let changed = ctx.events.clone();

    vec![
        Binding::on(".aq-form-floating .aq-form-control", EventKind::Input, |doc, control, _| {
            let filled = has_value(doc, control);
            doc.toggle_class(control, "has-value", Some(filled));
        }),
        Binding::on(".aq-form-floating .aq-form-control", EventKind::Focus, |doc, control, _| {
            if let Some(label) = floating_label(doc, control) {
                doc.add_class(label, "active");
            }
        }),
        Binding::on(".aq-form-floating .aq-form-control", EventKind::Blur, |doc, control, _| {
            if let Some(label) = floating_label(doc, control)
                && !has_value(doc, control)
            {
                doc.remove_class(label, "active");
            }
        }),
        Binding::on(".aq-form-control", EventKind::Blur, |doc, control, _| {
            let valid = check_validity(doc, control);
            mark(doc, control, valid);
            if !valid {
                run_animation(doc, Some(control), SHAKE, AnimationOptions::new().duration(SHAKE_MS));
            }
        }),
        Binding::init(".aq-form-control.invalid", |doc, control| {
            run_animation(doc, Some(control), INIT_SHAKE, AnimationOptions::new().duration(SHAKE_MS));
        }),
        Binding::init(".aq-form-feedback", |doc, feedback| {
            run_animation(doc, Some(feedback), FADE_IN, AnimationOptions::new().duration(200));
        }),
        Binding::on(".aq-form-check-input", EventKind::Change, move |doc, input, _| {
            let checked = doc.has_attribute(input, "checked");
            changed.emit(doc, ComponentEvent::FormCheckChanged { input, checked });
        }),
        Binding::on(".aq-form", EventKind::Submit, |doc, form, event| {
            let invalid = find_all(doc, form, ".aq-form-control.invalid");
            if invalid.is_empty() {
                return;
            }
            for control in invalid {
                pulse_class(doc, Some(control), SHAKE, SHAKE_MS);
            }
            tracing::debug!("Blocked submit of form {:?}", form);
            event.prevent_default();
        }),
    ]
}
