//! Comprehensive tests for aqua-a11y
//!
//! Focus trap behaviour inside realistic dialog markup and the
//! reduced-motion guard across a populated document.

use aqua_a11y::{
    focusable_descendants, prefers_reduced_motion, suppress_all_animations, trap_focus,
};
use aqua_dom::{property, Document, Event, KeyModifiers, NodeId};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// <div class="aq-modal-dialog">
///   <button class="aq-modal-close">
///   <input> <a href> <select disabled> <textarea>
///   <a>(no href)  <span tabindex="0">
/// </div>
fn login_dialog(doc: &mut Document) -> (NodeId, Vec<NodeId>) {
    let dialog = doc.create_element("div");
    doc.add_class(dialog, "aq-modal-dialog");
    let body = doc.body();
    doc.append_child(body, dialog).unwrap();

    let mut expected = Vec::new();
    let mut add = |doc: &mut Document, tag: &str, attrs: &[(&str, &str)], focusable: bool| {
        let el = doc.create_element(tag);
        for &(name, value) in attrs {
            doc.set_attribute(el, name, value).unwrap();
        }
        doc.append_child(dialog, el).unwrap();
        if focusable {
            expected.push(el);
        }
        el
    };

    add(doc, "button", &[("class", "aq-modal-close")], true);
    add(doc, "input", &[("type", "email")], true);
    add(doc, "a", &[("href", "/forgot")], true);
    add(doc, "select", &[("disabled", "")], false);
    add(doc, "textarea", &[], true);
    add(doc, "a", &[], false);
    add(doc, "span", &[("tabindex", "0")], true);

    (dialog, expected)
}

fn press_tab(doc: &mut Document, shift: bool) -> bool {
    let target = doc.active_element().unwrap_or(doc.body());
    let modifiers = if shift { KeyModifiers::shift() } else { KeyModifiers::NONE };
    doc.dispatch_event(target, Event::key_down("Tab", modifiers))
}

#[test]
fn test_trap_collects_focusables_in_document_order() {
    init_logging();
    let mut doc = Document::new();
    let (dialog, expected) = login_dialog(&mut doc);

    let trap = trap_focus(&mut doc, Some(dialog));
    assert_eq!(trap.focusables(), expected.as_slice());
    assert_eq!(trap.container(), Some(dialog));
    assert!(trap.is_bound());
}

#[test]
fn test_tab_cycles_forward_and_backward() {
    init_logging();
    let mut doc = Document::new();
    let (dialog, expected) = login_dialog(&mut doc);
    let trap = trap_focus(&mut doc, Some(dialog));
    let (first, last) = (trap.first().unwrap(), trap.last().unwrap());

    doc.focus(last);
    assert!(!press_tab(&mut doc, false));
    assert_eq!(doc.active_element(), Some(first));

    assert!(!press_tab(&mut doc, true));
    assert_eq!(doc.active_element(), Some(last));

    // Inside the sequence the key passes through untouched
    doc.focus(expected[1]);
    assert!(press_tab(&mut doc, false));
    assert_eq!(doc.active_element(), Some(expected[1]));
}

#[test]
fn test_other_keys_pass_through() {
    let mut doc = Document::new();
    let (dialog, expected) = login_dialog(&mut doc);
    let _trap = trap_focus(&mut doc, Some(dialog));

    let last = *expected.last().unwrap();
    doc.focus(last);
    assert!(doc.dispatch_event(last, Event::key_down("Enter", KeyModifiers::NONE)));
    assert_eq!(doc.active_element(), Some(last));
}

#[test]
fn test_focus_set_is_not_refreshed() {
    let mut doc = Document::new();
    let (dialog, expected) = login_dialog(&mut doc);
    let trap = trap_focus(&mut doc, Some(dialog));

    let late = doc.create_element("button");
    doc.append_child(dialog, late).unwrap();

    assert_eq!(trap.focusables().len(), expected.len());
    assert_eq!(focusable_descendants(&doc, dialog).len(), expected.len() + 1);

    // Tab on the late button is not a boundary for the stale session
    doc.focus(late);
    assert!(press_tab(&mut doc, false));
}

#[test]
fn test_reduced_motion_guard_over_components() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let mut marked = Vec::new();
    for class in ["aq-btn ripple", "aq-card", "plain", "aq-badge pulse"] {
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", class).unwrap();
        doc.append_child(body, el).unwrap();
        if class.contains("aq-") {
            marked.push(el);
        }
    }

    assert!(!prefers_reduced_motion(&doc));
    assert_eq!(suppress_all_animations(&mut doc), 0);

    doc.preferences_mut().set_reduced_motion(true);
    assert!(prefers_reduced_motion(&doc));
    assert_eq!(suppress_all_animations(&mut doc), marked.len());
    for node in marked {
        assert_eq!(doc.get_style(node, property::TRANSITION), Some("none"));
        assert_eq!(doc.get_style(node, property::ANIMATION), Some("none"));
    }
}
