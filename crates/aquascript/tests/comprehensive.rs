//! Comprehensive tests for aquascript
//!
//! Whole-page scenarios: initialization, component wiring driven through
//! dispatched events and the virtual clock, and configuration loading.

use std::cell::RefCell;
use std::rc::Rc;

use aquascript::dom::{Document, Event, EventKind, KeyModifiers, MediaPreferences, NodeId};
use aquascript::{Aqua, AquaConfig, ComponentEvent, InitOutcome};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn el(doc: &mut Document, parent: NodeId, tag: &str, class: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.set_attribute(node, "class", class).unwrap();
    doc.append_child(parent, node).unwrap();
    node
}

/// Record every component event
fn recorder(aqua: &Aqua) -> Rc<RefCell<Vec<ComponentEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    aqua.subscribe(move |_, event| sink.borrow_mut().push(event.clone()));
    log
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_init_takes_wiring_branch() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let button = el(&mut doc, body, "button", "aq-btn clickable");
    let aqua = Aqua::default();
    let events = recorder(&aqua);

    let outcome = aqua.init(&mut doc).unwrap();
    assert!(matches!(outcome, InitOutcome::Initialized { .. }));
    assert!(doc.has_class(body, "aqua-components-initialized"));
    assert_eq!(*events.borrow(), vec![ComponentEvent::ComponentsInitialized]);

    doc.dispatch_event(button, Event::click(1.0, 1.0));
    assert!(doc.has_class(button, "active"));
    assert_eq!(events.borrow().last(), Some(&ComponentEvent::ButtonClicked { button }));
}

#[test]
fn test_init_takes_suppression_branch() {
    init_logging();
    let mut doc = Document::with_preferences(MediaPreferences { reduced_motion: true });
    let body = doc.body();
    let alert = el(&mut doc, body, "div", "aq-alert info");
    let close = el(&mut doc, alert, "button", "aq-alert-close");
    let aqua = Aqua::default();
    let events = recorder(&aqua);

    let outcome = aqua.init(&mut doc).unwrap();
    assert_eq!(outcome, InitOutcome::Suppressed { elements: 2 });
    assert!(events.borrow().is_empty());
    assert_eq!(doc.total_listeners(), 0);

    doc.dispatch_event(close, Event::click(0.0, 0.0));
    assert_eq!(doc.parent(alert), Some(body));
}

// ============================================================================
// Alerts
// ============================================================================

#[test]
fn test_alert_close_removes_after_animation() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let alert = el(&mut doc, body, "div", "aq-alert warning");
    let close = el(&mut doc, alert, "button", "aq-alert-close");
    let aqua = Aqua::default();
    let events = recorder(&aqua);
    aqua.init(&mut doc).unwrap();

    doc.dispatch_event(close, Event::click(0.0, 0.0));
    assert!(doc.has_class(alert, "closing"));
    assert!(doc.has_class(alert, "aq-alert-slide-out"));
    assert_eq!(doc.get_style(alert, "animation-duration"), Some("400ms"));
    assert_eq!(doc.parent(alert), Some(body));

    doc.dispatch_event(alert, Event::animation_end("aq-alert-slide-out", 400.0));
    assert_eq!(doc.parent(alert), None);
    assert_eq!(events.borrow().last(), Some(&ComponentEvent::AlertClosed { alert }));
}

#[test]
fn test_alert_autoclose_on_timer() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let alert = el(&mut doc, body, "div", "aq-alert info");
    doc.set_attribute(alert, "data-autoclose", "3000").unwrap();
    Aqua::default().init(&mut doc).unwrap();

    doc.advance(2999);
    assert!(!doc.has_class(alert, "closing"));
    doc.advance(1);
    assert!(doc.has_class(alert, "closing"));

    doc.dispatch_event(alert, Event::animation_end("aq-alert-slide-out", 400.0));
    assert!(!doc.is_connected(alert));
}

#[test]
fn test_alert_progress_bar_dismisses() {
    let mut doc = Document::new();
    let body = doc.body();
    let alert = el(&mut doc, body, "div", "aq-alert with-progress");
    let bar = el(&mut doc, alert, "div", "aq-alert-progress");
    Aqua::default().init(&mut doc).unwrap();

    let baseline = doc.total_listeners();
    doc.dispatch_event(bar, Event::animation_end("aq-alert-progress", 5000.0));
    assert!(doc.has_class(alert, "closing"));
    // Still on the page, sliding out
    assert!(doc.is_connected(alert));
    assert!(doc.has_class(alert, "aq-alert-slide-out"));

    doc.dispatch_event(alert, Event::animation_end("aq-alert-slide-out", 400.0));
    assert!(!doc.is_connected(alert));
    assert!(doc.total_listeners() < baseline);
}

// ============================================================================
// Modals
// ============================================================================

#[test]
fn test_escape_closes_top_modal_and_restores_scroll() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let settings = el(&mut doc, body, "div", "aq-modal");
    let confirm = el(&mut doc, body, "div", "aq-modal fade");
    let dialog = el(&mut doc, confirm, "div", "aq-modal-dialog");
    let ok = el(&mut doc, dialog, "button", "aq-btn");

    let aqua = Aqua::default();
    let events = recorder(&aqua);
    aqua.init(&mut doc).unwrap();

    aqua.modals().open(&mut doc, settings);
    aqua.modals().open(&mut doc, confirm);
    assert!(doc.has_class(dialog, "aq-modal-fade"));
    assert_eq!(doc.get_style(body, "overflow"), Some("hidden"));

    doc.focus(ok);
    doc.dispatch_event(ok, Event::key_down("Escape", KeyModifiers::NONE));
    assert!(!doc.has_class(confirm, "active"));
    assert!(doc.has_class(settings, "active"));
    assert_eq!(doc.get_style(body, "overflow"), Some("hidden"));

    doc.dispatch_event(body, Event::key_down("Escape", KeyModifiers::NONE));
    assert_eq!(aqua.modals().open_count(), 0);
    assert_eq!(doc.get_style(body, "overflow"), None);

    let closed: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            ComponentEvent::ModalClosed { modal } => Some(*modal),
            _ => None,
        })
        .collect();
    assert_eq!(closed, vec![confirm, settings]);
}

#[test]
fn test_modal_traps_tab_while_open() {
    let mut doc = Document::new();
    let body = doc.body();
    let modal = el(&mut doc, body, "div", "aq-modal");
    let dialog = el(&mut doc, modal, "div", "aq-modal-dialog");
    let first = el(&mut doc, dialog, "button", "aq-modal-close");
    let last = el(&mut doc, dialog, "button", "aq-btn");

    let aqua = Aqua::default();
    aqua.init(&mut doc).unwrap();
    aqua.modals().open(&mut doc, modal);

    doc.focus(last);
    let proceed = doc.dispatch_event(last, Event::key_down("Tab", KeyModifiers::NONE));
    assert!(!proceed);
    assert_eq!(doc.active_element(), Some(first));

    doc.dispatch_event(first, Event::click(0.0, 0.0));
    assert!(!aqua.modals().is_open(modal));
}

#[test]
fn test_backdrop_click_closes_only_on_self() {
    let mut doc = Document::new();
    let body = doc.body();
    let modal = el(&mut doc, body, "div", "aq-modal");
    let dialog = el(&mut doc, modal, "div", "aq-modal-dialog");
    let aqua = Aqua::default();
    aqua.init(&mut doc).unwrap();
    aqua.modals().open(&mut doc, modal);

    doc.dispatch_event(dialog, Event::click(0.0, 0.0));
    assert!(aqua.modals().is_open(modal));
    doc.dispatch_event(modal, Event::click(0.0, 0.0));
    assert!(!aqua.modals().is_open(modal));
}

// ============================================================================
// Navbar, buttons, cards
// ============================================================================

#[test]
fn test_navbar_toggle_reports_expansion() {
    let mut doc = Document::new();
    let body = doc.body();
    let navbar = el(&mut doc, body, "nav", "aq-navbar");
    let toggle = el(&mut doc, navbar, "button", "aq-navbar-toggle");
    let collapse = el(&mut doc, navbar, "div", "aq-navbar-collapse");
    let aqua = Aqua::default();
    let events = recorder(&aqua);
    aqua.init(&mut doc).unwrap();

    doc.dispatch_event(toggle, Event::click(0.0, 0.0));
    assert!(doc.has_class(collapse, "active"));
    assert_eq!(
        events.borrow().last(),
        Some(&ComponentEvent::NavbarToggled { navbar, expanded: true })
    );
}

#[test]
fn test_button_group_selection() {
    let mut doc = Document::new();
    let body = doc.body();
    let group = el(&mut doc, body, "div", "aq-btn-group");
    let left = el(&mut doc, group, "button", "aq-btn selected");
    let right = el(&mut doc, group, "button", "aq-btn");
    let aqua = Aqua::default();
    let events = recorder(&aqua);
    aqua.init(&mut doc).unwrap();

    doc.dispatch_event(right, Event::click(0.0, 0.0));
    assert!(doc.has_class(right, "selected"));
    assert!(!doc.has_class(left, "selected"));
    assert_eq!(
        events.borrow().last(),
        Some(&ComponentEvent::ButtonGroupSelected { group, button: right })
    );

    doc.focus(left);
    assert!(doc.has_class(left, "active"));
    doc.focus(right);
    assert!(!doc.has_class(left, "active"));
}

#[test]
fn test_card_stagger_on_hover() {
    let mut doc = Document::new();
    let body = doc.body();
    let card = el(&mut doc, body, "div", "aq-card stagger");
    let header = el(&mut doc, card, "div", "aq-card-header");
    let title = el(&mut doc, header, "h3", "title");
    let content = el(&mut doc, card, "div", "aq-card-body");
    let text = el(&mut doc, content, "p", "text");
    Aqua::default().init(&mut doc).unwrap();

    doc.dispatch_event(card, Event::new(EventKind::MouseEnter));
    doc.advance(0);
    assert!(doc.has_class(title, "aq-card-stagger"));
    assert!(!doc.has_class(text, "aq-card-stagger"));
    doc.advance(100);
    assert!(doc.has_class(text, "aq-card-stagger"));

    doc.dispatch_event(title, Event::animation_end("aq-card-stagger", 600.0));
    assert!(!doc.has_class(title, "aq-card-stagger"));
}

// ============================================================================
// Forms
// ============================================================================

#[test]
fn test_required_empty_input_blocks_submit() {
    init_logging();
    let mut doc = Document::new();
    let body = doc.body();
    let form = el(&mut doc, body, "form", "aq-form");
    let email = el(&mut doc, form, "input", "aq-form-control");
    doc.set_attribute(email, "required", "").unwrap();
    doc.set_attribute(email, "type", "email").unwrap();
    Aqua::default().init(&mut doc).unwrap();

    doc.focus(email);
    doc.blur();
    assert!(doc.has_class(email, "invalid"));
    assert!(doc.has_class(email, "shake"));

    let submitted = doc.dispatch_event(form, Event::new(EventKind::Submit));
    assert!(!submitted);

    doc.set_value(email, "me@example.com");
    doc.focus(email);
    doc.blur();
    assert!(doc.has_class(email, "valid"));
    assert!(doc.dispatch_event(form, Event::new(EventKind::Submit)));
}

#[test]
fn test_floating_label_follows_value() {
    let mut doc = Document::new();
    let body = doc.body();
    let group = el(&mut doc, body, "div", "aq-form-floating");
    let input = el(&mut doc, group, "input", "aq-form-control");
    let label = el(&mut doc, group, "label", "aq-form-label");
    Aqua::default().init(&mut doc).unwrap();

    doc.focus(input);
    assert!(doc.has_class(label, "active"));
    doc.set_value(input, "Ada");
    doc.dispatch_event(input, Event::new(EventKind::Input));
    assert!(doc.has_class(input, "has-value"));
    doc.blur();
    assert!(doc.has_class(label, "active"));

    doc.set_value(input, "");
    doc.focus(input);
    doc.blur();
    assert!(!doc.has_class(label, "active"));
}

// ============================================================================
// Facade and configuration
// ============================================================================

#[test]
fn test_animate_awaits_with_configured_duration() -> anyhow::Result<()> {
    let config = AquaConfig::from_toml_str("[animation]\ndefault_duration_ms = 250\n")?;
    let aqua = Aqua::new(config);
    let mut doc = Document::new();
    let body = doc.body();
    let badge = el(&mut doc, body, "span", "aq-badge");

    let completion = aqua.animate(&mut doc, Some(badge), "aq-badge-bounce");
    assert_eq!(doc.get_style(badge, "animation-duration"), Some("250ms"));
    doc.dispatch_event(badge, Event::animation_end("aq-badge-bounce", 250.0));

    let end = smol::block_on(async { completion.await }).expect("animation finished");
    assert_eq!(end.element, badge);
    assert!(!doc.has_class(badge, "aq-badge-bounce"));
    Ok(())
}

#[test]
fn test_config_file_drives_ripples() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("aquascript-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[ripple]\ncolor = \"rgba(255,255,255,0.3)\"\nduration_ms = 450\n",
    )?;
    let config = AquaConfig::load(&path);
    std::fs::remove_file(&path)?;
    let aqua = Aqua::new(config?);

    let mut doc = Document::new();
    let body = doc.body();
    let button = el(&mut doc, body, "button", "aq-btn ripple");
    aqua.init(&mut doc)?;

    doc.dispatch_event(button, Event::click(10.0, 10.0));
    let ripple = doc
        .query_selector(".aq-ripple")?
        .expect("ripple appended");
    assert_eq!(doc.get_style(ripple, "background"), Some("rgba(255,255,255,0.3)"));

    doc.advance(449);
    assert!(doc.is_connected(ripple));
    doc.advance(1);
    assert!(!doc.is_connected(ripple));
    Ok(())
}
