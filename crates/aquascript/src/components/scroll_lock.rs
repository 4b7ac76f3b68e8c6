//! Page scroll locking while a modal is open

use aqua_dom::{property, Document};

/// Lock or unlock page scrolling by toggling `overflow: hidden` on `<body>`
pub fn scroll_lock(doc: &mut Document, lock: bool) {
    let body = doc.body();
    doc.set_style(body, property::OVERFLOW, if lock { "hidden" } else { "" });
    tracing::trace!("Scroll {}", if lock { "locked" } else { "unlocked" });
}

/// Whether page scrolling is currently locked
pub fn is_scroll_locked(doc: &Document) -> bool {
    doc.get_style(doc.body(), property::OVERFLOW) == Some("hidden")
}
