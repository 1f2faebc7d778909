//! Discover App
//!
//! Headless front end for the saved query list: renders `ListItem`s as plain
//! text and provides the navigator the binary hands to the controller.

pub mod logging;

use std::fmt::Write as _;

use discover_core::{Location, Navigator, PageLinks};
use discover_services::ListItem;
use discover_settings::QueryListSettings;
use parking_lot::Mutex;

/// Navigator that keeps the most recent location for the next render
#[derive(Default)]
pub struct CliNavigator {
    current: Mutex<Option<Location>>,
}

impl CliNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the location set since the last call, if any
    pub fn take(&self) -> Option<Location> {
        self.current.lock().take()
    }
}

impl Navigator for CliNavigator {
    fn replace_location(&self, location: Location) {
        tracing::info!(href = %location.to_href(), "location replaced");
        *self.current.lock() = Some(location);
    }
}

/// Render the list as text, one block per card, followed by pagination
pub fn render_list(items: &[ListItem], links: &PageLinks, settings: &QueryListSettings) -> String {
    let mut out = String::new();

    if items.is_empty() {
        out.push_str("No saved queries\n");
    }

    for item in items {
        let _ = writeln!(out, "{} [{}]", item.title(), item.subtitle);
        if !item.query_detail().is_empty() {
            let _ = writeln!(out, "    query: {}", item.query_detail());
        }
        if let Some(id) = item.view.id() {
            let _ = writeln!(out, "    id: {id}");
        }
        let _ = writeln!(out, "    open: {}", item.navigate_to.to_href());
        if item.context_actions.is_some() {
            let state = if item.pending { " (pending)" } else { "" };
            let _ = writeln!(
                out,
                "    actions: {}, {}{}",
                settings.delete_label, settings.duplicate_label, state
            );
        }
    }

    let mut pages = Vec::new();
    if let Some(cursor) = links.previous_cursor().filter(|_| links.has_previous_results()) {
        pages.push(format!("previous: {cursor}"));
    }
    if let Some(cursor) = links.next_cursor().filter(|_| links.has_next_results()) {
        pages.push(format!("next: {cursor}"));
    }
    if !pages.is_empty() {
        let _ = writeln!(out, "-- {} --", pages.join(" | "));
    }

    out
}
