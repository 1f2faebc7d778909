//! Recording collaborators for tests
//!
//! These stand in for the router and the analytics pipeline and keep every
//! call so tests can assert on what the list asked for.

use discover_core::{Location, Navigator, TelemetryAttributes, TelemetrySink};
use parking_lot::Mutex;

/// Navigator that records every replaced location
#[derive(Default)]
pub struct RecordingNavigator {
    locations: Mutex<Vec<Location>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> Vec<Location> {
        self.locations.lock().clone()
    }

    pub fn last(&self) -> Option<Location> {
        self.locations.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.locations.lock().len()
    }
}

impl Navigator for RecordingNavigator {
    fn replace_location(&self, location: Location) {
        self.locations.lock().push(location);
    }
}

/// Telemetry sink that records every event
#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<(String, TelemetryAttributes)>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, TelemetryAttributes)> {
        self.events.lock().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event_key: &str, attributes: TelemetryAttributes) {
        self.events.lock().push((event_key.to_string(), attributes));
    }
}
