//! Telemetry sink that writes usage events to the log

use discover_core::{TelemetryAttributes, TelemetrySink};

/// Records usage events as structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&self, event_key: &str, attributes: TelemetryAttributes) {
        tracing::info!(
            target: "discover::telemetry",
            event_key,
            attributes = ?attributes,
            "usage event"
        );
    }
}
