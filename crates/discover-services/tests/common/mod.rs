//! Common test utilities and mocks

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use discover_core::{
    Location, Organization, PersistenceResult, PresetCatalog, QueryParams, QueryView,
    SavedQueryRecord, SavedQueryService,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub const QUERIES_PATH: &str = "/organizations/acme/discover/queries/";

pub fn organization() -> Organization {
    Organization::new("1", "acme")
}

pub fn location() -> Location {
    Location::new(QUERIES_PATH, QueryParams::new().with("cursor", "0:20:0"))
}

pub fn saved_records() -> Vec<SavedQueryRecord> {
    vec![
        SavedQueryRecord::new("X", "browser.name:Chrome")
            .with_id("21")
            .with_fields(&["title", "count()"])
            .with_orderby("-count"),
        SavedQueryRecord::new("Y", "browser.name:Firefox")
            .with_id("20")
            .with_fields(&["title"]),
    ]
}

/// Preset catalog returning a fixed list
pub struct StaticPresets(pub Vec<SavedQueryRecord>);

impl StaticPresets {
    pub fn named(names: &[&str]) -> Arc<Self> {
        Arc::new(Self(
            names
                .iter()
                .map(|name| SavedQueryRecord::new(*name, "").with_range("24h"))
                .collect(),
        ))
    }
}

impl PresetCatalog for StaticPresets {
    fn presets(&self, _organization: &Organization) -> Vec<SavedQueryRecord> {
        self.0.clone()
    }
}

/// Service whose calls block until the test opens the gate.
///
/// Lets a test observe the list while a mutation is still in flight.
pub struct GatedService {
    gate: Notify,
    calls: Mutex<Vec<String>>,
}

impl GatedService {
    pub fn new() -> Self {
        Self {
            gate: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Let one blocked call finish
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SavedQueryService for GatedService {
    async fn delete_query(
        &self,
        _organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<()> {
        self.calls.lock().push(format!("delete {}", view.name()));
        self.gate.notified().await;
        Ok(())
    }

    async fn create_query(
        &self,
        _organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<SavedQueryRecord> {
        self.calls.lock().push(format!("create {}", view.name()));
        self.gate.notified().await;
        Ok(view.to_record())
    }
}
