//! Collaborator contracts
//!
//! The query list never talks to the network, the router, or the analytics
//! pipeline directly. Each of those is injected behind one of these traits.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::PersistenceResult;
use crate::location::Location;
use crate::query_view::QueryView;
use crate::saved_query::{Organization, SavedQueryRecord};

/// Persistence for user-created queries
///
/// Neither call is idempotent; callers must avoid submitting twice.
#[async_trait]
pub trait SavedQueryService: Send + Sync {
    /// Delete the saved query identified by `view.id()`
    async fn delete_query(
        &self,
        organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<()>;

    /// Persist `view` as a new saved query and return the stored record
    async fn create_query(
        &self,
        organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<SavedQueryRecord>;
}

/// Client-side navigation
pub trait Navigator: Send + Sync {
    /// Replace the current history entry with `location`
    fn replace_location(&self, location: Location);
}

pub type TelemetryAttributes = IndexMap<String, String>;

/// Fire-and-forget usage analytics
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event_key: &str, attributes: TelemetryAttributes);
}

/// Source of the pre-built queries shown on the first page
pub trait PresetCatalog: Send + Sync {
    fn presets(&self, organization: &Organization) -> Vec<SavedQueryRecord>;
}

/// The two capabilities a handler needs from the triggering UI event
pub trait UiEvent {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// A plain click event that records which capabilities were used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl UiEvent for ClickEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
