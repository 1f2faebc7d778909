//! Query list controller
//!
//! Owns the props handed down by the page (organization, location, the
//! current page of saved queries and its pagination descriptor) and wires
//! the composer, the mutation coordinator and telemetry together. Nothing is
//! cached between renders: every call to [`QueryListController::items`]
//! recomputes the list from the current props.

use std::sync::Arc;

use discover_core::{
    BuiltinPresets, Location, Navigator, Organization, PageLinks, PaginationState, PresetCatalog,
    QueryView, SavedQueryRecord, SavedQueryService, TelemetryAttributes, TelemetrySink, UiEvent,
    parse_saved_queries,
};
use discover_settings::DiscoverSettings;

use crate::composer::{ItemKind, ListComposer, ListItem};
use crate::error::QueryListResult;
use crate::mutation::{MutationCoordinator, MutationOutcome, MutationRequest};
use crate::telemetry::TracingTelemetry;

/// Inputs for one render of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryListProps {
    pub organization: Organization,
    pub location: Location,
    /// `None` while the page has not loaded saved queries
    pub saved_queries: Option<Vec<SavedQueryRecord>>,
    /// Raw pagination descriptor (`Link` header) for the current page
    pub page_links: String,
}

impl QueryListProps {
    pub fn new(organization: Organization, location: Location) -> Self {
        Self {
            organization,
            location,
            saved_queries: None,
            page_links: String::new(),
        }
    }

    pub fn with_saved_queries(mut self, saved_queries: Vec<SavedQueryRecord>) -> Self {
        self.saved_queries = Some(saved_queries);
        self
    }

    pub fn with_page_links(mut self, page_links: impl Into<String>) -> Self {
        self.page_links = page_links.into();
        self
    }

    /// Take saved queries from an untrusted API payload
    pub fn with_payload(mut self, payload: &serde_json::Value) -> Self {
        self.saved_queries = if payload.is_null() {
            None
        } else {
            Some(parse_saved_queries(payload))
        };
        self
    }
}

pub struct QueryListController {
    props: QueryListProps,
    settings: DiscoverSettings,
    presets: Option<Arc<dyn PresetCatalog>>,
    telemetry: Arc<dyn TelemetrySink>,
    mutations: MutationCoordinator,
}

impl QueryListController {
    pub fn new(
        props: QueryListProps,
        service: Arc<dyn SavedQueryService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            props,
            settings: DiscoverSettings::default(),
            presets: None,
            telemetry: Arc::new(TracingTelemetry),
            mutations: MutationCoordinator::new(service, navigator),
        }
    }

    pub fn with_settings(mut self, settings: DiscoverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the built-in preset catalog
    pub fn with_presets(mut self, presets: Arc<dyn PresetCatalog>) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn props(&self) -> &QueryListProps {
        &self.props
    }

    pub fn settings(&self) -> &DiscoverSettings {
        &self.settings
    }

    pub fn set_props(&mut self, props: QueryListProps) {
        self.props = props;
    }

    pub fn pagination_state(&self) -> PaginationState {
        PaginationState::parse(&self.props.page_links)
    }

    /// The raw descriptor, passed through to the pagination widget
    pub fn page_links(&self) -> &str {
        &self.props.page_links
    }

    /// Parsed descriptor. Malformed input yields no links.
    pub fn pagination(&self) -> PageLinks {
        PageLinks::parse(&self.props.page_links).unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring malformed pagination descriptor");
            PageLinks::default()
        })
    }

    /// Render-ready cards for the current props
    pub fn items(&self) -> Vec<ListItem> {
        let presets = self.preset_records();
        let composer = ListComposer::new(&self.props.location, &self.settings.list);
        let mut items = composer.compose(
            self.pagination_state(),
            &presets,
            self.props.saved_queries.as_deref(),
        );
        for item in &mut items {
            item.pending = self.is_pending(&item.view);
        }
        items
    }

    pub fn is_pending(&self, view: &QueryView) -> bool {
        view.id().is_some_and(|id| self.mutations.is_pending(id))
    }

    pub async fn handle_delete(
        &self,
        view: &QueryView,
        event: &mut dyn UiEvent,
    ) -> QueryListResult<MutationOutcome> {
        self.dispatch(&MutationRequest::delete(view.clone()), event)
            .await
    }

    pub async fn handle_duplicate(
        &self,
        view: &QueryView,
        event: &mut dyn UiEvent,
    ) -> QueryListResult<MutationOutcome> {
        self.dispatch(&MutationRequest::duplicate(view.clone()), event)
            .await
    }

    /// Run a request chosen from an item's context menu
    pub async fn dispatch(
        &self,
        request: &MutationRequest,
        event: &mut dyn UiEvent,
    ) -> QueryListResult<MutationOutcome> {
        event.prevent_default();
        event.stop_propagation();
        self.mutations
            .run(
                request,
                &self.props.organization,
                &self.props.location.pathname,
            )
            .await
    }

    /// Record that a card was opened. Returns where to navigate.
    pub fn activate(&self, item: &ListItem) -> Location {
        let telemetry = &self.settings.telemetry;
        if telemetry.enabled {
            let event_key = match item.kind {
                ItemKind::Preset => &telemetry.preset_click_event,
                ItemKind::Saved => &telemetry.saved_click_event,
            };
            let mut attributes = TelemetryAttributes::new();
            attributes.insert(
                "organization_id".to_string(),
                self.props.organization.id.clone(),
            );
            attributes.insert("query_name".to_string(), item.title().to_string());
            attributes.insert("kind".to_string(), item.kind.as_str().to_string());
            self.telemetry.record(event_key, attributes);
        }
        item.navigate_to.clone()
    }

    fn preset_records(&self) -> Vec<SavedQueryRecord> {
        match &self.presets {
            Some(catalog) => catalog.presets(&self.props.organization),
            None => BuiltinPresets::new(self.settings.list.transaction_feature.clone())
                .presets(&self.props.organization),
        }
    }
}
