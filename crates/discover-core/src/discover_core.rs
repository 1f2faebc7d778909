//! Discover Core - value types and collaborator contracts for the saved query list
//!
//! This crate provides the pieces every other Discover crate depends on:
//!
//! - `QueryView` - normalized view of a preset or saved query
//! - `PageLinks` / `PaginationState` - parsed pagination link descriptors
//! - `Location` / `QueryParams` - navigation targets
//! - `BuiltinPresets` - the shipped pre-built query catalog
//! - Collaborator traits (`SavedQueryService`, `Navigator`, `TelemetrySink`,
//!   `PresetCatalog`, `UiEvent`)

mod error;
mod location;
mod page_links;
mod presets;
mod query_view;
mod saved_query;
mod services;

pub use error::{LinkParseError, PersistenceError, PersistenceResult};
pub use location::{Location, QueryParams, QueryValue};
pub use page_links::{PageLink, PageLinks, PaginationState};
pub use presets::{BuiltinPresets, TRANSACTION_EVENTS_FEATURE};
pub use query_view::{
    COL_WIDTH_UNDEFINED, DUPLICATE_NAME_SUFFIX, Field, QueryView, Sort, SortKind,
};
pub use saved_query::{OrderBy, Organization, SavedQueryRecord, parse_saved_queries};
pub use services::{
    ClickEvent, Navigator, PresetCatalog, SavedQueryService, TelemetryAttributes, TelemetrySink,
    UiEvent,
};
