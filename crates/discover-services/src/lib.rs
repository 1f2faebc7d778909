//! Discover Services Layer
//!
//! This crate turns the page's props into a render-ready saved query list and
//! runs the mutations a user can trigger from it.
//!
//! # Architecture
//!
//! ```text
//! Rendering / binary (discover-app)
//!     ↓
//! Service Layer (discover-services) ← This crate
//!     ↓
//! Core (discover-core, discover-settings)
//! ```
//!
//! # Components
//!
//! - [`ListComposer`] - Presets and saved queries in display order
//! - [`MutationCoordinator`] - Delete/duplicate followed by a location refresh
//! - [`ContextMenu`] - Per-card action dropdown
//! - [`QueryListController`] - Props, collaborators, and event handlers
//!
//! # Design Principles
//!
//! 1. **No UI dependencies** - Rendering consumes `ListItem`s only
//! 2. **Injected collaborators** - Persistence, navigation and telemetry are traits
//! 3. **No optimistic updates** - The list changes only after a refresh

mod composer;
mod context_menu;
mod controller;
mod error;
mod memory;
mod mutation;
mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use composer::{ContextActions, ItemKind, ListComposer, ListItem};
pub use context_menu::{ContextMenu, ContextMenuAction, MenuState};
pub use controller::{QueryListController, QueryListProps};
pub use error::{QueryListError, QueryListResult};
pub use memory::InMemorySavedQueryService;
pub use mutation::{MutationCoordinator, MutationKind, MutationOutcome, MutationRequest};
pub use telemetry::TracingTelemetry;
