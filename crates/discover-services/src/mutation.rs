//! Delete and duplicate mutations
//!
//! Both operations go through the injected `SavedQueryService` and, once the
//! service confirms, replace the current location with the same pathname and
//! an empty query so the list reloads in its default state. Nothing is
//! removed or added optimistically.
//!
//! Delete needs a saved query id. Duplicate does not, so pre-built queries can
//! be copied too. While a mutation for a saved query id is in flight, further
//! mutations for the same id are refused with `MutationOutcome::AlreadyPending`.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use discover_core::{Location, Navigator, Organization, QueryView, SavedQueryService};
use parking_lot::Mutex;

use crate::error::{QueryListError, QueryListResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Delete,
    Duplicate,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("delete"),
            Self::Duplicate => f.write_str("duplicate"),
        }
    }
}

/// A mutation bound to the view it acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub kind: MutationKind,
    pub view: QueryView,
}

impl MutationRequest {
    pub fn delete(view: QueryView) -> Self {
        Self {
            kind: MutationKind::Delete,
            view,
        }
    }

    pub fn duplicate(view: QueryView) -> Self {
        Self {
            kind: MutationKind::Duplicate,
            view,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The service confirmed the change and the location was refreshed
    Completed,
    /// Another mutation for the same saved query had not settled yet
    AlreadyPending,
}

/// Runs saved query mutations and the navigation refresh that follows them
pub struct MutationCoordinator {
    service: Arc<dyn SavedQueryService>,
    navigator: Arc<dyn Navigator>,
    pending: Mutex<HashSet<String>>,
}

impl MutationCoordinator {
    pub fn new(service: Arc<dyn SavedQueryService>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            service,
            navigator,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a mutation for this saved query id has not settled yet
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.lock().contains(id)
    }

    /// Run a request produced by an item's context actions
    pub async fn run(
        &self,
        request: &MutationRequest,
        organization: &Organization,
        pathname: &str,
    ) -> QueryListResult<MutationOutcome> {
        match request.kind {
            MutationKind::Delete => self.delete(&request.view, organization, pathname).await,
            MutationKind::Duplicate => {
                self.duplicate(&request.view, organization, pathname).await
            }
        }
    }

    /// Delete a saved query, then reset the list location
    #[tracing::instrument(skip(self, view, organization), fields(query_id = ?view.id(), organization = %organization.slug))]
    pub async fn delete(
        &self,
        view: &QueryView,
        organization: &Organization,
        pathname: &str,
    ) -> QueryListResult<MutationOutcome> {
        let Some(id) = view.id() else {
            return Err(QueryListError::InvalidMutationTarget {
                action: MutationKind::Delete,
                name: view.name().to_string(),
            });
        };
        let Some(_guard) = self.mark_pending(MutationKind::Delete, id) else {
            return Ok(MutationOutcome::AlreadyPending);
        };

        if let Err(error) = self.service.delete_query(organization, view).await {
            tracing::error!(%error, name = view.name(), "failed to delete saved query");
            return Err(error.into());
        }

        tracing::info!(name = view.name(), "saved query deleted");
        self.refresh(pathname);
        Ok(MutationOutcome::Completed)
    }

    /// Save a copy of a query named `"<name> copy"`, then reset the list location
    ///
    /// Views without an id are copied without taking a pending mark.
    #[tracing::instrument(skip(self, view, organization), fields(query_id = ?view.id(), organization = %organization.slug))]
    pub async fn duplicate(
        &self,
        view: &QueryView,
        organization: &Organization,
        pathname: &str,
    ) -> QueryListResult<MutationOutcome> {
        let _guard = match view.id() {
            Some(id) => match self.mark_pending(MutationKind::Duplicate, id) {
                Some(guard) => Some(guard),
                None => return Ok(MutationOutcome::AlreadyPending),
            },
            None => None,
        };

        let copy = view.duplicate();
        match self.service.create_query(organization, &copy).await {
            Ok(created) => {
                tracing::info!(
                    name = copy.name(),
                    new_id = ?created.id,
                    "saved query duplicated"
                );
            }
            Err(error) => {
                tracing::error!(%error, name = copy.name(), "failed to duplicate saved query");
                return Err(error.into());
            }
        }

        self.refresh(pathname);
        Ok(MutationOutcome::Completed)
    }

    /// Mark a saved query id as in flight. `None` if it already is.
    fn mark_pending(&self, kind: MutationKind, id: &str) -> Option<PendingGuard<'_>> {
        if !self.pending.lock().insert(id.to_string()) {
            tracing::debug!(query_id = id, %kind, "mutation already in flight, ignoring");
            return None;
        }

        Some(PendingGuard {
            pending: &self.pending,
            id: id.to_string(),
        })
    }

    fn refresh(&self, pathname: &str) {
        self.navigator.replace_location(Location::bare(pathname));
    }
}

/// Clears the in-flight mark when the mutation settles or is dropped
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.id);
    }
}
