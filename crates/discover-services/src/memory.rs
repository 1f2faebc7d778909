//! In-memory saved query service
//!
//! Stores queries per organization, assigns sequential ids the way the saved
//! query API does, and can be told to fail upcoming calls. Every call yields
//! to the runtime once before touching state, so callers observe a real
//! suspension point.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use discover_core::{
    Organization, PersistenceError, PersistenceResult, QueryView, SavedQueryRecord,
    SavedQueryService,
};
use parking_lot::Mutex;

#[derive(Default)]
struct MemoryState {
    /// Per organization slug, oldest first
    queries: HashMap<String, Vec<SavedQueryRecord>>,
    next_id: u64,
    failures_remaining: usize,
    delete_calls: usize,
    create_calls: usize,
}

#[derive(Default)]
pub struct InMemorySavedQueryService {
    state: Mutex<MemoryState>,
    latency: Option<Duration>,
}

impl InMemorySavedQueryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed stored queries for an organization, assigning ids where missing
    pub fn with_queries(self, organization: &Organization, records: Vec<SavedQueryRecord>) -> Self {
        {
            let mut state = self.state.lock();
            for mut record in records {
                let id = match record.id.as_deref().and_then(|id| id.parse::<u64>().ok()) {
                    Some(id) => id,
                    None => {
                        state.next_id += 1;
                        state.next_id
                    }
                };
                state.next_id = state.next_id.max(id);
                record.id = Some(id.to_string());
                state
                    .queries
                    .entry(organization.slug.clone())
                    .or_default()
                    .push(record);
            }
        }
        self
    }

    /// Make the next `count` calls fail
    pub fn fail_next(&self, count: usize) {
        self.state.lock().failures_remaining = count;
    }

    /// Stored queries for an organization, newest first
    pub fn list(&self, organization: &Organization) -> Vec<SavedQueryRecord> {
        self.state
            .lock()
            .queries
            .get(&organization.slug)
            .map(|queries| queries.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().delete_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().create_calls
    }

    async fn simulate_network(&self) {
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
    }

    fn take_failure(state: &mut MemoryState) -> PersistenceResult<()> {
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(PersistenceError::RequestFailed(
                "simulated service failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SavedQueryService for InMemorySavedQueryService {
    async fn delete_query(
        &self,
        organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<()> {
        self.simulate_network().await;

        let mut state = self.state.lock();
        state.delete_calls += 1;
        Self::take_failure(&mut state)?;

        let id = view
            .id()
            .ok_or_else(|| PersistenceError::NotFound(view.name().to_string()))?;
        let queries = state.queries.entry(organization.slug.clone()).or_default();
        let before = queries.len();
        queries.retain(|q| q.id.as_deref() != Some(id));
        if queries.len() == before {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn create_query(
        &self,
        organization: &Organization,
        view: &QueryView,
    ) -> PersistenceResult<SavedQueryRecord> {
        self.simulate_network().await;

        let mut state = self.state.lock();
        state.create_calls += 1;
        Self::take_failure(&mut state)?;

        state.next_id += 1;
        let now = Utc::now();
        let mut record = view.to_record();
        record.id = Some(state.next_id.to_string());
        record.date_created = Some(now);
        record.date_updated = Some(now);

        state
            .queries
            .entry(organization.slug.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}
