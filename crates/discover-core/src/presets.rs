//! Pre-built query catalog

use crate::saved_query::{Organization, SavedQueryRecord};
use crate::services::PresetCatalog;

/// Organization feature that unlocks the transaction presets
pub const TRANSACTION_EVENTS_FEATURE: &str = "transaction-events";

const DEFAULT_RANGE: &str = "24h";

/// The presets shipped with Discover
#[derive(Debug, Clone)]
pub struct BuiltinPresets {
    transaction_feature: String,
}

impl Default for BuiltinPresets {
    fn default() -> Self {
        Self::new(TRANSACTION_EVENTS_FEATURE)
    }
}

impl BuiltinPresets {
    pub fn new(transaction_feature: impl Into<String>) -> Self {
        Self {
            transaction_feature: transaction_feature.into(),
        }
    }

    fn all_views() -> Vec<SavedQueryRecord> {
        vec![
            SavedQueryRecord::new("All Events", "")
                .with_fields(&["title", "event.type", "project", "user", "timestamp"])
                .with_orderby("-timestamp")
                .with_range(DEFAULT_RANGE)
                .with_tags(&[
                    "event.type",
                    "release",
                    "project.name",
                    "user.email",
                    "user.ip",
                    "environment",
                ]),
            SavedQueryRecord::new("Errors by Title", "event.type:error")
                .with_fields(&["title", "count()", "count_unique(user)", "project"])
                .with_orderby("-count")
                .with_range(DEFAULT_RANGE)
                .with_tags(&["error.type", "project.name"]),
            SavedQueryRecord::new("Errors by URL", "event.type:error")
                .with_fields(&["url", "count()", "count_unique(issue.id)"])
                .with_orderby("-count")
                .with_range(DEFAULT_RANGE)
                .with_tags(&["error.type", "project.name", "url"]),
        ]
    }

    fn transaction_views() -> Vec<SavedQueryRecord> {
        vec![
            SavedQueryRecord::new("Transactions", "event.type:transaction")
                .with_fields(&["transaction", "project", "count()"])
                .with_orderby("-count")
                .with_range(DEFAULT_RANGE)
                .with_tags(&[
                    "release",
                    "project.name",
                    "user.email",
                    "user.ip",
                    "environment",
                ]),
            SavedQueryRecord::new("Transactions by User", "event.type:transaction")
                .with_fields(&["user", "count()", "count_unique(transaction)"])
                .with_orderby("-count")
                .with_range(DEFAULT_RANGE)
                .with_tags(&["user.email", "user.username", "user.ip"]),
            SavedQueryRecord::new("Transactions by Region", "event.type:transaction")
                .with_fields(&["geo.region", "count()"])
                .with_orderby("-count")
                .with_range(DEFAULT_RANGE)
                .with_tags(&["geo.region", "geo.country_code"]),
        ]
    }
}

impl PresetCatalog for BuiltinPresets {
    fn presets(&self, organization: &Organization) -> Vec<SavedQueryRecord> {
        let mut views = Self::all_views();
        if organization.has_feature(&self.transaction_feature) {
            views.extend(Self::transaction_views());
        }
        views
    }
}
