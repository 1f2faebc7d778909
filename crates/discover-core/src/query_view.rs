//! Normalized query views
//!
//! A `QueryView` is built fresh from a `SavedQueryRecord` whenever the list is
//! composed. It is never edited in place; `duplicate` returns a new value.

use serde::{Deserialize, Serialize};

use crate::location::QueryParams;
use crate::saved_query::{OrderBy, SavedQueryRecord};

/// Width marker for a column whose width was never set
pub const COL_WIDTH_UNDEFINED: i32 = -1;

/// Appended to the name of a duplicated query
pub const DUPLICATE_NAME_SUFFIX: &str = " copy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub kind: SortKind,
}

impl Sort {
    /// Decode `-field` (descending) or `field` (ascending)
    pub fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, kind) = match raw.strip_prefix('-') {
            Some(field) => (field, SortKind::Desc),
            None => (raw, SortKind::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            kind,
        })
    }

    pub fn encode(&self) -> String {
        match self.kind {
            SortKind::Desc => format!("-{}", self.field),
            SortKind::Asc => self.field.clone(),
        }
    }
}

/// A result column and its optional display width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub field: String,
    pub width: Option<i32>,
}

/// Normalized view of a preset or saved query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryView {
    id: Option<String>,
    name: String,
    query: String,
    fields: Vec<Field>,
    sorts: Vec<Sort>,
    tags: Vec<String>,
    project: Vec<i64>,
    environment: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    stats_period: Option<String>,
}

impl QueryView {
    /// Build a view from a stored record. Pure; each call returns an independent value.
    pub fn from_record(record: &SavedQueryRecord) -> Self {
        let fields = record
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| Field {
                field: field.clone(),
                width: record
                    .widths
                    .get(index)
                    .and_then(|w| w.trim().parse::<i32>().ok())
                    .filter(|w| *w != COL_WIDTH_UNDEFINED),
            })
            .collect();

        let sorts = record
            .orderby
            .as_ref()
            .map(|orderby| {
                orderby
                    .entries()
                    .into_iter()
                    .filter_map(Sort::decode)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            query: record.query.clone().unwrap_or_default(),
            fields,
            sorts,
            tags: record.tags.clone(),
            project: record.projects.clone(),
            environment: record.environment.clone(),
            start: record.start.clone(),
            end: record.end.clone(),
            stats_period: record.range.clone(),
        }
    }

    /// Convert back to a record, used as the payload when persisting
    pub fn to_record(&self) -> SavedQueryRecord {
        let widths = if self.has_widths() {
            self.fields
                .iter()
                .map(|f| f.width.unwrap_or(COL_WIDTH_UNDEFINED).to_string())
                .collect()
        } else {
            Vec::new()
        };

        let orderby = match self.sorts.as_slice() {
            [] => None,
            [sort] => Some(OrderBy::Single(sort.encode())),
            sorts => Some(OrderBy::Multi(sorts.iter().map(Sort::encode).collect())),
        };

        SavedQueryRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            version: Some(2),
            fields: self.fields.iter().map(|f| f.field.clone()).collect(),
            widths,
            orderby,
            query: Some(self.query.clone()),
            projects: self.project.clone(),
            environment: self.environment.clone(),
            range: self.stats_period.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            tags: self.tags.clone(),
            ..SavedQueryRecord::default()
        }
    }

    /// A copy named `"<name> copy"` with no identity
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = None;
        copy.name = format!("{}{}", self.name, DUPLICATE_NAME_SUFFIX);
        copy
    }

    /// Serialize the view as query-string parameters
    pub fn generate_query_string_object(&self) -> QueryParams {
        let mut params = QueryParams::new();

        if let Some(id) = &self.id {
            params.insert("id", id.as_str());
        }
        params.insert("name", self.name.as_str());
        params.insert(
            "field",
            self.fields.iter().map(|f| f.field.clone()).collect::<Vec<_>>(),
        );
        if self.has_widths() {
            params.insert(
                "widths",
                self.fields
                    .iter()
                    .map(|f| f.width.unwrap_or(COL_WIDTH_UNDEFINED).to_string())
                    .collect::<Vec<_>>(),
            );
        }
        params.insert("sort", self.sorts.iter().map(Sort::encode).collect::<Vec<_>>());
        params.insert("tag", self.tags.clone());
        params.insert("query", self.query.as_str());

        // Page filters are written only when they carry a value
        if !self.project.is_empty() {
            params.insert(
                "project",
                self.project.iter().map(i64::to_string).collect::<Vec<_>>(),
            );
        }
        if !self.environment.is_empty() {
            params.insert("environment", self.environment.clone());
        }
        for (key, value) in [
            ("start", &self.start),
            ("end", &self.end),
            ("statsPeriod", &self.stats_period),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.insert(key, value);
            }
        }

        params
    }

    /// Current location query overlaid with this view's parameters
    pub fn navigation_payload(&self, base: &QueryParams) -> QueryParams {
        base.merged_with(&self.generate_query_string_object())
    }

    fn has_widths(&self) -> bool {
        self.fields.iter().any(|f| f.width.is_some())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn project(&self) -> &[i64] {
        &self.project
    }

    pub fn environment(&self) -> &[String] {
        &self.environment
    }

    pub fn stats_period(&self) -> Option<&str> {
        self.stats_period.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}
