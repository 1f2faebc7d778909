//! Stored query records and the organization they belong to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The organization a query list is scoped to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Organization {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Sort specification as stored: a single `-field` string or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderBy {
    Single(String),
    Multi(Vec<String>),
}

impl OrderBy {
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// A query definition as returned by the saved query API or the preset catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQueryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fieldnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderby: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub projects: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl SavedQueryRecord {
    /// Create a record with just a name and a filter query
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: Some(query.into()),
            version: Some(2),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(OrderBy::Single(orderby.into()));
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// Read a saved query collection from an API payload.
///
/// `null` or anything that is not an array yields an empty collection.
/// Array elements that do not describe a query are skipped.
pub fn parse_saved_queries(payload: &serde_json::Value) -> Vec<SavedQueryRecord> {
    let Some(items) = payload.as_array() else {
        if !payload.is_null() {
            tracing::warn!(
                payload_type = json_type_name(payload),
                "saved query payload is not a collection, ignoring"
            );
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match serde_json::from_value::<SavedQueryRecord>(item.clone()) {
                Ok(record) => Some(record),
                Err(error) => {
                    tracing::warn!(index, %error, "skipping malformed saved query");
                    None
                }
            }
        })
        .collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_saved_queries_from_api_payload() {
        let payload = json!([
            {
                "id": "12",
                "name": "Slow checkouts",
                "version": 2,
                "fields": ["transaction", "count()"],
                "orderby": "-count",
                "query": "transaction:/checkout",
                "projects": [1, 2],
                "range": "7d",
                "dateCreated": "2019-12-20T10:00:00Z",
                "createdBy": "3"
            },
            {"id": "11", "name": "Minimal", "fields": []}
        ]);

        let records = parse_saved_queries(&payload);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("12"));
        assert_eq!(records[0].orderby, Some(OrderBy::Single("-count".to_string())));
        assert_eq!(records[0].projects, vec![1, 2]);
        assert!(records[0].date_created.is_some());
        assert_eq!(records[1].query, None);
    }

    #[test]
    fn test_parse_saved_queries_null_and_non_collections() {
        assert!(parse_saved_queries(&serde_json::Value::Null).is_empty());
        assert!(parse_saved_queries(&json!({"name": "not a list"})).is_empty());
        assert!(parse_saved_queries(&json!("[]")).is_empty());
        assert!(parse_saved_queries(&json!(42)).is_empty());
        assert!(parse_saved_queries(&json!([])).is_empty());
    }

    #[test]
    fn test_parse_saved_queries_skips_malformed_elements() {
        let payload = json!([
            {"id": "1", "name": "Good"},
            {"id": "2"},
            "not an object",
            {"id": "3", "name": "Also good", "projects": "oops"},
            {"id": "4", "name": "Fine"}
        ]);

        let names: Vec<_> = parse_saved_queries(&payload)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Good", "Fine"]);
    }

    #[test]
    fn test_orderby_accepts_list() {
        let record: SavedQueryRecord =
            serde_json::from_value(json!({"name": "x", "orderby": ["-count", "title"]})).unwrap();
        assert_eq!(record.orderby.unwrap().entries(), vec!["-count", "title"]);
    }

    #[test]
    fn test_organization_features() {
        let org = Organization::new("1", "acme").with_features(vec!["discover-query".into()]);
        assert!(org.has_feature("discover-query"));
        assert!(!org.has_feature("transaction-events"));
    }
}
