use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the database query endpoint. Cursor and filters are omitted from
/// the wire when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseQueryResponse {
    pub results: Vec<DatabaseRow>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// One page of a database. Property shapes vary per database schema, so
/// they stay as raw JSON for the caller to pick apart.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseRow {
    pub id: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub archived: bool,
    pub url: String,
    pub properties: Map<String, Value>,
}
