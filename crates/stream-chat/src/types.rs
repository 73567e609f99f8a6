//! Request types shared across endpoints.
//!
//! Most Stream payloads (users, messages, channel data, filters) carry
//! arbitrary custom fields, so they travel as [`serde_json::Value`]. The types
//! here cover the parts of the API whose shape is fixed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON object.
pub type Object = Map<String, Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

/// One sort criterion, serialized as `{"field": .., "direction": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: String,
    /// `1` ascending, `-1` descending.
    pub direction: i32,
}

impl SortOption {
    pub fn new(field: impl Into<String>, direction: i32) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, 1)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, -1)
    }

    /// Convert the `{"field": direction}` shorthand into sort options.
    ///
    /// Accepts a single object or an array of single-key objects, and leaves
    /// already-expanded `{"field", "direction"}` entries alone.
    pub fn from_shorthand(value: &Value) -> Result<Vec<Self>> {
        let mut out = Vec::new();
        match value {
            Value::Null => {}
            Value::Object(map) => push_shorthand(map, &mut out)?,
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(map) => push_shorthand(map, &mut out)?,
                        other => {
                            return Err(Error::invalid(format!("invalid sort entry: {}", other)));
                        }
                    }
                }
            }
            other => return Err(Error::invalid(format!("invalid sort: {}", other))),
        }
        Ok(out)
    }
}

fn push_shorthand(map: &Object, out: &mut Vec<SortOption>) -> Result<()> {
    if let (Some(Value::String(field)), Some(direction)) = (map.get("field"), map.get("direction"))
    {
        out.push(SortOption::new(field.clone(), direction_of(direction)?));
        return Ok(());
    }
    for (field, direction) in map {
        out.push(SortOption::new(field.clone(), direction_of(direction)?));
    }
    Ok(())
}

fn direction_of(value: &Value) -> Result<i32> {
    value
        .as_i64()
        .and_then(|d| i32::try_from(d).ok())
        .ok_or_else(|| Error::invalid(format!("sort direction must be an integer, got {}", value)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// What to match messages against in a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Full-text query, sent as `query`.
    Text(String),
    /// Message filter, sent as `message_filter_conditions`.
    Filter(Value),
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        SearchQuery::Text(text.to_string())
    }
}

impl From<String> for SearchQuery {
    fn from(text: String) -> Self {
        SearchQuery::Text(text)
    }
}

impl From<Value> for SearchQuery {
    fn from(filter: Value) -> Self {
        match filter {
            Value::String(text) => SearchQuery::Text(text),
            other => SearchQuery::Filter(other),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate limits
// ─────────────────────────────────────────────────────────────────────────────

/// Which platforms to report app rate limits for.
#[derive(Debug, Clone, Default)]
pub struct RateLimitsQuery {
    pub server_side: bool,
    pub android: bool,
    pub ios: bool,
    pub web: bool,
    /// Restrict the report to these endpoints.
    pub endpoints: Option<Vec<String>>,
}

impl RateLimitsQuery {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (flag, name) in [
            (self.server_side, "server_side"),
            (self.android, "android"),
            (self.ios, "ios"),
            (self.web, "web"),
        ] {
            if flag {
                query.push((name.to_string(), "true".to_string()));
            }
        }
        if let Some(endpoints) = &self.endpoints {
            query.push(("endpoints".to_string(), endpoints.join(",")));
        }
        query
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel members and batch updates
// ─────────────────────────────────────────────────────────────────────────────

/// A user reference for membership and role operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_role: Option<String>,
}

impl ChannelMember {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_role: None,
        }
    }

    pub fn with_role(user_id: impl Into<String>, channel_role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_role: Some(channel_role.into()),
        }
    }
}

impl From<&str> for ChannelMember {
    fn from(user_id: &str) -> Self {
        Self::new(user_id)
    }
}

/// Operation applied by a channel batch update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOperation {
    #[serde(rename = "addMembers")]
    AddMembers,
    #[serde(rename = "removeMembers")]
    RemoveMembers,
    #[serde(rename = "invites")]
    Invites,
    #[serde(rename = "addModerators")]
    AddModerators,
    #[serde(rename = "demoteModerators")]
    DemoteModerators,
    #[serde(rename = "assignRoles")]
    AssignRoles,
    #[serde(rename = "hide")]
    Hide,
    #[serde(rename = "show")]
    Show,
    #[serde(rename = "archive")]
    Archive,
    #[serde(rename = "unarchive")]
    Unarchive,
    #[serde(rename = "updateData")]
    UpdateData,
    #[serde(rename = "addFilterTags")]
    AddFilterTags,
    #[serde(rename = "removeFilterTags")]
    RemoveFilterTags,
}

/// Body of `PUT channels/batch`.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelsBatchRequest {
    pub operation: BatchOperation,
    /// Channel filter selecting the channels to update.
    pub filter: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ChannelMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_tags_update: Option<Vec<String>>,
}

impl ChannelsBatchRequest {
    pub fn new(operation: BatchOperation, filter: Value) -> Self {
        Self {
            operation,
            filter,
            members: None,
            data: None,
            filter_tags_update: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Uploads
// ─────────────────────────────────────────────────────────────────────────────

/// Where an uploaded file's contents come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Local file path, or an `http(s)` URL that is downloaded first.
    Location(String),
    /// In-memory contents.
    Bytes(Vec<u8>),
}

impl From<&str> for FileSource {
    fn from(location: &str) -> Self {
        FileSource::Location(location.to_string())
    }
}

impl From<String> for FileSource {
    fn from(location: String) -> Self {
        FileSource::Location(location)
    }
}

impl From<Vec<u8>> for FileSource {
    fn from(bytes: Vec<u8>) -> Self {
        FileSource::Bytes(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payload helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Take a payload the library needs to add keys to. `null` becomes `{}`.
pub(crate) fn into_object(value: Value, what: &str) -> Result<Object> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Object::new()),
        other => Err(Error::invalid(format!(
            "{} must be a JSON object, got {}",
            what, other
        ))),
    }
}

/// Same as [`into_object`] for optional payloads.
pub(crate) fn options_object(value: Option<Value>, what: &str) -> Result<Object> {
    into_object(value.unwrap_or(Value::Null), what)
}

/// `{"id": user_id}`.
pub(crate) fn user_ref(user_id: &str) -> Value {
    let mut user = Object::new();
    user.insert("id".to_string(), Value::String(user_id.to_string()));
    Value::Object(user)
}

/// Flatten an option bag into query pairs.
///
/// Strings pass through, numbers and booleans use their JSON text, arrays and
/// objects are JSON-encoded, and `null` entries are dropped.
pub(crate) fn object_to_query(options: Object) -> Vec<(String, String)> {
    options
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, value))
        })
        .collect()
}
