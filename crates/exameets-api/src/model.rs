// Wire-level data shapes shared by all resource endpoints.
//
// Entity records are opaque key/value documents whose schema belongs to
// the backend. The client keeps them as a flattened JSON map with the id
// pulled out, and offers typed accessors only for fields the consumers
// actually destructure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque entity record (job, exam, scholarship, ...).
///
/// The backend assigns `_id`; everything else rides in `fields` untouched.
/// The client never validates or reshapes records beyond the optional
/// comma-separated array splitting applied to create/update payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Construct a record from an id and raw fields.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field lookup.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The record's creation timestamp, if the backend supplied one.
    ///
    /// Used by the what's-new aggregation to order records across
    /// resource types.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.str_field("createdAt")
            .or_else(|| self.str_field("created_at"))
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Best-effort display title: `title`, then `name`, then the id.
    pub fn display_title(&self) -> &str {
        self.str_field("title")
            .or_else(|| self.str_field("name"))
            .or_else(|| self.str_field("jobTitle"))
            .unwrap_or(&self.id)
    }
}

/// Server-side pagination state attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// Clamp a requested page into `[1, total_pages]`.
    ///
    /// The UI must never request pages outside this range; callers route
    /// page arguments through here rather than trusting raw input.
    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.total_pages.max(1))
    }
}

/// Query parameters for a list request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Free-text search, sent as `searchKeyword`.
    pub search_keyword: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Entity-specific filters (e.g. `location`, `category`), passed
    /// through as query parameters verbatim.
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            search_keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }
}

/// One page of a resource listing.
#[derive(Debug, Clone)]
pub struct ResourcePage {
    pub items: Vec<Record>,
    pub pagination: Pagination,
}

/// Split comma-separated form fields into JSON arrays in place.
///
/// The portal's create/update forms submit fields like `skills` as a
/// single comma-separated string; the backend stores them as arrays.
pub fn split_list_fields(payload: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        let Some(Value::String(raw)) = payload.get(*key) else {
            continue;
        };
        let parts: Vec<Value> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_owned()))
            .collect();
        payload.insert((*key).to_owned(), Value::Array(parts));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_roundtrips_mongo_id() {
        let rec: Record =
            serde_json::from_value(json!({"_id": "abc", "title": "SDE", "salary": "12 LPA"}))
                .unwrap();
        assert_eq!(rec.id, "abc");
        assert_eq!(rec.str_field("title"), Some("SDE"));
        assert_eq!(rec.display_title(), "SDE");

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back.get("_id").and_then(Value::as_str), Some("abc"));
    }

    #[test]
    fn clamp_page_stays_in_range() {
        let p = Pagination {
            current_page: 2,
            total_pages: 3,
            total_items: 25,
        };
        assert_eq!(p.clamp_page(0), 1);
        assert_eq!(p.clamp_page(2), 2);
        assert_eq!(p.clamp_page(99), 3);
    }

    #[test]
    fn split_list_fields_handles_spacing_and_empties() {
        let mut payload = json!({"skills": "rust, react,, node ", "title": "SDE"})
            .as_object()
            .cloned()
            .unwrap();
        split_list_fields(&mut payload, &["skills", "missing"]);
        assert_eq!(
            payload.get("skills").unwrap(),
            &json!(["rust", "react", "node"])
        );
        assert_eq!(payload.get("title").unwrap(), &json!("SDE"));
    }
}
