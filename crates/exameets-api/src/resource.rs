// Resource endpoints
//
// One method set shared by all seven content resources, driven by a
// `ResourceRoute` descriptor. The REST surface is uniform:
//
//   GET    /{path}/getall?page&searchKeyword&{filters}
//   GET    /{path}/get/{id}
//   POST   /{path}/create
//   PUT    /{path}/update/{id}
//   DELETE /{path}/{id}
//   GET    /{path}/latest
//
// Response payload keys differ per resource (`jobs`, `exams`, ...), so
// the descriptor carries both the plural and singular keys.

use serde_json::{Map, Value};

use crate::client::{ApiClient, payload_message};
use crate::error::Error;
use crate::model::{ListQuery, Pagination, Record, ResourcePage};

/// Endpoint descriptor for one content resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRoute {
    /// URL path segment (e.g. `"job"`).
    pub path: &'static str,
    /// Payload key for list responses (e.g. `"jobs"`).
    pub collection: &'static str,
    /// Payload key for detail/create/update responses (e.g. `"job"`).
    pub singular: &'static str,
}

/// The seven content resources the portal serves.
pub mod routes {
    use super::ResourceRoute;

    pub const JOB: ResourceRoute = ResourceRoute {
        path: "job",
        collection: "jobs",
        singular: "job",
    };

    pub const GOVT_JOB: ResourceRoute = ResourceRoute {
        path: "govtjob",
        collection: "govtjobs",
        singular: "govtjob",
    };

    pub const EXAM: ResourceRoute = ResourceRoute {
        path: "exam",
        collection: "exams",
        singular: "exam",
    };

    pub const SCHOLARSHIP: ResourceRoute = ResourceRoute {
        path: "scholarship",
        collection: "scholarships",
        singular: "scholarship",
    };

    pub const ADMIT_CARD: ResourceRoute = ResourceRoute {
        path: "admitcard",
        collection: "admitcards",
        singular: "admitcard",
    };

    pub const ADMISSION: ResourceRoute = ResourceRoute {
        path: "admission",
        collection: "admissions",
        singular: "admission",
    };

    pub const PREVIOUS_YEAR_PAPER: ResourceRoute = ResourceRoute {
        path: "pyq",
        collection: "pyqs",
        singular: "pyq",
    };
}

/// Result of a create/update call: the affected record (when the backend
/// echoes it back) and the transient success message.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub record: Option<Record>,
    pub message: Option<String>,
}

impl ApiClient {
    /// Fetch one page of a resource listing.
    pub async fn list(
        &self,
        route: &ResourceRoute,
        query: &ListQuery,
    ) -> Result<ResourcePage, Error> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(ref keyword) = query.search_keyword {
            params.push(("searchKeyword".into(), keyword.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page".into(), page.to_string()));
        }
        params.extend(query.filters.iter().cloned());

        let value = self.get(&format!("{}/getall", route.path), &params).await?;

        let items = extract_items(route, &value)?;
        let pagination = extract_pagination(&value, query.page, items.len());
        Ok(ResourcePage { items, pagination })
    }

    /// Fetch a single record by id.
    pub async fn get_one(&self, route: &ResourceRoute, id: &str) -> Result<Record, Error> {
        let value = self.get(&format!("{}/get/{id}", route.path), &[]).await?;
        extract_record(route, &value).ok_or_else(|| missing_payload(route, &value))
    }

    /// Create a new record.
    pub async fn create(
        &self,
        route: &ResourceRoute,
        payload: Map<String, Value>,
    ) -> Result<MutationOutcome, Error> {
        let value = self
            .post(&format!("{}/create", route.path), &Value::Object(payload))
            .await?;
        Ok(MutationOutcome {
            record: extract_record(route, &value),
            message: payload_message(&value),
        })
    }

    /// Update an existing record.
    pub async fn update(
        &self,
        route: &ResourceRoute,
        id: &str,
        payload: Map<String, Value>,
    ) -> Result<MutationOutcome, Error> {
        let value = self
            .put(
                &format!("{}/update/{id}", route.path),
                &Value::Object(payload),
            )
            .await?;
        Ok(MutationOutcome {
            record: extract_record(route, &value),
            message: payload_message(&value),
        })
    }

    /// Delete a record by id. Returns the backend's success message.
    pub async fn delete_one(
        &self,
        route: &ResourceRoute,
        id: &str,
    ) -> Result<Option<String>, Error> {
        let value = self.delete(&format!("{}/{id}", route.path), None).await?;
        Ok(payload_message(&value))
    }

    /// Fetch the bounded "latest N" listing for a resource.
    pub async fn latest(&self, route: &ResourceRoute) -> Result<Vec<Record>, Error> {
        let value = self.get(&format!("{}/latest", route.path), &[]).await?;
        extract_items(route, &value)
    }
}

// ── Payload extraction ──────────────────────────────────────────────

/// Pull the record array out of a list/latest payload.
///
/// Prefers the route's collection key, falling back to the generic
/// `data` key some endpoints use.
fn extract_items(route: &ResourceRoute, value: &Value) -> Result<Vec<Record>, Error> {
    let raw = value
        .get(route.collection)
        .or_else(|| value.get("data"))
        .ok_or_else(|| missing_payload(route, value))?;
    serde_json::from_value(raw.clone()).map_err(|e| Error::Deserialization {
        message: format!("invalid {} array: {e}", route.collection),
        body: value.to_string(),
    })
}

/// Pull a single record out of a detail/create/update payload.
fn extract_record(route: &ResourceRoute, value: &Value) -> Option<Record> {
    let raw = value.get(route.singular).or_else(|| value.get("data"))?;
    serde_json::from_value(raw.clone()).ok()
}

/// Pagination fields, with sane fallbacks for endpoints that omit them.
fn extract_pagination(value: &Value, requested_page: Option<u32>, item_count: usize) -> Pagination {
    let as_u32 = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    };

    Pagination {
        current_page: as_u32("currentPage")
            .or(requested_page)
            .unwrap_or(1)
            .max(1),
        total_pages: as_u32("totalPages").unwrap_or(1).max(1),
        total_items: value
            .get("totalItems")
            .or_else(|| value.get("total"))
            .and_then(Value::as_u64)
            .unwrap_or_else(|| u64::try_from(item_count).unwrap_or_default()),
    }
}

fn missing_payload(route: &ResourceRoute, value: &Value) -> Error {
    Error::Deserialization {
        message: format!(
            "response missing `{}`/`{}` payload",
            route.collection, route.singular
        ),
        body: value.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_pagination_prefers_backend_fields() {
        let value = json!({"currentPage": 2, "totalPages": 5, "totalItems": 42});
        let p = extract_pagination(&value, Some(9), 10);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.total_pages, 5);
        assert_eq!(p.total_items, 42);
    }

    #[test]
    fn extract_pagination_falls_back_to_request() {
        let value = json!({"jobs": []});
        let p = extract_pagination(&value, Some(3), 7);
        assert_eq!(p.current_page, 3);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_items, 7);
    }

    #[test]
    fn extract_items_accepts_data_fallback() {
        let value = json!({"success": true, "data": [{"_id": "a"}]});
        let items = extract_items(&routes::JOB, &value).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }
}
