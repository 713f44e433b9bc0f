//! Request payloads for the product proxy endpoints.
//!
//! Product bodies are forwarded to the commerce API untyped; the portal only
//! cares about the envelope around them (the optional user note and, for
//! variations, the variation id).

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Body for product create/update: the commerce payload plus the portal's
/// own free-text note.
#[derive(Debug, Deserialize)]
pub struct ProductWriteRequest {
    /// Product payload forwarded verbatim to the commerce API.
    pub data: Value,
    /// Optional note stored locally and echoed in notification mail.
    #[serde(rename = "userNote")]
    pub user_note: Option<String>,
}

/// One element of a bulk variation update.
#[derive(Debug, Deserialize)]
pub struct VariationUpdate {
    pub id: Value,
    pub data: Value,
}

/// One element of a bulk variation create.
#[derive(Debug, Deserialize)]
pub struct VariationCreate {
    pub data: Value,
}

/// Catalog search request.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, message = "Search value is required"))]
    pub value: String,
}

/// Renders a JSON id (number or string) as a URL path segment.
pub fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_segment_handles_numbers_and_strings() {
        assert_eq!(id_segment(&json!(42)), "42");
        assert_eq!(id_segment(&json!("42")), "42");
    }

    #[test]
    fn write_request_accepts_user_note_alias() {
        let request: ProductWriteRequest =
            serde_json::from_value(json!({ "data": { "name": "Filter" }, "userNote": "restock" }))
                .unwrap();
        assert_eq!(request.user_note.as_deref(), Some("restock"));
        assert_eq!(request.data["name"], "Filter");
    }
}
