use serde::de::DeserializeOwned;
use serde_json::Value;

use super::RequestError;

/// Extracts the list carried by a collection response.
///
/// Tries, in order: a bare array, a `results` array, a `<resource_name>` array.
/// Anything else yields an empty list. Never fails.
pub fn normalize_list(body: Value, resource_name: &str) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("results") {
                return items;
            }
            match map.remove(resource_name) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Normalizes a collection response and decodes each item into `T`.
pub fn normalize_records<T: DeserializeOwned>(
    body: Value,
    resource_name: &str,
) -> Result<Vec<T>, RequestError> {
    normalize_list(body, resource_name)
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| {
                RequestError::malformed(format!("{resource_name} item could not be decoded: {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn items() -> Value {
        json!([{"id": 7, "status": "pending"}, {"id": 8, "status": "approved"}])
    }

    #[test]
    fn test_all_known_shapes_yield_same_items() {
        let bare = normalize_list(items(), "consultations");
        let results = normalize_list(json!({"count": 2, "results": items()}), "consultations");
        let named = normalize_list(json!({"consultations": items()}), "consultations");

        assert_eq!(bare.len(), 2);
        assert_eq!(bare, results);
        assert_eq!(bare, named);
    }

    #[test]
    fn test_results_wins_over_named_field() {
        let body = json!({"results": [{"id": 1}], "consultations": [{"id": 2}, {"id": 3}]});
        let list = normalize_list(body, "consultations");
        assert_eq!(list, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_non_array_results_falls_through_to_named_field() {
        let body = json!({"results": "none", "scans": [{"id": 4}]});
        assert_eq!(normalize_list(body, "scans"), vec![json!({"id": 4})]);
    }

    #[test]
    fn test_unknown_shapes_yield_empty() {
        for body in [
            json!(null),
            json!("consultations"),
            json!(42),
            json!({"detail": "nothing here"}),
            json!({"consultations": {"id": 1}}),
            json!({"other": [1, 2, 3]}),
        ] {
            assert!(normalize_list(body, "consultations").is_empty());
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u64,
    }

    #[test]
    fn test_normalize_records_decodes_items() {
        let rows: Vec<Row> =
            normalize_records(json!({"results": [{"id": 7}]}), "consultations").unwrap();
        assert_eq!(rows, vec![Row { id: 7 }]);
    }

    #[test]
    fn test_normalize_records_reports_bad_item() {
        let err = normalize_records::<Row>(json!([{"id": "x"}]), "consultations").unwrap_err();
        assert!(matches!(err, RequestError::MalformedResponse { .. }));
    }
}
