// Structural field locator for parsed sensor documents
use serde_json::Value;

/// Find the first value stored under `key` anywhere in `document`.
///
/// Only mapping nodes are traversed; arrays are never descended into. At each
/// mapping level the entries are scanned in payload order first, and only if
/// none matches does the search descend into sub-mappings, also in entry
/// order. The search key is compared as a prefix of the candidate key, so
/// "tC" also matches a hypothetical "tC_raw" entry. Shelly payloads nest
/// values at varying depths (per-channel component keys like
/// "temperature:0"), so the lookup is structural, not path-based.
pub fn locate<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    let Value::Object(entries) = document else {
        return None;
    };

    for (candidate, value) in entries {
        if candidate.starts_with(key) {
            return Some(value);
        }
    }

    for value in entries.values() {
        if value.is_object() {
            if let Some(found) = locate(value, key) {
                return Some(found);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locate_top_level_key() {
        let doc = json!({"method": "NotifyFullStatus", "params": {}});
        assert_eq!(locate(&doc, "method"), Some(&json!("NotifyFullStatus")));
    }

    #[test]
    fn test_locate_nested_key() {
        let doc = json!({
            "result": {
                "temperature:0": {"tC": 22.8}
            }
        });
        assert_eq!(locate(&doc, "tC"), Some(&json!(22.8)));
    }

    #[test]
    fn test_locate_prefers_current_level_over_descent() {
        // "rssi" exists both nested under the first entry and at the second
        // entry of the top level; the level scan runs before any descent.
        let doc = json!({
            "wifi": {"rssi": -60},
            "rssi": -10
        });
        assert_eq!(locate(&doc, "rssi"), Some(&json!(-10)));
    }

    #[test]
    fn test_locate_descends_sub_mappings_in_entry_order() {
        let doc = json!({
            "a": {"x": {"target": 1}},
            "b": {"target": 2}
        });
        assert_eq!(locate(&doc, "target"), Some(&json!(1)));
    }

    #[test]
    fn test_locate_search_key_is_prefix_of_candidate() {
        let doc = json!({"percentage": 80});
        assert_eq!(locate(&doc, "percent"), Some(&json!(80)));
    }

    #[test]
    fn test_locate_does_not_descend_arrays() {
        let doc = json!({"list": [{"target": 1}]});
        assert_eq!(locate(&doc, "target"), None);
    }

    #[test]
    fn test_locate_missing_key() {
        let doc = json!({"result": {"humidity:0": {"rh": 55.0}}});
        assert_eq!(locate(&doc, "tC"), None);
    }

    #[test]
    fn test_locate_non_mapping_document() {
        assert_eq!(locate(&json!(null), "tC"), None);
        assert_eq!(locate(&json!([1, 2, 3]), "tC"), None);
        assert_eq!(locate(&json!("text"), "tC"), None);
        assert_eq!(locate(&json!({}), "tC"), None);
    }
}
