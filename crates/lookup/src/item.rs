//! Field extraction from vault item records
//!
//! A vault item is an open-ended JSON object; the CLI nests the common
//! credential fields under `login` while custom fields live in a `fields`
//! array. The accessors here return `Option` and leave the decision to fail
//! to the resolver, which knows the item name for the error message.

use serde_json::Value as JsonValue;

/// Look up `field` in the flattened view of an item
///
/// The flattened view merges the keys of the nested `login` object over the
/// top-level keys, so `username`, `password` and `totp` are reachable
/// without nesting. On a key collision the `login` value shadows the
/// top-level one.
pub fn flattened_get<'a>(item: &'a JsonValue, field: &str) -> Option<&'a JsonValue> {
    if let Some(value) = item.get("login").and_then(|login| login.get(field)) {
        return Some(value);
    }
    item.get(field)
}

/// Find the value of a user-defined custom field by name
///
/// Searches the item's `fields` array for an entry whose `name` matches.
pub fn custom_field<'a>(item: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    item.get("fields")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("name").and_then(JsonValue::as_str) == Some(name))
        .and_then(|entry| entry.get("value"))
}

/// Check whether an attachment with the given file name exists on the item
///
/// Searches the item's `attachments` array for an entry whose `fileName`
/// matches.
pub fn has_attachment(item: &JsonValue, filename: &str) -> bool {
    item.get("attachments")
        .and_then(JsonValue::as_array)
        .is_some_and(|attachments| {
            attachments
                .iter()
                .any(|entry| entry.get("fileName").and_then(JsonValue::as_str) == Some(filename))
        })
}

/// Item id used for follow-up CLI calls, falling back to the lookup term
pub fn item_id<'a>(item: &'a JsonValue, term: &'a str) -> &'a str {
    item.get("id").and_then(JsonValue::as_str).unwrap_or(term)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    fn sample_item() -> JsonValue {
        json!({
            "id": "fd2c8e4b",
            "name": "Google",
            "notes": "work account",
            "login": {
                "username": "alice",
                "password": "mysecret",
                "totp": "otpauth://totp/x"
            },
            "fields": [
                {"name": "mycustomfield", "value": "X"},
                {"name": "region", "value": "eu-west-1"}
            ],
            "attachments": [
                {"id": "a1", "fileName": "id_rsa"}
            ]
        })
    }

    #[test]
    fn test_flattened_get_reaches_login_fields() {
        let item = sample_item();
        assert_eq!(flattened_get(&item, "password").unwrap(), "mysecret");
        assert_eq!(flattened_get(&item, "username").unwrap(), "alice");
        assert_eq!(flattened_get(&item, "totp").unwrap(), "otpauth://totp/x");
    }

    #[test]
    fn test_flattened_get_reaches_top_level_fields() {
        let item = sample_item();
        assert_eq!(flattened_get(&item, "notes").unwrap(), "work account");
        assert_eq!(flattened_get(&item, "name").unwrap(), "Google");
    }

    #[test]
    fn test_flattened_get_login_shadows_top_level() {
        // Both the record and its login object carry "username"; the login
        // one wins.
        let item = json!({
            "username": "top-level",
            "login": {"username": "nested"}
        });
        assert_eq!(flattened_get(&item, "username").unwrap(), "nested");
    }

    #[test]
    fn test_flattened_get_absent_key() {
        let item = sample_item();
        assert!(flattened_get(&item, "no_such_field").is_none());
    }

    #[test]
    fn test_flattened_get_without_login_object() {
        // Secure notes have no login object at all.
        let item = json!({"name": "Note", "notes": "text"});
        assert_eq!(flattened_get(&item, "notes").unwrap(), "text");
        assert!(flattened_get(&item, "password").is_none());
    }

    #[test]
    fn test_custom_field_by_name() {
        let item = sample_item();
        assert_eq!(custom_field(&item, "mycustomfield").unwrap(), "X");
        assert_eq!(custom_field(&item, "region").unwrap(), "eu-west-1");
        assert!(custom_field(&item, "absent").is_none());
    }

    #[test]
    fn test_custom_field_without_fields_array() {
        let item = json!({"name": "Bare"});
        assert!(custom_field(&item, "anything").is_none());
    }

    #[test]
    fn test_has_attachment() {
        let item = sample_item();
        assert!(has_attachment(&item, "id_rsa"));
        assert!(!has_attachment(&item, "id_ed25519"));
    }

    #[test]
    fn test_item_id_falls_back_to_term() {
        let item = sample_item();
        assert_eq!(item_id(&item, "Google"), "fd2c8e4b");
        assert_eq!(item_id(&json!({}), "Google"), "Google");
    }
}
