//! Attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB attribute maps and emotes.
//! These are testable in isolation without DynamoDB access.

use std::collections::BTreeMap;

use aws_sdk_dynamodb::types::AttributeValue;
use emotes_core::emote::{Emote, EmoteError, EmotePatch};
use emotes_core::logging::LogValue;
use serde_json::{Number, Value};

use super::{Item, ID_ATTRIBUTE};

const TRIGGER_ATTRIBUTE: &str = "trigger";
const URL_ATTRIBUTE: &str = "url";

// ============================================================================
// Emote conversions
// ============================================================================

/// Reconstructs an emote from stored attributes.
///
/// `id`, `trigger` and `url` must all be present, string-typed and non-empty.
pub fn item_to_emote(item: &Item) -> Result<Emote, EmoteError> {
    match (
        get_string(item, ID_ATTRIBUTE),
        get_string(item, TRIGGER_ATTRIBUTE),
        get_string(item, URL_ATTRIBUTE),
    ) {
        (Some(id), Some(trigger), Some(url)) => Emote::from_parts(id, trigger, url),
        _ => Err(EmoteError::not_enough_attributes()),
    }
}

/// Serializes the identifying attributes of an emote: `id` and `trigger`.
///
/// `url` is deliberately left out; writes go through [`emote_to_item`].
pub fn emote_to_attributes(emote: &Emote) -> Item {
    let mut item = Item::new();
    item.insert(ID_ATTRIBUTE.to_string(), AttributeValue::S(emote.id.clone()));
    item.insert(
        TRIGGER_ATTRIBUTE.to_string(),
        AttributeValue::S(emote.trigger.clone()),
    );
    item
}

/// Converts an emote to the full item written to the table.
pub fn emote_to_item(emote: &Emote) -> Item {
    let mut item = emote_to_attributes(emote);
    item.insert(URL_ATTRIBUTE.to_string(), AttributeValue::S(emote.url.clone()));
    item
}

/// Collects the attributes a patch sets. The id is never included.
pub fn patch_to_updates(patch: &EmotePatch) -> Item {
    let mut updates = Item::new();
    if let Some(trigger) = &patch.trigger {
        updates.insert(
            TRIGGER_ATTRIBUTE.to_string(),
            AttributeValue::S(trigger.clone()),
        );
    }
    if let Some(url) = &patch.url {
        updates.insert(URL_ATTRIBUTE.to_string(), AttributeValue::S(url.clone()));
    }
    updates
}

// ============================================================================
// Logging helpers
// ============================================================================

/// Converts an attribute value to plain JSON.
///
/// Numbers stay numbers when they parse, binary and other exotic types are
/// rendered with their debug representation.
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => serde_json::from_str::<Number>(n)
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(n.clone())),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(values) | AttributeValue::Ns(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::L(values) => Value::Array(values.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .map(|(key, value)| (key.clone(), attribute_to_json(value)))
                .collect(),
        ),
        other => Value::String(format!("{other:?}")),
    }
}

/// Borrowed item that logs as a plain JSON object.
pub struct ItemLog<'a>(pub &'a Item);

impl LogValue for ItemLog<'_> {
    fn to_json(&self) -> Option<Value> {
        Some(attribute_to_json(&AttributeValue::M(self.0.clone())))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a string attribute, `None` when missing or not string-typed.
pub fn get_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn stored(fields: &[(&str, AttributeValue)]) -> Item {
        fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn sample_emote() -> Emote {
        Emote::from_parts("1", "t", "u").unwrap()
    }

    #[test]
    fn test_item_to_emote_with_all_attributes() {
        let item = stored(&[("id", s("1")), ("trigger", s("t")), ("url", s("u"))]);

        let emote = item_to_emote(&item).unwrap();

        assert_eq!(emote, sample_emote());
    }

    #[test]
    fn test_item_to_emote_missing_any_attribute_fails() {
        let complete = [("id", s("1")), ("trigger", s("t")), ("url", s("u"))];

        for missing in ["id", "trigger", "url"] {
            let fields: Vec<_> = complete
                .iter()
                .filter(|(key, _)| *key != missing)
                .cloned()
                .collect();

            assert_eq!(
                item_to_emote(&stored(&fields)),
                Err(EmoteError::not_enough_attributes()),
                "missing {missing}"
            );
        }
    }

    #[test]
    fn test_item_to_emote_rejects_non_string_attributes() {
        let item = stored(&[
            ("id", s("1")),
            ("trigger", AttributeValue::N("5".to_string())),
            ("url", s("u")),
        ]);

        assert!(matches!(
            item_to_emote(&item),
            Err(EmoteError::Validation(_))
        ));
    }

    #[test]
    fn test_item_to_emote_rejects_empty_strings() {
        let item = stored(&[("id", s("1")), ("trigger", s("")), ("url", s("u"))]);

        assert!(item_to_emote(&item).is_err());
    }

    #[test]
    fn test_item_to_emote_ignores_extra_attributes() {
        let item = stored(&[
            ("id", s("1")),
            ("trigger", s("t")),
            ("url", s("u")),
            ("createdBy", s("someone")),
        ]);

        assert_eq!(item_to_emote(&item).unwrap(), sample_emote());
    }

    #[test]
    fn test_emote_to_attributes_omits_url() {
        let attributes = emote_to_attributes(&sample_emote());

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get("id"), Some(&s("1")));
        assert_eq!(attributes.get("trigger"), Some(&s("t")));
        assert!(attributes.get("url").is_none());
    }

    #[test]
    fn test_emote_to_item_is_reconstructible() {
        let item = emote_to_item(&sample_emote());

        assert_eq!(item.len(), 3);
        assert_eq!(item_to_emote(&item).unwrap(), sample_emote());
    }

    #[test]
    fn test_patch_to_updates_only_supplied_fields() {
        let updates = patch_to_updates(&EmotePatch::new("1").with_url("https://cdn/new.gif"));

        assert_eq!(updates.len(), 1);
        assert_eq!(updates.get("url"), Some(&s("https://cdn/new.gif")));
        assert!(updates.get("id").is_none());
    }

    #[test]
    fn test_patch_to_updates_empty_patch() {
        assert!(patch_to_updates(&EmotePatch::new("1")).is_empty());
    }

    #[test]
    fn test_attribute_to_json() {
        assert_eq!(attribute_to_json(&s("x")), json!("x"));
        assert_eq!(attribute_to_json(&AttributeValue::N("42".to_string())), json!(42));
        assert_eq!(
            attribute_to_json(&AttributeValue::N("not a number".to_string())),
            json!("not a number")
        );
        assert_eq!(attribute_to_json(&AttributeValue::Bool(true)), json!(true));
        assert_eq!(attribute_to_json(&AttributeValue::Null(true)), Value::Null);
        assert_eq!(
            attribute_to_json(&AttributeValue::L(vec![s("a"), AttributeValue::Bool(false)])),
            json!(["a", false])
        );
    }

    #[test]
    fn test_item_log_renders_plain_object() {
        let item = stored(&[("id", s("1")), ("trigger", s("t"))]);

        assert_eq!(
            ItemLog(&item).to_json(),
            Some(json!({"id": "1", "trigger": "t"}))
        );
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = Item::new();
        assert!(get_string(&item, "missing").is_none());
    }
}
