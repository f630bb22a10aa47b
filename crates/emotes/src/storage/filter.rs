//! Scan filter construction.
//!
//! Pure translation of [`ScanFilterFragment`]s into the expression text and
//! binding tables a DynamoDB scan takes.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use emotes_core::logging::LogValue;
use emotes_core::storage::ScanFilterFragment;
use serde_json::{json, Value};

use super::conversions::attribute_to_json;

/// Filter expression plus its attribute name and value bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFilter {
    pub expression: String,
    pub attribute_names: HashMap<String, String>,
    pub attribute_values: HashMap<String, AttributeValue>,
}

impl ScanFilter {
    /// An empty expression means "no filter".
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }
}

impl LogValue for ScanFilter {
    fn to_json(&self) -> Option<Value> {
        let names: BTreeMap<_, _> = self.attribute_names.iter().collect();
        let values: BTreeMap<_, _> = self
            .attribute_values
            .iter()
            .map(|(key, value)| (key, attribute_to_json(value)))
            .collect();

        Some(json!({
            "expression": self.expression,
            "attributeNames": names,
            "attributeValues": values,
        }))
    }
}

/// Builds a scan filter from fragments.
///
/// Each fragment renders as `"<key> <op>"` and the renderings are joined with
/// single spaces; no logical connective is inserted between fragments. Keys
/// bind to themselves in `attribute_names` and values bind to `:<key>` in
/// `attribute_values`. Repeated keys keep the last fragment's binding.
pub fn build_scan_filter(fragments: &[ScanFilterFragment]) -> ScanFilter {
    let expression = fragments
        .iter()
        .map(|fragment| format!("{} {}", fragment.key, fragment.op))
        .collect::<Vec<_>>()
        .join(" ");

    let mut attribute_names = HashMap::new();
    let mut attribute_values = HashMap::new();
    for fragment in fragments {
        attribute_names.insert(fragment.key.clone(), fragment.key.clone());
        attribute_values.insert(
            format!(":{}", fragment.key),
            AttributeValue::S(fragment.value.clone()),
        );
    }

    ScanFilter {
        expression,
        attribute_names,
        attribute_values,
    }
}
