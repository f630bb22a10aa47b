use serde::{Deserialize, Serialize};

/// One `key op value` clause of a scan filter.
///
/// Only `key` and `op` end up in the expression text; `value` is bound
/// separately as `:<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFilterFragment {
    pub key: String,
    pub op: String,
    pub value: String,
}

impl ScanFilterFragment {
    pub fn new(key: impl Into<String>, op: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an `=` clause.
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, "=", value)
    }
}
