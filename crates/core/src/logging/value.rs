//! Values that can be attached to a logger's metadata.

use serde_json::{Number, Value};
use uuid::Uuid;

use super::StructuredError;

/// Serialization capabilities a metadata value may offer.
///
/// [`resolve`] tries [`LogValue::to_json`] first, then [`LogValue::to_text`],
/// and falls back to [`LogValue::raw`]. Implementors only provide the
/// capabilities they actually have.
pub trait LogValue {
    /// Structured JSON rendering.
    fn to_json(&self) -> Option<Value> {
        None
    }

    /// Human-readable rendering.
    fn to_text(&self) -> Option<String> {
        None
    }

    /// The value as-is.
    fn raw(&self) -> Value {
        Value::Null
    }
}

/// Resolves a metadata value through its declared capabilities.
pub fn resolve<V>(value: &V) -> Value
where
    V: LogValue + ?Sized,
{
    value
        .to_json()
        .or_else(|| value.to_text().map(Value::String))
        .unwrap_or_else(|| value.raw())
}

impl LogValue for Value {
    fn raw(&self) -> Value {
        self.clone()
    }
}

impl LogValue for str {
    fn raw(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl LogValue for String {
    fn raw(&self) -> Value {
        Value::String(self.clone())
    }
}

impl LogValue for bool {
    fn raw(&self) -> Value {
        Value::Bool(*self)
    }
}

impl LogValue for i64 {
    fn raw(&self) -> Value {
        Value::Number((*self).into())
    }
}

impl LogValue for u64 {
    fn raw(&self) -> Value {
        Value::Number((*self).into())
    }
}

impl LogValue for f64 {
    fn raw(&self) -> Value {
        Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl<T> LogValue for Option<T>
where
    T: LogValue,
{
    fn raw(&self) -> Value {
        self.as_ref().map(resolve).unwrap_or(Value::Null)
    }
}

impl LogValue for Uuid {
    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl LogValue for StructuredError {
    fn to_json(&self) -> Option<Value> {
        Some(self.to_value())
    }
}
