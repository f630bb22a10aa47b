//! Error normalization.
//!
//! [`normalize`] accepts any JSON value and classifies it against a fixed,
//! ordered list of shapes. The first matching shape produces the canonical
//! [`StructuredError`]; nothing in here can fail.

use serde::Serialize;
use serde_json::{Map, Value};

use super::short_type_name;

/// Name given to errors that carry no usable name.
pub const UNKNOWN_ERROR_NAME: &str = "UnknownError";
/// Name given when no error value was supplied at all.
pub const NULL_ERROR_NAME: &str = "NullError";

const NULL_ERROR_MESSAGE: &str = "No error was provided";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Canonical error shape attached to log records and failure results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredError {
    pub name: String,
    pub message: String,
    pub stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Properties copied verbatim from a loosely shaped input.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StructuredError {
    /// Creates an error with an empty stack and no metadata.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: Vec::new(),
            meta: None,
            extra: Map::new(),
        }
    }

    /// Sets the stack lines.
    pub fn with_stack(mut self, stack: Vec<String>) -> Self {
        self.stack = stack;
        self
    }

    /// Attaches arbitrary context.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Renders the error as a JSON object. Canonical fields come first and are
    /// never shadowed by copied properties.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert("message".to_string(), Value::String(self.message.clone()));
        object.insert(
            "stack".to_string(),
            Value::Array(self.stack.iter().cloned().map(Value::String).collect()),
        );
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), meta.clone());
        }
        for (key, value) in &self.extra {
            object
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        Value::Object(object)
    }
}

/// The shapes an error value is matched against, in priority order.
enum ErrorShape<'a> {
    Text(&'a str),
    Missing,
    Complete {
        name: &'a str,
        message: &'a str,
        stack: Vec<&'a str>,
    },
    Loose(&'a Value),
}

fn classify(input: &Value) -> ErrorShape<'_> {
    if let Some(text) = input.as_str() {
        return ErrorShape::Text(text);
    }
    if input.is_null() {
        return ErrorShape::Missing;
    }
    if let Some(shape) = complete_shape(input) {
        return shape;
    }
    ErrorShape::Loose(input)
}

/// Matches `{name: string, message: string, stack: [string]}`.
fn complete_shape(input: &Value) -> Option<ErrorShape<'_>> {
    let object = input.as_object()?;
    let name = object.get("name")?.as_str()?;
    let message = object.get("message")?.as_str()?;
    let stack = object
        .get("stack")?
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<_>>>()?;

    Some(ErrorShape::Complete {
        name,
        message,
        stack,
    })
}

/// Converts any error-shaped value into a [`StructuredError`].
///
/// - a string becomes the message of an `UnknownError`;
/// - `null` becomes a `NullError`;
/// - a complete `{name, message, stack}` object passes through with trimmed
///   stack lines;
/// - anything else gets default name, message and stack, and every other
///   property of an object input is copied across.
pub fn normalize(input: &Value) -> StructuredError {
    match classify(input) {
        ErrorShape::Text(message) => StructuredError::new(UNKNOWN_ERROR_NAME, message),
        ErrorShape::Missing => StructuredError::new(NULL_ERROR_NAME, NULL_ERROR_MESSAGE),
        ErrorShape::Complete {
            name,
            message,
            stack,
        } => StructuredError::new(name, message)
            .with_stack(stack.into_iter().map(|line| line.trim().to_string()).collect()),
        ErrorShape::Loose(value) => from_loose(value),
    }
}

fn from_loose(input: &Value) -> StructuredError {
    let Some(object) = input.as_object() else {
        return StructuredError::new(UNKNOWN_ERROR_NAME, UNKNOWN_ERROR_MESSAGE);
    };

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR_NAME);
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE);
    let stack = object.get("stack").map(stack_lines).unwrap_or_default();

    let mut error = StructuredError::new(name, message).with_stack(stack);
    for (key, value) in object {
        match key.as_str() {
            "name" | "message" | "stack" => {}
            "meta" => error.meta = Some(value.clone()),
            _ => {
                error.extra.insert(key.clone(), value.clone());
            }
        }
    }

    error
}

/// Accepts either a multi-line stack string or an array of lines.
fn stack_lines(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(lines) => lines
            .iter()
            .filter_map(Value::as_str)
            .map(|line| line.trim().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Renders a native error as `{name, message, stack}`.
///
/// The name is the error's type name and the stack is its `source()` chain,
/// outermost cause first. Trait objects have no type name and fall back to
/// `UnknownError`.
pub fn error_value<E>(error: &E) -> Value
where
    E: std::error::Error + ?Sized,
{
    let mut stack = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push(Value::String(cause.to_string()));
        source = cause.source();
    }

    let mut object = Map::new();
    object.insert(
        "name".to_string(),
        Value::String(short_type_name::<E>().unwrap_or(UNKNOWN_ERROR_NAME).to_string()),
    );
    object.insert("message".to_string(), Value::String(error.to_string()));
    object.insert("stack".to_string(), Value::Array(stack));
    Value::Object(object)
}

/// Normalizes a native error.
pub fn normalize_error<E>(error: &E) -> StructuredError
where
    E: std::error::Error + ?Sized,
{
    normalize(&error_value(error))
}
