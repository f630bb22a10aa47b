use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{normalize, normalize_error, resolve, short_type_name, JsonSink, LogSink, LogValue};

/// Ordered metadata attached to every record a logger emits.
pub type Meta = Map<String, Value>;

const UNKNOWN_CONTEXT: &str = "unknown";

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Parses a severity name, ignoring case. `warning` is accepted for `Warn`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Severity::Debug),
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub severity: Severity,
    pub namespace: String,
    pub meta: Meta,
    pub message: Option<String>,
}

impl LogRecord {
    /// Renders the record as `{severity, ...meta, message}`.
    ///
    /// Metadata may shadow `severity`; the message always has the last word,
    /// and an absent message removes any `message` key carried in metadata.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "severity".to_string(),
            Value::String(self.severity.as_str().to_string()),
        );
        for (key, value) in &self.meta {
            object.insert(key.clone(), value.clone());
        }
        match &self.message {
            Some(message) => {
                object.insert("message".to_string(), Value::String(message.clone()));
            }
            None => {
                object.remove("message");
            }
        }
        Value::Object(object)
    }
}

/// Immutable structured logger.
///
/// Every context method returns a new logger; `self` is never modified.
#[derive(Clone)]
pub struct Logger {
    namespace: String,
    meta: Meta,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a root logger writing one JSON line per record to stdout.
    pub fn new() -> Self {
        Self {
            namespace: String::new(),
            meta: Meta::new(),
            sink: Arc::new(JsonSink::stdout()),
        }
    }

    /// Creates a root logger with an initial namespace and metadata.
    pub fn with_props(namespace: impl Into<String>, meta: Meta) -> Self {
        Self {
            namespace: namespace.into(),
            meta,
            ..Self::new()
        }
    }

    /// Replaces the sink records are written to.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Derives a child logger.
    ///
    /// The namespace gains `name` as a new `.`-separated segment (empty
    /// segments are dropped) and `meta` is merged over the parent's metadata.
    pub fn with_context(&self, name: &str, meta: Option<Meta>) -> Logger {
        let namespace = [self.namespace.as_str(), name]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".");

        let mut merged = self.meta.clone();
        for (key, value) in meta.into_iter().flatten() {
            merged.insert(key, value);
        }

        Logger {
            namespace,
            meta: merged,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Derives a child logger named after a function.
    ///
    /// Closures have no declared name and use `unknown`.
    pub fn with_context_of<F>(&self, _callable: &F, meta: Option<Meta>) -> Logger {
        self.with_context(short_type_name::<F>().unwrap_or(UNKNOWN_CONTEXT), meta)
    }

    /// Derives a child logger with one more metadata entry.
    pub fn add<V>(&self, key: impl Into<String>, value: &V) -> Logger
    where
        V: LogValue + ?Sized,
    {
        let mut meta = Meta::new();
        meta.insert(key.into(), resolve(value));
        self.with_context("", Some(meta))
    }

    /// Emits one record with an optional message.
    pub fn log(&self, severity: Severity, message: Option<&str>) {
        let record = LogRecord {
            severity,
            namespace: self.namespace.clone(),
            meta: self.meta.clone(),
            message: message.map(str::to_string),
        };
        self.sink.emit(&record);
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, Some(message));
    }

    pub fn info(&self, message: &str) {
        self.log(Severity::Info, Some(message));
    }

    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, Some(message));
    }

    pub fn error(&self, message: &str) {
        self.log(Severity::Error, Some(message));
    }

    /// Emits at ERROR with `error` normalized into the `error` metadata key.
    pub fn error_with(&self, message: &str, error: &Value) {
        self.add("error", &normalize(error))
            .log(Severity::Error, Some(message));
    }

    /// Emits at ERROR with a native error normalized into the `error` key.
    pub fn error_from<E>(&self, message: &str, error: &E)
    where
        E: std::error::Error + ?Sized,
    {
        self.add("error", &normalize_error(error))
            .log(Severity::Error, Some(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use serde_json::json;

    fn capture() -> (Logger, MemorySink) {
        let sink = MemorySink::default();
        let logger = Logger::new().with_sink(Arc::new(sink.clone()));
        (logger, sink)
    }

    fn sample_handler() {}

    #[derive(Debug, thiserror::Error)]
    #[error("store unavailable")]
    struct StoreUnavailable;

    #[test]
    fn test_severity_parse_and_order() {
        assert_eq!(Severity::parse("DEBUG"), Some(Severity::Debug));
        assert_eq!(Severity::parse(" warning "), Some(Severity::Warn));
        assert_eq!(Severity::parse("trace"), None);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_context_chain_builds_namespace_and_meta() {
        let root = Logger::new();
        let child = root.with_context("a", None).with_context("b", None).add("k", "v");

        assert_eq!(child.namespace(), "a.b");
        assert_eq!(child.meta().get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_parent_is_unchanged_by_derivation() {
        let root = Logger::with_props("root", Meta::new());
        let _child = root.with_context("a", None).add("k", "v");

        assert_eq!(root.namespace(), "root");
        assert!(root.meta().is_empty());
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let logger = Logger::new()
            .with_context("", None)
            .with_context("repo", None)
            .with_context("", None);

        assert_eq!(logger.namespace(), "repo");
    }

    #[test]
    fn test_new_meta_keys_win() {
        let mut first = Meta::new();
        first.insert("id".to_string(), json!("1"));
        first.insert("stage".to_string(), json!("live"));
        let mut second = Meta::new();
        second.insert("id".to_string(), json!("2"));

        let logger = Logger::new()
            .with_context("a", Some(first))
            .with_context("b", Some(second));

        assert_eq!(logger.meta().get("id"), Some(&json!("2")));
        assert_eq!(logger.meta().get("stage"), Some(&json!("live")));
    }

    #[test]
    fn test_function_context_uses_its_name() {
        let logger = Logger::new().with_context_of(&sample_handler, None);
        assert_eq!(logger.namespace(), "sample_handler");
    }

    #[test]
    fn test_closure_context_falls_back_to_unknown() {
        let closure = |x: u32| x + 1;
        let logger = Logger::new().with_context("ssm", None).with_context_of(&closure, None);
        assert_eq!(logger.namespace(), "ssm.unknown");
    }

    #[test]
    fn test_emit_writes_one_record() {
        let (logger, sink) = capture();

        logger.with_context("repo", None).add("id", "42").info("created");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(records[0].namespace, "repo");
        assert_eq!(
            records[0].to_json(),
            json!({"severity": "INFO", "id": "42", "message": "created"})
        );
    }

    #[test]
    fn test_each_severity() {
        let (logger, sink) = capture();

        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");

        let severities: Vec<_> = sink.records().iter().map(|r| r.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Debug,
                Severity::Info,
                Severity::Warn,
                Severity::Error
            ]
        );
    }

    #[test]
    fn test_error_without_value_has_no_error_key() {
        let (logger, sink) = capture();

        logger.error("plain");

        let record = &sink.records()[0];
        assert!(record.meta.get("error").is_none());
    }

    #[test]
    fn test_error_with_value_is_normalized() {
        let (logger, sink) = capture();

        logger.error_with("PutItem failed", &json!("boom"));

        let record = sink.records()[0].to_json();
        assert_eq!(record["severity"], json!("ERROR"));
        assert_eq!(record["message"], json!("PutItem failed"));
        assert_eq!(record["error"]["name"], json!("UnknownError"));
        assert_eq!(record["error"]["message"], json!("boom"));
        assert_eq!(record["error"]["stack"], json!([]));
    }

    #[test]
    fn test_error_with_null_value() {
        let (logger, sink) = capture();

        logger.error_with("nothing", &Value::Null);

        let record = sink.records()[0].to_json();
        assert_eq!(record["error"]["name"], json!("NullError"));
    }

    #[test]
    fn test_error_from_native_error() {
        let (logger, sink) = capture();

        logger.error_from("GetItem failed", &StoreUnavailable);

        let record = sink.records()[0].to_json();
        assert_eq!(record["error"]["name"], json!("StoreUnavailable"));
        assert_eq!(record["error"]["message"], json!("store unavailable"));
    }

    #[test]
    fn test_error_does_not_leak_into_parent() {
        let (logger, sink) = capture();

        logger.error_with("first", &json!("boom"));
        logger.info("second");

        let records = sink.records();
        assert!(records[1].meta.get("error").is_none());
    }

    #[test]
    fn test_record_without_message() {
        let mut meta = Meta::new();
        meta.insert("message".to_string(), json!("from meta"));
        let record = LogRecord {
            severity: Severity::Warn,
            namespace: String::new(),
            meta,
            message: None,
        };

        assert_eq!(record.to_json(), json!({"severity": "WARN"}));
    }

    #[test]
    fn test_meta_can_shadow_severity() {
        let mut meta = Meta::new();
        meta.insert("severity".to_string(), json!("CUSTOM"));
        let record = LogRecord {
            severity: Severity::Info,
            namespace: String::new(),
            meta,
            message: Some("m".to_string()),
        };

        assert_eq!(record.to_json()["severity"], json!("CUSTOM"));
    }
}
