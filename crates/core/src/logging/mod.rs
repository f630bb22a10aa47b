//! Structured logging.
//!
//! A [`Logger`] is an immutable value carrying a dot-joined namespace and an
//! ordered metadata map. Deriving a child logger never touches the parent, so a
//! logger can be handed down a call chain and enriched at every step. Each emit
//! call produces exactly one [`LogRecord`] on the logger's [`LogSink`].
//!
//! Error values of any shape are folded into a [`StructuredError`] by
//! [`normalize`] before they are attached to a record.

mod filter;
mod logger;
mod normalize;
mod sink;
mod value;

pub use filter::NamespaceFilter;
pub use logger::{LogRecord, Logger, Meta, Severity};
pub use normalize::{
    error_value, normalize, normalize_error, StructuredError, NULL_ERROR_NAME, UNKNOWN_ERROR_NAME,
};
pub use sink::{JsonSink, LogSink, MemorySink};
pub use value::{resolve, LogValue};

/// Returns the last path segment of a type name, or `None` when the type has
/// no usable name (trait objects, closures).
pub(crate) fn short_type_name<T: ?Sized>() -> Option<&'static str> {
    let full = std::any::type_name::<T>();
    if full.starts_with("dyn ") || full.contains("{{closure}}") {
        return None;
    }

    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    fn sample_operation() {}

    #[test]
    fn test_short_type_name_of_struct() {
        assert_eq!(short_type_name::<Widget>(), Some("Widget"));
    }

    #[test]
    fn test_short_type_name_strips_generics() {
        assert_eq!(short_type_name::<Vec<String>>(), Some("Vec"));
    }

    #[test]
    fn test_short_type_name_of_function_item() {
        fn name_of<F>(_: &F) -> Option<&'static str> {
            short_type_name::<F>()
        }

        assert_eq!(name_of(&sample_operation), Some("sample_operation"));
    }

    #[test]
    fn test_short_type_name_of_closure_is_none() {
        fn name_of<F>(_: &F) -> Option<&'static str> {
            short_type_name::<F>()
        }

        let closure = || {};
        assert_eq!(name_of(&closure), None);
    }

    #[test]
    fn test_short_type_name_of_trait_object_is_none() {
        assert_eq!(short_type_name::<dyn std::error::Error>(), None);
    }
}
