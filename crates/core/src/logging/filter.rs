//! Namespace-based record filtering.
//!
//! Directives follow the `EnvFilter` shape: a comma-separated list where a
//! bare severity sets the default and `namespace=severity` overrides it for a
//! namespace and everything below it. The longest matching namespace wins.
//!
//! ```
//! use emotes_core::logging::{NamespaceFilter, Severity};
//!
//! let filter = NamespaceFilter::parse("warn,EmoteRepository.list=debug");
//!
//! assert!(filter.enabled("EmoteRepository.list", Severity::Debug));
//! assert!(!filter.enabled("EmoteRepository.get", Severity::Info));
//! ```

use super::Severity;

/// Minimum severities per namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceFilter {
    default: Severity,
    directives: Vec<(String, Severity)>,
}

impl Default for NamespaceFilter {
    /// Lets every record through.
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

impl NamespaceFilter {
    /// Creates a filter with a default minimum severity and no overrides.
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            directives: Vec::new(),
        }
    }

    /// Overrides the minimum severity for `namespace` and its children.
    pub fn with_directive(mut self, namespace: impl Into<String>, severity: Severity) -> Self {
        self.directives.push((namespace.into(), severity));
        self
    }

    /// Parses a directive list such as `info,EmoteRepository=debug`.
    ///
    /// Directives with an unknown severity are skipped.
    pub fn parse(spec: &str) -> Self {
        let mut filter = Self::default();
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((namespace, severity)) => {
                    if let Some(severity) = Severity::parse(severity) {
                        filter = filter.with_directive(namespace.trim(), severity);
                    }
                }
                None => {
                    if let Some(severity) = Severity::parse(directive) {
                        filter.default = severity;
                    }
                }
            }
        }
        filter
    }

    /// Returns whether a record at `severity` in `namespace` passes.
    pub fn enabled(&self, namespace: &str, severity: Severity) -> bool {
        let minimum = self
            .directives
            .iter()
            .filter(|(prefix, _)| covers(prefix, namespace))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, minimum)| *minimum)
            .unwrap_or(self.default);

        severity >= minimum
    }
}

/// `a.b` covers `a.b` and `a.b.c` but not `a.bc`.
fn covers(prefix: &str, namespace: &str) -> bool {
    namespace
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_passes_everything() {
        let filter = NamespaceFilter::default();

        assert!(filter.enabled("", Severity::Debug));
        assert!(filter.enabled("EmoteRepository.create", Severity::Error));
    }

    #[test]
    fn test_parse_default_severity() {
        let filter = NamespaceFilter::parse("warn");

        assert!(!filter.enabled("EmoteRepository", Severity::Info));
        assert!(filter.enabled("EmoteRepository", Severity::Warn));
    }

    #[test]
    fn test_directive_covers_children_only() {
        let filter = NamespaceFilter::parse("error,EmoteRepository=debug");

        assert!(filter.enabled("EmoteRepository", Severity::Debug));
        assert!(filter.enabled("EmoteRepository.list", Severity::Debug));
        assert!(!filter.enabled("EmoteRepositoryExtra", Severity::Debug));
        assert!(!filter.enabled("Other", Severity::Warn));
    }

    #[test]
    fn test_longest_namespace_wins() {
        let filter = NamespaceFilter::parse("EmoteRepository=debug,EmoteRepository.list=error");

        assert!(filter.enabled("EmoteRepository.get", Severity::Debug));
        assert!(!filter.enabled("EmoteRepository.list", Severity::Warn));
        assert!(!filter.enabled("EmoteRepository.list.page", Severity::Info));
    }

    #[test]
    fn test_unknown_severities_are_skipped() {
        let filter = NamespaceFilter::parse("loud, EmoteRepository = chatty ,info");

        assert_eq!(filter, NamespaceFilter::new(Severity::Info));
    }
}
