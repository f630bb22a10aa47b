use serde_json::Value;
use thiserror::Error;

use crate::logging::StructuredError;

/// Stable codes carried as the `name` of a failure's structured form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmoteErrorCode {
    NotFound,
    ParseAttributes,
}

impl EmoteErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmoteErrorCode::NotFound => "ErrorNotFound",
            EmoteErrorCode::ParseAttributes => "ErrorParseAttributes",
        }
    }
}

/// Typed failure outcomes of repository writes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmoteRepositoryError {
    /// The store returned no attributes, either because the write was
    /// rejected or because the call faulted.
    #[error("No attributes were returned")]
    NotFound { meta: Option<Value> },
    /// The store returned attributes that do not form a valid emote.
    #[error("Failed to parse emote from attributes")]
    ParseAttributes,
}

impl EmoteRepositoryError {
    pub fn code(&self) -> EmoteErrorCode {
        match self {
            EmoteRepositoryError::NotFound { .. } => EmoteErrorCode::NotFound,
            EmoteRepositoryError::ParseAttributes => EmoteErrorCode::ParseAttributes,
        }
    }

    /// Renders the failure as a [`StructuredError`] named after its code.
    pub fn to_structured(&self) -> StructuredError {
        let error = StructuredError::new(self.code().as_str(), self.to_string());
        match self {
            EmoteRepositoryError::NotFound { meta: Some(meta) } => error.with_meta(meta.clone()),
            _ => error,
        }
    }
}
