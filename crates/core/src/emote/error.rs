use thiserror::Error;

/// Message used when stored attributes cannot form an emote.
pub const NOT_ENOUGH_ATTRIBUTES: &str = "Not enough attributes to instantiate an emote";

/// Errors that can occur when validating or reconstructing emotes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmoteError {
    #[error("{0}")]
    Validation(String),
    #[error("Emote trigger cannot be empty")]
    EmptyTrigger,
    #[error("Emote url cannot be empty")]
    EmptyUrl,
}

impl EmoteError {
    pub fn not_enough_attributes() -> Self {
        Self::Validation(NOT_ENOUGH_ATTRIBUTES.to_string())
    }
}
