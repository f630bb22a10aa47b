//! Pure functions for mapping emote errors to HTTP status codes.

use crate::emote::EmoteError;

use super::EmoteRepositoryError;

/// Maps an [`EmoteRepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 503 (Service Unavailable): the write was rejected or the
///   store faulted, and the caller cannot tell which
/// - `ParseAttributes` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use emotes_core::storage::{repository_error_to_status_code, EmoteRepositoryError};
///
/// assert_eq!(
///     repository_error_to_status_code(&EmoteRepositoryError::ParseAttributes),
///     500
/// );
/// ```
pub fn repository_error_to_status_code(error: &EmoteRepositoryError) -> u16 {
    match error {
        EmoteRepositoryError::NotFound { .. } => 503,
        EmoteRepositoryError::ParseAttributes => 500,
    }
}

/// Maps an [`EmoteError`] to an HTTP status code. Every variant describes bad
/// client input, so all map to 400.
pub fn emote_error_to_status_code(error: &EmoteError) -> u16 {
    match error {
        EmoteError::Validation(_) | EmoteError::EmptyTrigger | EmoteError::EmptyUrl => 400,
    }
}
