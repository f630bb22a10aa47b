//! Application state shared by request handlers.

use std::sync::Arc;

use emotes_core::logging::Logger;

use crate::config::StoreConfig;
use crate::repository::EmoteRepository;
use crate::storage::InMemoryStore;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Emote repository.
    pub emotes: Arc<EmoteRepository>,
}

impl AppState {
    pub fn new(emotes: EmoteRepository) -> Self {
        Self {
            emotes: Arc::new(emotes),
        }
    }

    /// State backed by the DynamoDB table described by `config`.
    pub async fn from_config(config: &StoreConfig, logger: Logger) -> Self {
        Self::new(EmoteRepository::from_config(config, Some(logger)).await)
    }

    /// State backed by an empty in-memory store. Data is lost on shutdown.
    pub fn in_memory(logger: Logger) -> Self {
        Self::new(EmoteRepository::new(
            Arc::new(InMemoryStore::new()),
            Some(logger),
        ))
    }
}
