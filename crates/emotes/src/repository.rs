//! Emote repository.
//!
//! Translates domain operations into [`EmoteStore`] calls. Store faults and
//! malformed items are logged and turned into typed outcomes; nothing here
//! propagates a store error to the caller.

use std::sync::Arc;

use emotes_core::emote::{Emote, EmotePatch, IdGenerator, NewEmote, UuidGenerator};
use emotes_core::logging::Logger;
use emotes_core::storage::{EmoteRepositoryError, ScanFilterFragment};
use serde_json::json;

use crate::config::StoreConfig;
use crate::storage::conversions::{emote_to_item, item_to_emote, patch_to_updates, ItemLog};
use crate::storage::{build_scan_filter, DynamoDbStore, EmoteStore, Item, StoreError};

/// Namespace of the repository's logger.
const LOGGER_NAMESPACE: &str = "EmoteRepository";

/// CRUD over emotes.
#[derive(Clone)]
pub struct EmoteRepository {
    store: Arc<dyn EmoteStore>,
    ids: Arc<dyn IdGenerator>,
    logger: Logger,
}

impl EmoteRepository {
    /// Creates a repository over `store`.
    ///
    /// The logger (a fresh root one when `None`) gains an `EmoteRepository`
    /// segment; each operation logs under a further segment named after it.
    pub fn new(store: Arc<dyn EmoteStore>, logger: Option<Logger>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            logger: logger
                .unwrap_or_default()
                .with_context(LOGGER_NAMESPACE, None),
        }
    }

    /// Creates a repository backed by the DynamoDB table in `config`.
    pub async fn from_config(config: &StoreConfig, logger: Option<Logger>) -> Self {
        let store = DynamoDbStore::from_config(config).await;
        Self::new(Arc::new(store), logger)
    }

    /// Replaces the id generator used by [`EmoteRepository::create`].
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Stores a new emote under a freshly generated id.
    ///
    /// The write is conditional on the id being unused. A rejected write, a
    /// store fault or an empty response all yield
    /// [`EmoteRepositoryError::NotFound`].
    pub async fn create(&self, new_emote: NewEmote) -> Result<Emote, EmoteRepositoryError> {
        let emote = Emote::create_new(new_emote, self.ids.as_ref());
        let logger = self
            .logger
            .with_context("create", None)
            .add("emoteId", &emote.id);

        let attributes = match self.store.put_if_absent(emote_to_item(&emote)).await {
            Ok(Some(attributes)) => attributes,
            Ok(None) => {
                logger.error("No attributes were returned");
                return Err(EmoteRepositoryError::NotFound { meta: None });
            }
            Err(err) => {
                logger.error_from("PutItem failed", &err);
                return Err(EmoteRepositoryError::NotFound {
                    meta: Some(json!({ "cause": err.to_string() })),
                });
            }
        };

        match item_to_emote(&attributes) {
            Ok(created) => {
                logger.add("emote", &created).info("Created emote");
                Ok(created)
            }
            Err(err) => {
                logger
                    .add("attributes", &ItemLog(&attributes))
                    .error_from("Failed to parse emote from attributes", &err);
                Err(EmoteRepositoryError::ParseAttributes)
            }
        }
    }

    /// Looks up an emote. Missing, malformed and unreachable all yield `None`.
    pub async fn get(&self, id: &str) -> Option<Emote> {
        let logger = self.logger.with_context("get", None).add("emoteId", id);

        match self.store.get_item(id).await {
            Ok(Some(item)) => reconstruct(&logger, &item),
            Ok(None) => {
                logger.debug("No item was returned");
                None
            }
            Err(err) => {
                logger.error_from("GetItem failed", &err);
                None
            }
        }
    }

    /// Scans the whole table, page by page, with the filter built from
    /// `fragments`. Malformed items are skipped. A fault on any page yields an
    /// empty list, and that includes a store rejecting the filter: builder
    /// output binds bare attribute names, which DynamoDB refuses, so only an
    /// empty fragment list reaches the items.
    pub async fn list(&self, fragments: &[ScanFilterFragment]) -> Vec<Emote> {
        let filter = build_scan_filter(fragments);
        let logger = self.logger.with_context("list", None);

        let mut emotes = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages: u64 = 0;
        loop {
            let page = match self.store.scan_page(&filter, start_key.take()).await {
                Ok(page) => page,
                Err(err) => {
                    logger
                        .add("filter", &filter)
                        .add("pages", &pages)
                        .error_from("Scan failed", &err);
                    return Vec::new();
                }
            };
            pages += 1;

            emotes.extend(
                page.items
                    .iter()
                    .filter_map(|item| reconstruct(&logger, item)),
            );

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        logger
            .add("pages", &pages)
            .add("count", &(emotes.len() as u64))
            .debug("Listed emotes");
        emotes
    }

    /// Applies the fields set in `patch` and returns the updated emote.
    ///
    /// An empty patch reads the current emote instead. Updating an id that
    /// does not exist yields `None`.
    pub async fn update(&self, patch: EmotePatch) -> Option<Emote> {
        let logger = self
            .logger
            .with_context("update", None)
            .add("emoteId", &patch.id);

        if patch.is_empty() {
            logger.debug("Nothing to update, reading current emote");
            return self.get(&patch.id).await;
        }

        match self
            .store
            .update_item(&patch.id, patch_to_updates(&patch))
            .await
        {
            Ok(Some(item)) => reconstruct(&logger, &item),
            Ok(None) => {
                logger.error("No attributes were returned");
                None
            }
            Err(StoreError::ConditionalCheckFailed) => {
                logger.debug("No emote to update");
                None
            }
            Err(err) => {
                logger.error_from("UpdateItem failed", &err);
                None
            }
        }
    }

    /// Deletes an emote. Returns `true` when the store call succeeded, which
    /// includes deleting an id that did not exist.
    pub async fn delete(&self, id: &str) -> bool {
        let logger = self.logger.with_context("delete", None).add("emoteId", id);

        match self.store.delete_item(id).await {
            Ok(()) => {
                logger.info("Deleted emote");
                true
            }
            Err(err) => {
                logger.error_from("DeleteItem failed", &err);
                false
            }
        }
    }
}

/// Rebuilds an emote from stored attributes, logging the item when it is
/// malformed.
fn reconstruct(logger: &Logger, item: &Item) -> Option<Emote> {
    match item_to_emote(item) {
        Ok(emote) => Some(emote),
        Err(err) => {
            logger
                .add("attributes", &ItemLog(item))
                .error_from("Failed to parse emote from attributes", &err);
            None
        }
    }
}
