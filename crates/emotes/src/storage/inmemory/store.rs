//! In-memory store implementation.

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use crate::storage::conversions::get_string;
use crate::storage::{EmoteStore, Item, Result, ScanFilter, ScanPage, StoreError, ID_ATTRIBUTE};

use super::evaluate::compile;

/// Default number of items examined per scan page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Put,
    Get,
    Update,
    Delete,
    Scan,
}

/// In-memory emote store.
///
/// Items are keyed by their `id` string attribute. Like DynamoDB, a scan page
/// examines up to `page_size` items before the filter is applied, so a page
/// can come back short or empty while more pages remain.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
    page_size: usize,
    faults: HashSet<StoreOperation>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: DEFAULT_PAGE_SIZE,
            faults: HashSet::new(),
        }
    }

    /// Sets how many items a scan page examines. Clamped to at least one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seeds the store. Items without a string `id` are skipped.
    pub fn with_items(self, items: impl IntoIterator<Item = Item>) -> Self {
        let seeded: BTreeMap<_, _> = items
            .into_iter()
            .filter_map(|item| get_string(&item, ID_ATTRIBUTE).map(|id| (id, item)))
            .collect();
        Self {
            items: Arc::new(RwLock::new(seeded)),
            ..self
        }
    }

    /// Makes every call of `operation` fail with a fault.
    pub fn with_fault(mut self, operation: StoreOperation) -> Self {
        self.faults.insert(operation);
        self
    }

    fn check(&self, operation: StoreOperation) -> Result<()> {
        if self.faults.contains(&operation) {
            return Err(StoreError::Fault(format!(
                "injected fault on {operation:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EmoteStore for InMemoryStore {
    async fn put_if_absent(&self, item: Item) -> Result<Option<Item>> {
        self.check(StoreOperation::Put)?;

        let id = get_string(&item, ID_ATTRIBUTE)
            .ok_or_else(|| StoreError::Fault("Item is missing its key".to_string()))?;

        let mut items = self.items.write().await;
        if items.contains_key(&id) {
            return Err(StoreError::ConditionalCheckFailed);
        }
        items.insert(id, item.clone());
        Ok(Some(item))
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        self.check(StoreOperation::Get)?;

        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn update_item(&self, id: &str, updates: Item) -> Result<Option<Item>> {
        self.check(StoreOperation::Update)?;

        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(id) else {
            return Err(StoreError::ConditionalCheckFailed);
        };
        item.extend(updates);
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.check(StoreOperation::Delete)?;

        let mut items = self.items.write().await;
        items.remove(id);
        Ok(())
    }

    async fn scan_page(
        &self,
        filter: &ScanFilter,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage> {
        self.check(StoreOperation::Scan)?;
        let filter = compile(filter)?;

        let start = match exclusive_start_key.as_ref() {
            Some(key) => match get_string(key, ID_ATTRIBUTE) {
                Some(id) => Bound::Excluded(id),
                None => {
                    return Err(StoreError::Fault(
                        "ExclusiveStartKey is missing its key".to_string(),
                    ))
                }
            },
            None => Bound::Unbounded,
        };

        let items = self.items.read().await;
        let mut remaining = items.range((start, Bound::Unbounded));

        let mut page = Vec::new();
        let mut last_id = None;
        for (id, item) in remaining.by_ref().take(self.page_size) {
            if filter.matches(item) {
                page.push(item.clone());
            }
            last_id = Some(id.clone());
        }

        let last_evaluated_key = match (remaining.next(), last_id) {
            (Some(_), Some(id)) => Some(Item::from([(
                ID_ATTRIBUTE.to_string(),
                AttributeValue::S(id),
            )])),
            _ => None,
        };

        Ok(ScanPage {
            items: page,
            last_evaluated_key,
        })
    }
}
