//! Store backends for emotes.
//!
//! The repository talks to an [`EmoteStore`], a thin seam over single-item
//! key-value operations plus paginated scans. Items are DynamoDB attribute maps
//! in every backend so conversions and filters are shared:
//!
//! - [`dynamodb`]: AWS DynamoDB via `aws-sdk-dynamodb`
//! - [`inmemory`]: a `BTreeMap` behind a lock, for tests and local runs

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use thiserror::Error;

pub mod conversions;
pub mod dynamodb;
pub mod filter;
pub mod inmemory;

pub use dynamodb::DynamoDbStore;
pub use filter::{build_scan_filter, ScanFilter};
pub use inmemory::InMemoryStore;

/// A stored item: attribute name to typed attribute value.
pub type Item = HashMap<String, AttributeValue>;

/// Name of the partition key attribute.
pub const ID_ATTRIBUTE: &str = "id";

/// One page of scan results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Key to resume from; `None` on the last page.
    pub last_evaluated_key: Option<Item>,
}

/// Errors surfaced by store backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A conditional write was rejected.
    #[error("Conditional check failed")]
    ConditionalCheckFailed,
    /// Any transport or server fault, after client-side retries.
    #[error("Store fault: {0}")]
    Fault(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Single-item operations and paginated scans over the emotes table.
#[async_trait]
pub trait EmoteStore: Send + Sync {
    /// Writes `item` unless an item with the same id exists. Returns the
    /// item's attributes after the write.
    async fn put_if_absent(&self, item: Item) -> Result<Option<Item>>;

    /// Looks up an item by id.
    async fn get_item(&self, id: &str) -> Result<Option<Item>>;

    /// Sets the given attributes on an existing item. Returns the item's
    /// attributes after the write.
    async fn update_item(&self, id: &str, updates: Item) -> Result<Option<Item>>;

    /// Deletes an item by id. Deleting a missing item is not an error.
    async fn delete_item(&self, id: &str) -> Result<()>;

    /// Fetches one page of a full-table scan, starting after
    /// `exclusive_start_key` when given.
    async fn scan_page(
        &self,
        filter: &ScanFilter,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage>;
}
