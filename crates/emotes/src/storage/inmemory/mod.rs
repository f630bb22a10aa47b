//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of [`EmoteStore`] that
//! keeps items in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Scans walk the
//! map in id order, so pagination is deterministic. Scan filters are checked
//! the way DynamoDB checks them, so a filter DynamoDB would reject faults here
//! too. Faults can also be injected per operation to exercise failure paths.
//!
//! # Example
//!
//! ```
//! use emotes::storage::inmemory::{InMemoryStore, StoreOperation};
//!
//! let store = InMemoryStore::new()
//!     .with_page_size(2)
//!     .with_fault(StoreOperation::Delete);
//! ```
//!
//! [`EmoteStore`]: super::EmoteStore

mod evaluate;
mod store;

pub use store::{InMemoryStore, StoreOperation};
