//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of [`EmoteStore`]
//! using `aws-sdk-dynamodb`.
//!
//! [`EmoteStore`]: super::EmoteStore

mod client;
mod error;
mod store;

pub use client::{create_client, MAX_ATTEMPTS};
pub use store::DynamoDbStore;
