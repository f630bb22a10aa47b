//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to [`StoreError`].

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use crate::storage::StoreError;

fn fault(message: &str) -> StoreError {
    StoreError::Fault(message.to_string())
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => fault("Table not found"),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            fault("Throughput exceeded, please retry")
        }
        GetItemError::RequestLimitExceeded(_) => fault("Request limit exceeded, please retry"),
        GetItemError::InternalServerError(_) => fault("DynamoDB internal server error"),
        err => StoreError::Fault(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => fault("Table not found"),
        ScanError::ProvisionedThroughputExceededException(_) => {
            fault("Throughput exceeded, please retry")
        }
        ScanError::RequestLimitExceeded(_) => fault("Request limit exceeded, please retry"),
        ScanError::InternalServerError(_) => fault("DynamoDB internal server error"),
        err => StoreError::Fault(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        PutItemError::ResourceNotFoundException(_) => fault("Table not found"),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            fault("Throughput exceeded, please retry")
        }
        PutItemError::RequestLimitExceeded(_) => fault("Request limit exceeded, please retry"),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            fault("Item collection size limit exceeded")
        }
        PutItemError::TransactionConflictException(_) => {
            fault("Transaction conflict, please retry")
        }
        PutItemError::InternalServerError(_) => fault("DynamoDB internal server error"),
        err => StoreError::Fault(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        UpdateItemError::ResourceNotFoundException(_) => fault("Table not found"),
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            fault("Throughput exceeded, please retry")
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            fault("Request limit exceeded, please retry")
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            fault("Item collection size limit exceeded")
        }
        UpdateItemError::TransactionConflictException(_) => {
            fault("Transaction conflict, please retry")
        }
        UpdateItemError::InternalServerError(_) => fault("DynamoDB internal server error"),
        err => StoreError::Fault(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        DeleteItemError::ResourceNotFoundException(_) => fault("Table not found"),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            fault("Throughput exceeded, please retry")
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            fault("Request limit exceeded, please retry")
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            fault("Item collection size limit exceeded")
        }
        DeleteItemError::TransactionConflictException(_) => {
            fault("Transaction conflict, please retry")
        }
        DeleteItemError::InternalServerError(_) => fault("DynamoDB internal server error"),
        err => StoreError::Fault(format!("DeleteItem failed: {:?}", err)),
    }
}
