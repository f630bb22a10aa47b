//! AWS SDK client setup.

use aws_config::retry::RetryConfig;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use crate::config::{Stage, StoreConfig};

/// Attempts per request, including the first, before a fault is surfaced.
pub const MAX_ATTEMPTS: u32 = 3;

/// Creates a DynamoDB client with the given configuration.
///
/// The `local` stage signs requests with static dummy credentials, which is
/// all a local DynamoDB needs.
pub async fn create_client(config: &StoreConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .retry_config(RetryConfig::standard().with_max_attempts(MAX_ATTEMPTS));

    if let Some(endpoint) = &config.endpoint {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    if config.stage == Stage::Local {
        sdk_config_loader = sdk_config_loader.credentials_provider(Credentials::new(
            "local",
            "local",
            None,
            None,
            "emotes-local",
        ));
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
