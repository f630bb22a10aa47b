//! DynamoDB store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use crate::config::StoreConfig;
use crate::storage::{EmoteStore, Item, Result, ScanFilter, ScanPage, ID_ATTRIBUTE};

use super::client::create_client;
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};

/// DynamoDB-backed emote store keyed by `id`.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from the store configuration.
    pub async fn from_config(config: &StoreConfig) -> Self {
        let client = create_client(config).await;
        Self::new(client, config.table_name.clone())
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

/// A `SET` update expression with its placeholder bindings.
#[derive(Debug, PartialEq)]
struct UpdateExpression {
    expression: String,
    names: Vec<(String, String)>,
    values: Vec<(String, AttributeValue)>,
}

/// Builds `SET #a = :a, #b = :b` and its bindings. Names are sorted so the
/// expression is stable.
fn update_expression(updates: Item) -> UpdateExpression {
    let mut updates: Vec<_> = updates.into_iter().collect();
    updates.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut assignments = Vec::with_capacity(updates.len());
    let mut names = Vec::with_capacity(updates.len());
    let mut values = Vec::with_capacity(updates.len());
    for (name, value) in updates {
        assignments.push(format!("#{name} = :{name}"));
        values.push((format!(":{name}"), value));
        names.push((format!("#{name}"), name));
    }

    UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    }
}

#[async_trait]
impl EmoteStore for DynamoDbStore {
    async fn put_if_absent(&self, item: Item) -> Result<Option<Item>> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.clone()))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(map_put_item_error)?;

        // PutItem can only return the old image; a successful conditional put
        // leaves exactly the written item in place.
        Ok(Some(item))
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn update_item(&self, id: &str, updates: Item) -> Result<Option<Item>> {
        let UpdateExpression {
            expression,
            names,
            values,
        } = update_expression(updates);

        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::key(id))
            .update_expression(expression)
            .condition_expression("attribute_exists(id)")
            .return_values(ReturnValue::AllNew);
        for (placeholder, name) in names {
            request = request.expression_attribute_names(placeholder, name);
        }
        for (placeholder, value) in values {
            request = request.expression_attribute_values(placeholder, value);
        }

        let result = request.send().await.map_err(map_update_item_error)?;

        Ok(result.attributes)
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn scan_page(
        &self,
        filter: &ScanFilter,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage> {
        let mut request = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key);

        if !filter.is_empty() {
            request = request
                .filter_expression(&filter.expression)
                .set_expression_attribute_names(Some(filter.attribute_names.clone()))
                .set_expression_attribute_values(Some(filter.attribute_values.clone()));
        }

        let result = request.send().await.map_err(map_scan_error)?;

        Ok(ScanPage {
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key,
        })
    }
}
