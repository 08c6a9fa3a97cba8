//! AWS DynamoDB store implementation.
//!
//! - Cast lookups are a `Query` on the cast table with key condition
//!   `movieId = :m` and an optional `begins_with` filter expression.
//! - Movie lookups are a `GetItem` on the movie table keyed by `id`.
//!
//! Items are converted to plain JSON objects with `serde_dynamo`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{CastQuery, Config, Item, TableConfig};
use crate::query::{ExpressionValue, MOVIE_PRIMARY_KEY, QueryExpression};
use crate::storage::CastStore;

/// DynamoDB-backed store for the cast and movie tables.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    tables: TableConfig,
}

impl DynamoStore {
    /// Create a new DynamoDB store instance.
    pub fn new(client: Client, tables: TableConfig) -> Self {
        Self { client, tables }
    }

    /// Create a DynamoDB store from application configuration.
    ///
    /// Falls back to the SDK default region chain when no region is configured.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        info!(
            "DynamoDB store ready: cast_table={}, movie_table={}, region={:?}",
            config.tables.cast_table,
            config.tables.movie_table,
            sdk_config.region()
        );
        Self::new(Client::new(&sdk_config), config.tables.clone())
    }

    /// Cast table `Query` for a validated cast query.
    fn cast_request(&self, query: &CastQuery) -> QueryFluentBuilder {
        let expr = QueryExpression::for_query(query);
        debug!(
            "Query {}: key={}, filter={:?}",
            self.tables.cast_table, expr.key_condition, expr.filter
        );

        let mut request = self
            .client
            .query()
            .table_name(&self.tables.cast_table)
            .key_condition_expression(expr.key_condition)
            .set_filter_expression(expr.filter);
        for (placeholder, value) in &expr.values {
            request = request.expression_attribute_values(*placeholder, attribute_value(value));
        }
        request
    }

    /// Movie table `GetItem` by primary key.
    fn movie_request(&self, movie_id: i64) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.tables.movie_table)
            .key(MOVIE_PRIMARY_KEY, AttributeValue::N(movie_id.to_string()))
    }
}

fn attribute_value(value: &ExpressionValue) -> AttributeValue {
    match value {
        ExpressionValue::Number(n) => AttributeValue::N(n.to_string()),
        ExpressionValue::String(s) => AttributeValue::S(s.clone()),
    }
}

fn to_item(raw: HashMap<String, AttributeValue>) -> Result<Item> {
    serde_dynamo::from_item(raw).map_err(|e| AppError::store(format!("unreadable item: {e}")))
}

#[async_trait]
impl CastStore for DynamoStore {
    async fn query_cast(&self, query: &CastQuery) -> Result<Option<Vec<Item>>> {
        let output = self
            .cast_request(query)
            .send()
            .await
            .map_err(|e| AppError::store(DisplayErrorContext(e)))?;

        output
            .items
            .map(|items| items.into_iter().map(to_item).collect::<Result<Vec<_>>>())
            .transpose()
    }

    async fn get_movie(&self, movie_id: i64) -> Result<Option<Item>> {
        let output = self
            .movie_request(movie_id)
            .send()
            .await
            .map_err(|e| AppError::store(DisplayErrorContext(e)))?;

        output.item.map(to_item).transpose()
    }
}
