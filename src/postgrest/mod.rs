//! Table operations through the PostgREST API

mod filter;
mod query;
mod types;

use reqwest::Client;
use serde::Serialize;

pub use filter::*;
pub use query::*;
pub use types::*;

/// Client for operations on one table
pub struct PostgrestClient {
    context: TableContext,
}

impl PostgrestClient {
    /// Create a new PostgrestClient
    pub(crate) fn new(
        url: &str,
        key: &str,
        table: &str,
        client: Client,
        schema: &str,
        client_info: &str,
    ) -> Self {
        Self {
            context: TableContext {
                url: format!("{}/rest/v1/{}", url, table),
                key: key.to_string(),
                token: key.to_string(),
                schema: schema.to_string(),
                client_info: client_info.to_string(),
                client,
            },
        }
    }

    /// Authorize requests with a user access token instead of the anon key
    pub fn with_auth(mut self, token: &str) -> Self {
        self.context.token = token.to_string();
        self
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(self.context.clone(), columns)
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(self.context.clone(), values)
    }

    /// Update data in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(self.context.clone(), values)
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.context.clone())
    }
}
