//! Query builders for PostgrestClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::postgrest::filter::{Filter, FilterOperator};
use crate::postgrest::types::ReturnOption;

/// Everything a table request needs besides its method and body
#[derive(Debug, Clone)]
pub struct TableContext {
    /// Full URL of the table endpoint
    pub url: String,
    /// The API key
    pub key: String,
    /// Bearer token for the request
    pub token: String,
    /// The database schema
    pub schema: String,
    /// Value of the `X-Client-Info` header
    pub client_info: String,
    /// HTTP client
    pub client: Client,
}

impl TableContext {
    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>, filters: &[Filter]) -> FetchBuilder<'a> {
        builder
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.client_info)
            .header("Accept-Profile", &self.schema)
            .header("Content-Profile", &self.schema)
            .bearer_auth(&self.token)
            .query(filters.iter().map(Filter::to_param))
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    context: TableContext,
    columns: String,
    filters: Vec<Filter>,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(context: TableContext, columns: &str) -> Self {
        Self {
            context,
            columns: columns.to_string(),
            filters: Vec::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(&mut self, column: &str, value: T) -> &mut Self {
        self.filters.push(Filter::new(column, FilterOperator::Eq, value));
        self
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        self.context
            .prepare(Fetch::get(&self.context.client, &self.context.url), &self.filters)
            .query([("select", self.columns.as_str())])
            .execute::<Vec<T>>()
            .await
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    context: TableContext,
    values: T,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(context: TableContext, values: T) -> Self {
        Self { context, values }
    }

    /// Execute the insert without returning the inserted rows
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        self.context
            .prepare(Fetch::post(&self.context.client, &self.context.url), &[])
            .header("Prefer", ReturnOption::Minimal.prefer_header())
            .json(&self.values)?
            .execute_empty()
            .await
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    context: TableContext,
    values: T,
    filters: Vec<Filter>,
}

impl<T: Serialize> UpdateBuilder<T> {
    /// Create a new UpdateBuilder
    pub fn new(context: TableContext, values: T) -> Self {
        Self {
            context,
            values,
            filters: Vec::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(&mut self, column: &str, value: V) -> &mut Self {
        self.filters.push(Filter::new(column, FilterOperator::Eq, value));
        self
    }

    /// Execute the update and return the updated rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        if self.filters.is_empty() {
            return Err(Error::database("refusing to update without a filter"));
        }

        self.context
            .prepare(Fetch::patch(&self.context.client, &self.context.url), &self.filters)
            .header("Prefer", ReturnOption::Representation.prefer_header())
            .json(&self.values)?
            .execute::<Vec<R>>()
            .await
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    context: TableContext,
    filters: Vec<Filter>,
}

impl DeleteBuilder {
    /// Create a new DeleteBuilder
    pub fn new(context: TableContext) -> Self {
        Self {
            context,
            filters: Vec::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(&mut self, column: &str, value: V) -> &mut Self {
        self.filters.push(Filter::new(column, FilterOperator::Eq, value));
        self
    }

    /// Execute the delete and return the deleted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        if self.filters.is_empty() {
            return Err(Error::database("refusing to delete without a filter"));
        }

        self.context
            .prepare(Fetch::delete(&self.context.client, &self.context.url), &self.filters)
            .header("Prefer", ReturnOption::Representation.prefer_header())
            .execute::<Vec<R>>()
            .await
    }
}
