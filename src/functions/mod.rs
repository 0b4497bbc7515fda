//! Edge Functions client

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;
use crate::fetch::Fetch;

/// Client for Edge Functions
pub struct FunctionsClient {
    /// The base URL for the project
    url: String,

    /// The anonymous API key for the project
    key: String,

    /// Value of the `X-Client-Info` header
    client_info: String,

    /// HTTP client
    client: Client,
}

/// Options for invoking an edge function
#[derive(Debug, Clone)]
pub struct FunctionInvokeOptions<T> {
    /// Request body
    pub body: Option<T>,

    /// Authorization token; the anon key is used when unset
    pub authorization: Option<String>,
}

impl<T> Default for FunctionInvokeOptions<T> {
    fn default() -> Self {
        Self {
            body: None,
            authorization: None,
        }
    }
}

impl<T> FunctionInvokeOptions<T> {
    /// Create new empty invoke options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request body
    pub fn with_body(mut self, body: T) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the authorization token
    pub fn with_auth(mut self, token: &str) -> Self {
        self.authorization = Some(token.to_string());
        self
    }
}

impl FunctionsClient {
    /// Create a new FunctionsClient
    pub(crate) fn new(url: &str, key: &str, client_info: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client_info: client_info.to_string(),
            client,
        }
    }

    fn get_url(&self, function_name: &str) -> String {
        format!("{}/functions/v1/{}", self.url, function_name)
    }

    /// Invoke an edge function and parse its JSON response
    ///
    /// Every failure, transport or application, is reported as
    /// [`Error::Function`]; the function's own error payload is kept only as
    /// text.
    pub async fn invoke<T: Serialize, R: DeserializeOwned>(
        &self,
        function_name: &str,
        options: &FunctionInvokeOptions<T>,
    ) -> Result<R, Error> {
        let url = self.get_url(function_name);
        let token = options.authorization.as_deref().unwrap_or(&self.key);

        let mut fetch = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.client_info)
            .bearer_auth(token);

        if let Some(body) = &options.body {
            fetch = fetch.json(body)?;
        }

        fetch
            .execute::<R>()
            .await
            .map_err(|e| Error::function(format!("{} failed: {}", function_name, e)))
    }
}
