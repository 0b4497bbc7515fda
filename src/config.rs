//! Configuration options for the backend client

use std::time::Duration;

use crate::error::Error;

/// Name of the edge function that produces icebreakers
pub const DEFAULT_GENERATION_FUNCTION: &str = "generate-icebreaker";

/// Top-level temperature sent with every generation request
pub const DEFAULT_GENERATION_TEMPERATURE: f64 = 0.9;

/// Environment variable holding the project URL
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the anonymous API key
pub const KEY_ENV: &str = "SUPABASE_KEY";
/// Optional request timeout, in whole seconds
pub const TIMEOUT_ENV: &str = "ICEBREAKER_REQUEST_TIMEOUT_SECS";

/// Configuration options for the backend client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether to refresh an expired session before resolving the user
    pub auto_refresh_token: bool,

    /// The request timeout; `None` leaves it to the transport
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// The edge function invoked for generation
    pub generation_function: String,

    /// Temperature sent at the top level of each generation request
    pub generation_temperature: f64,

    /// Value of the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            request_timeout: None,
            db_schema: "public".to_string(),
            generation_function: DEFAULT_GENERATION_FUNCTION.to_string(),
            generation_temperature: DEFAULT_GENERATION_TEMPERATURE,
            client_info: concat!("icebreaker-assistant/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Set whether to automatically refresh the token
    pub fn with_auto_refresh_token(mut self, value: bool) -> Self {
        self.auto_refresh_token = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the generation function name
    pub fn with_generation_function(mut self, value: &str) -> Self {
        self.generation_function = value.to_string();
        self
    }

    /// Set the top-level generation temperature
    pub fn with_generation_temperature(mut self, value: f64) -> Self {
        self.generation_temperature = value;
        self
    }
}

/// Connection settings for a backend project
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// The base URL for the project
    pub url: String,
    /// The anonymous API key
    pub anon_key: String,
    /// Client options
    pub options: ClientOptions,
}

impl BackendConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::config(format!("{} must be set", key)))
        };

        let url = required(URL_ENV)?;
        url::Url::parse(&url)?;
        let anon_key = required(KEY_ENV)?;

        let mut options = ClientOptions::default();
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("invalid {}: {}", TIMEOUT_ENV, e)))?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            options,
        })
    }
}
