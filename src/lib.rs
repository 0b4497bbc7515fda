//! Icebreaker Assistant
//!
//! A headless client for a dating assistant: trait forms about the user and
//! the person they want to approach feed a remote generation function that
//! returns conversation openers, and the user can keep named profiles and
//! favorite openers in a hosted backend.
//!
//! The backend is a Supabase project: authentication, two PostgREST tables
//! (`user_profiles`, `saved_messages`) and one edge function
//! (`generate-icebreaker`). [`BackendClient`] talks to all three; the
//! components under [`ui`] only see it through the traits in [`auth`],
//! [`store`] and [`generation`].

pub mod auth;
pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod fetch;
pub mod functions;
pub mod generation;
pub mod models;
pub mod postgrest;
pub mod store;
pub mod ui;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::auth::{Auth, IdentityProvider, UserIdentity};
use crate::config::{BackendConfig, ClientOptions};
use crate::error::Error;
use crate::functions::{FunctionInvokeOptions, FunctionsClient};
use crate::generation::{GenerationRequest, GenerationResponse, IcebreakerGenerator};
use crate::postgrest::PostgrestClient;

/// The main entry point for talking to the backend
pub struct BackendClient {
    /// The base URL for the project
    pub url: String,
    /// The anonymous API key for the project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client holding the current session
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl BackendClient {
    /// Create a new client with default options
    ///
    /// # Example
    ///
    /// ```
    /// use icebreaker_assistant::BackendClient;
    ///
    /// let backend = BackendClient::new("https://your-project.supabase.co", "your-anon-key");
    /// ```
    pub fn new(url: &str, key: &str) -> Self {
        Self::with_http_client(url, key, Client::new(), ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// Fails when the URL does not parse or the HTTP client cannot be built.
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Result<Self, Error> {
        url::Url::parse(url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self::with_http_client(url, key, http_client, options))
    }

    /// Create a client from a loaded [`BackendConfig`]
    pub fn from_config(config: BackendConfig) -> Result<Self, Error> {
        Self::new_with_options(&config.url, &config.anon_key, config.options)
    }

    /// Create a client from `SUPABASE_URL` / `SUPABASE_KEY`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(BackendConfig::from_env()?)
    }

    fn with_http_client(url: &str, key: &str, http_client: Client, options: ClientOptions) -> Self {
        let url = url.trim_end_matches('/');
        let auth = Auth::new(url, key, http_client.clone(), options.clone());

        Self {
            url: url.to_string(),
            key: key.to_string(),
            http_client,
            auth,
            options,
        }
    }

    /// The auth client, for signing in and out
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// A table client authorized as the current session (or anonymously)
    ///
    /// An expired session is refreshed first when auto refresh is on.
    pub async fn from(&self, table: &str) -> Result<PostgrestClient, Error> {
        let token = self.auth.access_token().await?;
        Ok(PostgrestClient::new(
            &self.url,
            &self.key,
            table,
            self.http_client.clone(),
            &self.options.db_schema,
            &self.options.client_info,
        )
        .with_auth(&token))
    }

    /// The edge functions client
    pub fn functions(&self) -> FunctionsClient {
        FunctionsClient::new(
            &self.url,
            &self.key,
            &self.options.client_info,
            self.http_client.clone(),
        )
    }
}

#[async_trait]
impl IdentityProvider for BackendClient {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.auth.current_user().await
    }
}

#[async_trait]
impl IcebreakerGenerator for BackendClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        debug!(
            "generating icebreakers from {} answers",
            request.answers.len()
        );

        let function = &self.options.generation_function;
        let token = self
            .auth
            .access_token()
            .await
            .map_err(|e| Error::function(format!("{} failed: {}", function, e)))?;
        let options = FunctionInvokeOptions::new()
            .with_body(request)
            .with_auth(&token);

        let response: GenerationResponse = self
            .functions()
            .invoke(function, &options)
            .await?;

        Ok(response.icebreakers)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{IdentityProvider, UserIdentity};
    pub use crate::catalog::{find_question, Category, Question};
    pub use crate::config::{BackendConfig, ClientOptions};
    pub use crate::draft::ProfileDraft;
    pub use crate::error::{Error, ErrorKind};
    pub use crate::generation::IcebreakerGenerator;
    pub use crate::store::{MessageStore, ProfileStore};
    pub use crate::ui::{
        App, IcebreakersSection, Notification, NotificationCenter, Notifier, ProfileForm,
        SaveProfileDialog, SavedMessagesList, SavedProfilesList, Screen, TraitForm,
    };
    pub use crate::BackendClient;
}
