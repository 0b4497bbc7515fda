//! Authentication and session handling

mod session;
mod types;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

pub use session::*;
pub use types::*;

/// Resolves the identity of the signed-in user
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current user, or `None` when nobody is signed in
    ///
    /// Lookup failures are not distinguished from "signed out".
    async fn current_user(&self) -> Option<UserIdentity>;

    /// The current user, or [`Error::AuthRequired`]
    async fn require_user(&self) -> Result<UserIdentity, Error> {
        self.current_user().await.ok_or(Error::AuthRequired)
    }
}

/// Client for the authentication service
pub struct Auth {
    /// The base URL for the project
    url: String,

    /// The anonymous API key for the project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    fn request<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
    }

    fn session_slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_tokens(&self, response: TokenResponse) -> Result<Session, Error> {
        let session = Session::from_tokens(&response.access_token, &response.refresh_token)?;
        *self.session_slot() = Some(session.clone());
        Ok(session)
    }

    /// Sign up a new user with email and password
    ///
    /// Returns the new session, or `None` when the project requires email
    /// confirmation before the first sign-in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, Error> {
        let url = self.get_auth_url("/signup");

        let body = json!({ "email": email, "password": password });
        let value = self
            .request(Fetch::post(&self.client, &url))
            .json(&body)?
            .execute::<serde_json::Value>()
            .await?;

        if value.get("access_token").is_none() {
            debug!("sign up for {} is awaiting confirmation", email);
            return Ok(None);
        }

        let response: TokenResponse = serde_json::from_value(value)?;
        self.store_tokens(response).map(Some)
    }

    /// Sign in a user with email and password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.get_auth_url("/token");

        let body = json!({ "email": email, "password": password });
        let response = self
            .request(Fetch::post(&self.client, &url))
            .query([("grant_type", "password")])
            .json(&body)?
            .execute::<TokenResponse>()
            .await
            .map_err(|e| Error::auth(format!("sign in failed: {}", e)))?;

        if let Some(user) = &response.user {
            debug!("signed in as {}", user.id);
        }
        self.store_tokens(response)
    }

    /// Exchange the stored refresh token for a new session
    pub async fn refresh_session(&self) -> Result<Session, Error> {
        let refresh_token = match self.get_session() {
            Some(session) => session.refresh_token,
            None => return Err(Error::auth("Not logged in")),
        };

        let url = self.get_auth_url("/token");
        let response = self
            .request(Fetch::post(&self.client, &url))
            .query([("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))?
            .execute::<TokenResponse>()
            .await?;

        self.store_tokens(response)
    }

    /// Sign out the current user
    pub async fn sign_out(&self) -> Result<(), Error> {
        let token = match self.get_session() {
            Some(session) => session.access_token,
            None => return Err(Error::auth("Not logged in")),
        };

        let url = self.get_auth_url("/logout");
        self.request(Fetch::post(&self.client, &url))
            .bearer_auth(&token)
            .execute_empty()
            .await?;

        *self.session_slot() = None;
        Ok(())
    }

    /// Get the user data for the currently authenticated user
    pub async fn get_user(&self) -> Result<User, Error> {
        let token = match self.get_session() {
            Some(session) => session.access_token,
            None => return Err(Error::auth("Not logged in")),
        };

        let url = self.get_auth_url("/user");
        self.request(Fetch::get(&self.client, &url))
            .bearer_auth(&token)
            .execute::<User>()
            .await
    }

    /// Get the current session
    pub fn get_session(&self) -> Option<Session> {
        self.session_slot().clone()
    }

    /// Set the session
    pub fn set_session(&self, session: Session) {
        *self.session_slot() = Some(session);
    }

    /// The stored session, refreshed first if it has expired and auto
    /// refresh is on
    async fn fresh_session(&self) -> Result<Option<Session>, Error> {
        let session = match self.get_session() {
            Some(session) => session,
            None => return Ok(None),
        };

        if !session.is_expired() || !self.options.auto_refresh_token {
            return Ok(Some(session));
        }

        debug!("access token expired, refreshing session");
        self.refresh_session().await.map(Some)
    }

    /// The token to authorize data and function requests with: the user's
    /// access token when signed in, else the anonymous key
    pub async fn access_token(&self) -> Result<String, Error> {
        match self.fresh_session().await? {
            Some(session) => Ok(session.access_token),
            None => Ok(self.key.clone()),
        }
    }
}

#[async_trait]
impl IdentityProvider for Auth {
    async fn current_user(&self) -> Option<UserIdentity> {
        let session = match self.fresh_session().await {
            Ok(session) => session?,
            Err(e) => {
                warn!("failed to refresh expired session: {}", e);
                return None;
            }
        };

        if session.is_expired() {
            debug!("session expired and auto refresh is off");
            return None;
        }

        match self.get_user().await {
            Ok(user) => Some(user.into()),
            Err(e) => {
                warn!("treating failed user lookup as signed out: {}", e);
                None
            }
        }
    }
}
