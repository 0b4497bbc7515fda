//! In-memory backend for component tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::auth::{IdentityProvider, UserIdentity};
use crate::error::Error;
use crate::generation::{GenerationRequest, IcebreakerGenerator};
use crate::models::{NewSavedMessage, NewSavedProfile, SavedMessage, SavedProfile};
use crate::store::{MessageStore, ProfileStore};

/// Lets a test observe a generation in flight and decide when it finishes
#[derive(Default)]
pub(crate) struct Gate {
    started: Notify,
    released: Notify,
}

impl Gate {
    pub(crate) async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub(crate) fn release(&self) {
        self.released.notify_one();
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    user: Option<String>,
    profiles: Mutex<Vec<SavedProfile>>,
    messages: Mutex<Vec<SavedMessage>>,
    response: Mutex<Option<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    gate: Mutex<Option<Arc<Gate>>>,
    fail_store: AtomicBool,
    store_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn signed_in(user_id: &str) -> Self {
        Self {
            user: Some(user_id.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn signed_out() -> Self {
        Self::default()
    }

    pub(crate) fn respond_with(&self, response: Result<&str, &str>) {
        *self.response.lock().unwrap() =
            Some(response.map(str::to_string).map_err(str::to_string));
    }

    pub(crate) fn hold_generation(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn generation_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn profiles(&self) -> Vec<SavedProfile> {
        self.profiles.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<SavedMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn seed_profile(&self, id: &str, user_id: &str, name: &str) {
        self.profiles.lock().unwrap().push(SavedProfile {
            id: id.to_string(),
            user_id: user_id.to_string(),
            profile_name: name.to_string(),
            user_age: None,
            user_gender: None,
            target_age: None,
            target_gender: None,
            created_at: None,
        });
    }

    pub(crate) fn seed_message(&self, id: &str, user_id: &str, text: &str) {
        self.messages.lock().unwrap().push(SavedMessage {
            id: id.to_string(),
            user_id: user_id.to_string(),
            message_text: text.to_string(),
            created_at: None,
        });
    }

    fn store_call(&self) -> Result<(), Error> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(Error::database("store unavailable"));
        }
        Ok(())
    }

    fn new_id(&self) -> String {
        format!("gen-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl IdentityProvider for FakeBackend {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.user.as_ref().map(|id| UserIdentity {
            id: id.clone(),
            email: None,
        })
    }
}

#[async_trait]
impl IcebreakerGenerator for FakeBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.released.notified().await;
        }

        let response = self.response.lock().unwrap().clone();
        match response {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(Error::function(message)),
            None => Err(Error::function("no response configured")),
        }
    }
}

#[async_trait]
impl ProfileStore for FakeBackend {
    async fn insert_profile(&self, profile: &NewSavedProfile) -> Result<(), Error> {
        self.store_call()?;
        let id = self.new_id();
        self.profiles.lock().unwrap().push(SavedProfile {
            id,
            user_id: profile.user_id.clone(),
            profile_name: profile.profile_name.clone(),
            user_age: Some(profile.user_age.clone()),
            user_gender: Some(profile.user_gender.clone()),
            target_age: Some(profile.target_age.clone()),
            target_gender: Some(profile.target_gender.clone()),
            created_at: None,
        });
        Ok(())
    }

    async fn list_profiles(&self, user_id: &str) -> Result<Vec<SavedProfile>, Error> {
        self.store_call()?;
        Ok(self
            .profiles()
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect())
    }

    async fn rename_profile(&self, user_id: &str, id: &str, name: &str) -> Result<(), Error> {
        self.store_call()?;
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
            .ok_or_else(|| Error::database("no such profile"))?;
        profile.profile_name = name.to_string();
        Ok(())
    }

    async fn delete_profile(&self, user_id: &str, id: &str) -> Result<(), Error> {
        self.store_call()?;
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| !(p.id == id && p.user_id == user_id));
        if profiles.len() == before {
            return Err(Error::database("no such profile"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for FakeBackend {
    async fn insert_message(&self, message: &NewSavedMessage<'_>) -> Result<(), Error> {
        self.store_call()?;
        let id = self.new_id();
        self.messages.lock().unwrap().push(SavedMessage {
            id,
            user_id: message.user_id.to_string(),
            message_text: message.message_text.to_string(),
            created_at: None,
        });
        Ok(())
    }

    async fn list_messages(&self, user_id: &str) -> Result<Vec<SavedMessage>, Error> {
        self.store_call()?;
        Ok(self
            .messages()
            .into_iter()
            .filter(|m| m.user_id == user_id)
            .collect())
    }

    async fn delete_message(&self, user_id: &str, id: &str) -> Result<(), Error> {
        self.store_call()?;
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| !(m.id == id && m.user_id == user_id));
        if messages.len() == before {
            return Err(Error::database("no such message"));
        }
        Ok(())
    }
}
