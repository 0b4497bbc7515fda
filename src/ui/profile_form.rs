//! The profile form: generation and saving of icebreakers

use log::{debug, error};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::IdentityProvider;
use crate::config::DEFAULT_GENERATION_TEMPERATURE;
use crate::draft::ProfileDraft;
use crate::error::Error;
use crate::generation::{parse_icebreakers, GenerationRequest, IcebreakerGenerator};
use crate::models::NewSavedMessage;
use crate::store::MessageStore;
use crate::ui::icebreakers::IcebreakersSection;
use crate::ui::notify::{Notification, Notifier};

#[derive(Debug, Default)]
struct FormState {
    icebreakers: Vec<String>,
    is_loading: bool,
    is_first_time: bool,
}

/// What a generate trigger did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A response arrived and replaced the candidates
    Generated(usize),
    /// A generation was already in flight; nothing was sent
    AlreadyRunning,
}

/// Clears the loading flag however the generate future ends
struct LoadingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_loading = false;
    }
}

/// Orchestrates generation from a draft owned by the parent
pub struct ProfileForm {
    identity: Arc<dyn IdentityProvider>,
    generator: Arc<dyn IcebreakerGenerator>,
    messages: Arc<dyn MessageStore>,
    notifier: Arc<dyn Notifier>,
    temperature: f64,
    state: Mutex<FormState>,
}

impl ProfileForm {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        generator: Arc<dyn IcebreakerGenerator>,
        messages: Arc<dyn MessageStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            identity,
            generator,
            messages,
            notifier,
            temperature: DEFAULT_GENERATION_TEMPERATURE,
            state: Mutex::new(FormState::default()),
        }
    }

    /// Override the top-level temperature sent with each request
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn icebreakers(&self) -> Vec<String> {
        self.state().icebreakers.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Whether the generate button is enabled
    pub fn can_generate(&self) -> bool {
        !self.is_loading()
    }

    pub fn generate_label(&self) -> &'static str {
        if self.is_loading() {
            "Generating..."
        } else {
            "Generate Ice Breakers"
        }
    }

    pub fn is_first_time(&self) -> bool {
        self.state().is_first_time
    }

    /// The "first time approaching this person?" checkbox
    pub fn set_first_time(&self, value: bool) {
        self.state().is_first_time = value;
    }

    /// The candidate list with its per-item save action
    pub fn icebreakers_section(&self) -> IcebreakersSection<'_> {
        IcebreakersSection::new(self, self.icebreakers())
    }

    /// Generate icebreakers from the filled fields of `draft`
    ///
    /// A trigger while a generation is in flight does nothing. On failure the
    /// previous candidates stay and an error is shown.
    pub async fn generate_icebreakers(&self, draft: &ProfileDraft) -> Result<GenerateOutcome, Error> {
        let is_first_time = {
            let mut state = self.state();
            if state.is_loading {
                debug!("generation already in flight");
                return Ok(GenerateOutcome::AlreadyRunning);
            }
            state.is_loading = true;
            state.is_first_time
        };
        let _loading = LoadingGuard { state: &self.state };

        let request = GenerationRequest::from_draft(draft, is_first_time, self.temperature);

        match self.generator.generate(&request).await {
            Ok(text) => {
                let icebreakers = parse_icebreakers(&text);
                let count = icebreakers.len();
                self.state().icebreakers = icebreakers;
                Ok(GenerateOutcome::Generated(count))
            }
            Err(e) => {
                error!("Error generating icebreakers: {}", e);
                self.notifier.notify(Notification::error(
                    "Failed to generate icebreakers. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// Save one candidate to the user's favorites
    ///
    /// Saving the same text twice stores it twice.
    pub async fn save_icebreaker(&self, text: &str) -> Result<(), Error> {
        let result = match self.identity.require_user().await {
            Ok(user) => {
                self.messages
                    .insert_message(&NewSavedMessage {
                        user_id: &user.id,
                        message_text: text,
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Icebreaker saved successfully")),
            Err(e) => {
                error!("Error saving icebreaker: {}", e);
                self.notifier
                    .notify(Notification::error("Failed to save icebreaker"));
            }
        }
        result
    }
}
