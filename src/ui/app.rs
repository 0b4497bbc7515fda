//! The app shell: owns the draft and switches between screens

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::IdentityProvider;
use crate::draft::ProfileDraft;
use crate::error::Error;
use crate::generation::IcebreakerGenerator;
use crate::models::SavedProfile;
use crate::store::{MessageStore, ProfileStore};
use crate::ui::forms::TraitForm;
use crate::ui::notify::Notifier;
use crate::ui::profile_form::{GenerateOutcome, ProfileForm};
use crate::ui::save_profile_dialog::SaveProfileDialog;
use crate::ui::saved_messages::SavedMessagesList;
use crate::ui::saved_profiles::SavedProfilesList;
use crate::BackendClient;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    SavedProfiles,
}

#[derive(Debug)]
struct Shell {
    draft: ProfileDraft,
    screen: Screen,
}

impl Shell {
    fn load(&mut self, profile: &SavedProfile) {
        self.draft.apply_saved(profile);
        self.screen = Screen::Form;
    }
}

fn lock(shell: &Mutex<Shell>) -> MutexGuard<'_, Shell> {
    shell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Anything that can stand in for the whole backend
pub trait Backend: IdentityProvider + ProfileStore + MessageStore + IcebreakerGenerator {}

impl<T: IdentityProvider + ProfileStore + MessageStore + IcebreakerGenerator> Backend for T {}

pub struct App {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    shell: Arc<Mutex<Shell>>,
    form: ProfileForm,
    dialog: SaveProfileDialog,
    messages: SavedMessagesList,
    saved_profiles: Mutex<Option<Arc<SavedProfilesList>>>,
}

impl App {
    pub fn new<B: Backend + 'static>(backend: Arc<B>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            identity: backend.clone(),
            profiles: backend.clone(),
            notifier: notifier.clone(),
            shell: Arc::new(Mutex::new(Shell {
                draft: ProfileDraft::new(),
                screen: Screen::Form,
            })),
            form: ProfileForm::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
                notifier.clone(),
            ),
            dialog: SaveProfileDialog::new(backend.clone(), backend.clone(), notifier.clone()),
            messages: SavedMessagesList::new(backend.clone(), backend, notifier),
            saved_profiles: Mutex::new(None),
        }
    }

    /// An app over a configured backend client, using its generation temperature
    pub fn for_client(client: Arc<BackendClient>, notifier: Arc<dyn Notifier>) -> Self {
        let temperature = client.options.generation_temperature;
        let mut app = Self::new(client, notifier);
        app.form = app.form.with_temperature(temperature);
        app
    }

    pub fn screen(&self) -> Screen {
        lock(&self.shell).screen
    }

    /// A copy of the current draft
    pub fn draft(&self) -> ProfileDraft {
        lock(&self.shell).draft.clone()
    }

    /// The forms shown on the form screen, in order
    pub fn trait_forms(&self) -> [TraitForm; 3] {
        [
            TraitForm::user_traits(),
            TraitForm::target_traits(),
            TraitForm::general_info(),
        ]
    }

    /// The forms' upward edit callback
    pub fn update_field(&self, field: &str, value: &str) {
        lock(&self.shell).draft.set(field, value);
    }

    /// Route an edit through `form` into the draft
    pub fn edit(&self, form: TraitForm, field: &str, value: &str) -> bool {
        form.edit(field, value, |f, v| self.update_field(f, v))
    }

    pub fn profile_form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn save_dialog(&self) -> &SaveProfileDialog {
        &self.dialog
    }

    pub fn saved_messages(&self) -> &SavedMessagesList {
        &self.messages
    }

    pub async fn generate(&self) -> Result<GenerateOutcome, Error> {
        let draft = self.draft();
        self.form.generate_icebreakers(&draft).await
    }

    pub fn open_save_dialog(&self) {
        self.dialog.set_open(true);
    }

    /// Confirm the save dialog with the draft's current values
    pub async fn save_profile(&self) -> Result<bool, Error> {
        let snapshot = self.draft().snapshot();
        self.dialog.confirm(&snapshot).await
    }

    /// Switch to the saved profiles screen, mounting a fresh list
    pub async fn open_saved_profiles(&self) -> Arc<SavedProfilesList> {
        let on_select = {
            let shell = self.shell.clone();
            Box::new(move |profile: SavedProfile| lock(&shell).load(&profile))
        };
        let on_back = {
            let shell = self.shell.clone();
            Box::new(move || lock(&shell).screen = Screen::Form)
        };

        lock(&self.shell).screen = Screen::SavedProfiles;
        let list = Arc::new(
            SavedProfilesList::mount(
                self.identity.clone(),
                self.profiles.clone(),
                self.notifier.clone(),
                on_select,
                on_back,
            )
            .await,
        );
        *self
            .saved_profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(list.clone());
        list
    }

    /// The saved profiles list, while its screen is showing
    pub fn saved_profiles(&self) -> Option<Arc<SavedProfilesList>> {
        if self.screen() != Screen::SavedProfiles {
            return None;
        }
        self.saved_profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn back_to_form(&self) {
        lock(&self.shell).screen = Screen::Form;
    }
}
