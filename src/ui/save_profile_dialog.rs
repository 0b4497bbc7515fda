//! Modal that names and saves the current profile

use log::error;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::IdentityProvider;
use crate::error::Error;
use crate::models::{NewSavedProfile, ProfileSnapshot};
use crate::store::ProfileStore;
use crate::ui::notify::{Notification, Notifier};

#[derive(Debug, Default)]
struct DialogState {
    open: bool,
    profile_name: String,
}

pub struct SaveProfileDialog {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<DialogState>,
}

impl SaveProfileDialog {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            identity,
            store,
            notifier,
            state: Mutex::new(DialogState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, DialogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    pub fn set_open(&self, open: bool) {
        self.state().open = open;
    }

    pub fn profile_name(&self) -> String {
        self.state().profile_name.clone()
    }

    pub fn set_profile_name(&self, name: &str) {
        self.state().profile_name = name.to_string();
    }

    /// Save is disabled while the name is empty
    pub fn can_save(&self) -> bool {
        !self.state().profile_name.is_empty()
    }

    /// Persist `snapshot` under the entered name
    ///
    /// Returns `Ok(false)` without doing anything while save is disabled. On
    /// success the dialog closes and the name is cleared; on failure it stays
    /// open with the name intact.
    pub async fn confirm(&self, snapshot: &ProfileSnapshot) -> Result<bool, Error> {
        let name = self.profile_name();
        if name.is_empty() {
            return Ok(false);
        }

        let user = match self.identity.require_user().await {
            Ok(user) => user,
            Err(e) => {
                self.notifier.notify(Notification::error(
                    "You must be logged in to save profiles",
                ));
                return Err(e);
            }
        };

        let record = NewSavedProfile::new(&user.id, &name, snapshot);
        if let Err(e) = self.store.insert_profile(&record).await {
            error!("Error saving profile: {}", e);
            self.notifier
                .notify(Notification::error("Failed to save profile"));
            return Err(e);
        }

        self.notifier
            .notify(Notification::success("Profile saved successfully"));
        let mut state = self.state();
        state.open = false;
        state.profile_name.clear();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::FakeBackend;
    use crate::ui::NotificationCenter;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            user_age: "30".into(),
            user_gender: "man".into(),
            target_age: "29".into(),
            target_gender: "woman".into(),
        }
    }

    fn dialog(backend: &Arc<FakeBackend>, notes: &Arc<NotificationCenter>) -> SaveProfileDialog {
        SaveProfileDialog::new(backend.clone(), backend.clone(), notes.clone())
    }

    #[tokio::test]
    async fn empty_name_is_disabled() {
        let backend = Arc::new(FakeBackend::signed_in("u1"));
        let notes = Arc::new(NotificationCenter::new());
        let dialog = dialog(&backend, &notes);
        dialog.set_open(true);

        assert!(!dialog.can_save());
        assert!(!dialog.confirm(&snapshot()).await.unwrap());
        assert_eq!(backend.store_calls(), 0);
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn success_closes_and_resets() {
        let backend = Arc::new(FakeBackend::signed_in("u1"));
        let notes = Arc::new(NotificationCenter::new());
        let dialog = dialog(&backend, &notes);
        dialog.set_open(true);
        dialog.set_profile_name("Climbing gym");

        assert!(dialog.confirm(&snapshot()).await.unwrap());

        assert!(!dialog.is_open());
        assert_eq!(dialog.profile_name(), "");
        let profiles = backend.profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].profile_name, "Climbing gym");
        assert_eq!(profiles[0].user_id, "u1");
        assert_eq!(profiles[0].target_gender.as_deref(), Some("woman"));
    }

    #[tokio::test]
    async fn signed_out_stays_open_without_writing() {
        let backend = Arc::new(FakeBackend::signed_out());
        let notes = Arc::new(NotificationCenter::new());
        let dialog = dialog(&backend, &notes);
        dialog.set_open(true);
        dialog.set_profile_name("Bar");

        let err = dialog.confirm(&snapshot()).await.unwrap_err();

        assert!(err.is_auth_required());
        assert!(dialog.is_open());
        assert_eq!(dialog.profile_name(), "Bar");
        assert_eq!(backend.store_calls(), 0);
        assert_eq!(
            notes.drain(),
            [Notification::error("You must be logged in to save profiles")]
        );
    }

    #[tokio::test]
    async fn store_failure_keeps_input() {
        let backend = Arc::new(FakeBackend::signed_in("u1"));
        let notes = Arc::new(NotificationCenter::new());
        let dialog = dialog(&backend, &notes);
        dialog.set_open(true);
        dialog.set_profile_name("Bar");
        backend.fail_store(true);

        assert!(dialog.confirm(&snapshot()).await.is_err());
        assert!(dialog.is_open());
        assert_eq!(dialog.profile_name(), "Bar");
        assert_eq!(notes.drain(), [Notification::error("Failed to save profile")]);
    }
}
