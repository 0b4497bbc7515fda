//! The saved profiles screen: list, inline rename, delete, load

use log::{debug, error};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::IdentityProvider;
use crate::error::Error;
use crate::models::SavedProfile;
use crate::store::ProfileStore;
use crate::ui::notify::{Notification, Notifier};
use crate::ui::query::QueryCache;

/// Callback receiving the profile the user picked
pub type SelectCallback = Box<dyn Fn(SavedProfile) + Send + Sync>;

/// Callback leaving the screen
pub type BackCallback = Box<dyn Fn() + Send + Sync>;

/// At most one row is editable; the buffer is separate from the row
#[derive(Debug, Default)]
struct EditState {
    editing_id: Option<String>,
    editing_name: String,
}

pub struct SavedProfilesList {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    cache: QueryCache<SavedProfile>,
    edit: Mutex<EditState>,
    on_select: SelectCallback,
    on_back: BackCallback,
}

impl SavedProfilesList {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
        on_select: SelectCallback,
        on_back: BackCallback,
    ) -> Self {
        Self {
            identity,
            store,
            notifier,
            cache: QueryCache::new(),
            edit: Mutex::new(EditState::default()),
            on_select,
            on_back,
        }
    }

    /// Create the list and run its initial fetch
    pub async fn mount(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
        on_select: SelectCallback,
        on_back: BackCallback,
    ) -> Self {
        let list = Self::new(identity, store, notifier, on_select, on_back);
        // a failed first fetch just leaves the list empty; refresh() logged it
        let _ = list.refresh().await;
        list
    }

    fn edit_state(&self) -> MutexGuard<'_, EditState> {
        self.edit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The rows as last fetched
    pub fn profiles(&self) -> Vec<SavedProfile> {
        self.cache.data()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    /// Fetch the signed-in user's profiles; signed out means an empty list
    pub async fn refresh(&self) -> Result<(), Error> {
        let user = match self.identity.current_user().await {
            Some(user) => user,
            None => {
                self.cache.set(Vec::new());
                return Ok(());
            }
        };

        match self.store.list_profiles(&user.id).await {
            Ok(mut profiles) => {
                profiles.sort_by(SavedProfile::display_order);
                debug!("loaded {} profiles", profiles.len());
                self.cache.set(profiles);
                Ok(())
            }
            Err(e) => {
                error!("Error loading profiles: {}", e);
                Err(e)
            }
        }
    }

    async fn invalidate_and_refetch(&self) {
        self.cache.invalidate();
        // the write already succeeded; a failed refetch leaves the list stale
        let _ = self.refresh().await;
    }

    pub fn editing_id(&self) -> Option<String> {
        self.edit_state().editing_id.clone()
    }

    pub fn editing_name(&self) -> String {
        self.edit_state().editing_name.clone()
    }

    /// Put `profile`'s row in edit mode with its current name in the buffer
    pub fn start_editing(&self, profile: &SavedProfile) {
        let mut edit = self.edit_state();
        edit.editing_id = Some(profile.id.clone());
        edit.editing_name = profile.profile_name.clone();
    }

    pub fn set_editing_name(&self, name: &str) {
        self.edit_state().editing_name = name.to_string();
    }

    /// Submit the edit buffer as the new name of the row being edited
    ///
    /// Returns `Ok(false)` without calling the store when no row is being
    /// edited or the trimmed buffer is empty. On failure edit mode stays
    /// open with the buffer unchanged.
    pub async fn save_profile_name(&self) -> Result<bool, Error> {
        let (id, name) = {
            let edit = self.edit_state();
            match &edit.editing_id {
                Some(id) if !edit.editing_name.trim().is_empty() => {
                    (id.clone(), edit.editing_name.trim().to_string())
                }
                _ => return Ok(false),
            }
        };

        let result = match self.identity.require_user().await {
            Ok(user) => self.store.rename_profile(&user.id, &id, &name).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Error renaming profile {}: {}", id, e);
            self.notifier
                .notify(Notification::error("Failed to update profile name"));
            return Err(e);
        }

        self.invalidate_and_refetch().await;
        self.notifier
            .notify(Notification::success("Profile name updated successfully"));

        let mut edit = self.edit_state();
        if edit.editing_id.as_deref() == Some(id.as_str()) {
            edit.editing_id = None;
        }
        Ok(true)
    }

    /// Delete a profile right away; there is no confirmation step
    pub async fn delete_profile(&self, id: &str) -> Result<(), Error> {
        let result = match self.identity.require_user().await {
            Ok(user) => self.store.delete_profile(&user.id, id).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Error deleting profile {}: {}", id, e);
            self.notifier
                .notify(Notification::error("Failed to delete profile"));
            return Err(e);
        }

        self.notifier
            .notify(Notification::success("Profile deleted successfully"));
        self.invalidate_and_refetch().await;
        Ok(())
    }

    /// Hand `profile` to the parent
    pub fn select(&self, profile: &SavedProfile) {
        (self.on_select)(profile.clone());
    }

    pub fn back(&self) {
        (self.on_back)();
    }
}
