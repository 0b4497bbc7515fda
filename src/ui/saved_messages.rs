//! The favorited icebreakers screen

use log::error;
use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::error::Error;
use crate::models::SavedMessage;
use crate::store::MessageStore;
use crate::ui::notify::{Notification, Notifier};
use crate::ui::query::QueryCache;

pub struct SavedMessagesList {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn MessageStore>,
    notifier: Arc<dyn Notifier>,
    cache: QueryCache<SavedMessage>,
}

impl SavedMessagesList {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn MessageStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            identity,
            store,
            notifier,
            cache: QueryCache::new(),
        }
    }

    pub fn messages(&self) -> Vec<SavedMessage> {
        self.cache.data()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    /// Fetch the signed-in user's messages; signed out means an empty list
    pub async fn refresh(&self) -> Result<(), Error> {
        let Some(user) = self.identity.current_user().await else {
            self.cache.set(Vec::new());
            return Ok(());
        };

        let mut messages = self.store.list_messages(&user.id).await.map_err(|e| {
            error!("Error loading saved messages: {}", e);
            e
        })?;
        messages.sort_by(SavedMessage::display_order);
        self.cache.set(messages);
        Ok(())
    }

    pub async fn delete_message(&self, id: &str) -> Result<(), Error> {
        let result = match self.identity.require_user().await {
            Ok(user) => self.store.delete_message(&user.id, id).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Error deleting message {}: {}", id, e);
            self.notifier
                .notify(Notification::error("Failed to delete message"));
            return Err(e);
        }

        self.notifier
            .notify(Notification::success("Message deleted successfully"));
        self.cache.invalidate();
        let _ = self.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::FakeBackend;
    use crate::ui::NotificationCenter;

    #[tokio::test]
    async fn lists_and_deletes_own_messages() {
        let backend = Arc::new(FakeBackend::signed_in("u1"));
        backend.seed_message("m2", "u1", "Second");
        backend.seed_message("m1", "u1", "First");
        backend.seed_message("m3", "u2", "Not mine");
        let list = SavedMessagesList::new(
            backend.clone(),
            backend.clone(),
            Arc::new(NotificationCenter::new()),
        );

        list.refresh().await.unwrap();
        let texts: Vec<_> = list.messages().into_iter().map(|m| m.message_text).collect();
        assert_eq!(texts, ["First", "Second"]);

        list.delete_message("m1").await.unwrap();
        let texts: Vec<_> = list.messages().into_iter().map(|m| m.message_text).collect();
        assert_eq!(texts, ["Second"]);
    }

    #[tokio::test]
    async fn cannot_delete_someone_elses_message() {
        let backend = Arc::new(FakeBackend::signed_in("u1"));
        backend.seed_message("m3", "u2", "Not mine");
        let notes = Arc::new(NotificationCenter::new());
        let list = SavedMessagesList::new(backend.clone(), backend.clone(), notes.clone());

        assert!(list.delete_message("m3").await.is_err());
        assert_eq!(notes.drain(), [Notification::error("Failed to delete message")]);
    }
}
