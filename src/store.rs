//! Persistence of saved profiles and saved messages

use async_trait::async_trait;
use log::debug;

use crate::error::Error;
use crate::models::{
    NewSavedMessage, NewSavedProfile, ProfileRename, SavedMessage, SavedProfile, MESSAGES_TABLE,
    PROFILES_TABLE,
};
use crate::BackendClient;

/// Storage for named profiles
///
/// Every call takes the owner's id; implementations never infer it.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: &NewSavedProfile) -> Result<(), Error>;

    /// All profiles owned by `user_id`, in whatever order the store returns
    async fn list_profiles(&self, user_id: &str) -> Result<Vec<SavedProfile>, Error>;

    async fn rename_profile(&self, user_id: &str, id: &str, name: &str) -> Result<(), Error>;

    async fn delete_profile(&self, user_id: &str, id: &str) -> Result<(), Error>;
}

/// Storage for favorited icebreakers
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, message: &NewSavedMessage<'_>) -> Result<(), Error>;

    async fn list_messages(&self, user_id: &str) -> Result<Vec<SavedMessage>, Error>;

    async fn delete_message(&self, user_id: &str, id: &str) -> Result<(), Error>;
}

fn db_error<'a>(table: &'a str, action: &str) -> impl FnOnce(Error) -> Error + 'a {
    let action = action.to_string();
    move |e| Error::database(format!("{} on {} failed: {}", action, table, e))
}

/// A write that matched nothing was either someone else's row or already gone
fn expect_rows<T>(rows: Vec<T>, table: &str, id: &str) -> Result<(), Error> {
    if rows.is_empty() {
        return Err(Error::database(format!("no row {} in {}", id, table)));
    }
    Ok(())
}

#[async_trait]
impl ProfileStore for BackendClient {
    async fn insert_profile(&self, profile: &NewSavedProfile) -> Result<(), Error> {
        debug!("saving profile {:?} for {}", profile.profile_name, profile.user_id);
        self.from(PROFILES_TABLE)
            .await?
            .insert(profile)
            .execute_no_return()
            .await
            .map_err(db_error(PROFILES_TABLE, "insert"))
    }

    async fn list_profiles(&self, user_id: &str) -> Result<Vec<SavedProfile>, Error> {
        let mut query = self.from(PROFILES_TABLE).await?.select("*");
        query.eq("user_id", user_id);
        query
            .execute::<SavedProfile>()
            .await
            .map_err(db_error(PROFILES_TABLE, "select"))
    }

    async fn rename_profile(&self, user_id: &str, id: &str, name: &str) -> Result<(), Error> {
        let mut update = self
            .from(PROFILES_TABLE)
            .await?
            .update(ProfileRename { profile_name: name });
        update.eq("id", id).eq("user_id", user_id);

        let rows = update
            .execute::<SavedProfile>()
            .await
            .map_err(db_error(PROFILES_TABLE, "update"))?;
        expect_rows(rows, PROFILES_TABLE, id)
    }

    async fn delete_profile(&self, user_id: &str, id: &str) -> Result<(), Error> {
        let mut delete = self.from(PROFILES_TABLE).await?.delete();
        delete.eq("id", id).eq("user_id", user_id);

        let rows = delete
            .execute::<SavedProfile>()
            .await
            .map_err(db_error(PROFILES_TABLE, "delete"))?;
        expect_rows(rows, PROFILES_TABLE, id)
    }
}

#[async_trait]
impl MessageStore for BackendClient {
    async fn insert_message(&self, message: &NewSavedMessage<'_>) -> Result<(), Error> {
        debug!("saving message for {}", message.user_id);
        self.from(MESSAGES_TABLE)
            .await?
            .insert(message)
            .execute_no_return()
            .await
            .map_err(db_error(MESSAGES_TABLE, "insert"))
    }

    async fn list_messages(&self, user_id: &str) -> Result<Vec<SavedMessage>, Error> {
        let mut query = self.from(MESSAGES_TABLE).await?.select("*");
        query.eq("user_id", user_id);
        query
            .execute::<SavedMessage>()
            .await
            .map_err(db_error(MESSAGES_TABLE, "select"))
    }

    async fn delete_message(&self, user_id: &str, id: &str) -> Result<(), Error> {
        let mut delete = self.from(MESSAGES_TABLE).await?.delete();
        delete.eq("id", id).eq("user_id", user_id);

        let rows = delete
            .execute::<SavedMessage>()
            .await
            .map_err(db_error(MESSAGES_TABLE, "delete"))?;
        expect_rows(rows, MESSAGES_TABLE, id)
    }
}
