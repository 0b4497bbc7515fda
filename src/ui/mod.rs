//! Headless UI components
//!
//! Each component keeps its local state behind a mutex so a render loop can
//! read it while one of its async actions is waiting on the backend. Locks
//! are never held across an await.

mod app;
mod forms;
mod icebreakers;
mod notify;
mod profile_form;
mod query;
mod save_profile_dialog;
mod saved_messages;
mod saved_profiles;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, Backend, Screen};
pub use forms::{FieldView, TraitForm};
pub use icebreakers::IcebreakersSection;
pub use notify::{Notification, NotificationCenter, Notifier, Variant};
pub use profile_form::{GenerateOutcome, ProfileForm};
pub use query::QueryCache;
pub use save_profile_dialog::SaveProfileDialog;
pub use saved_messages::SavedMessagesList;
pub use saved_profiles::{BackCallback, SavedProfilesList, SelectCallback};
