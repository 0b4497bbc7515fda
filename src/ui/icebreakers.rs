//! The list of generated candidates

use log::debug;

use crate::error::Error;
use crate::ui::profile_form::ProfileForm;

/// Generated candidates with a save action per item
pub struct IcebreakersSection<'a> {
    form: &'a ProfileForm,
    items: Vec<String>,
}

impl<'a> IcebreakersSection<'a> {
    pub(crate) fn new(form: &'a ProfileForm, items: Vec<String>) -> Self {
        Self { form, items }
    }

    /// The section is only shown once there is something to show
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Save the candidate at `index`; an index past the end does nothing
    pub async fn save(&self, index: usize) -> Result<(), Error> {
        match self.items.get(index) {
            Some(text) => self.form.save_icebreaker(text).await,
            None => {
                debug!("no icebreaker at index {}", index);
                Ok(())
            }
        }
    }
}
