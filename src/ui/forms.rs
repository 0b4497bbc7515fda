//! Trait and general-info forms

use crate::catalog::{questions_in, Category, Question};
use crate::draft::ProfileDraft;

/// One rendered input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub question: &'static Question,
    pub value: String,
}

/// The editable fields of one catalog category
///
/// The form keeps no values of its own: it renders from the parent's draft
/// and reports edits back through a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitForm {
    category: Category,
}

impl TraitForm {
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    pub fn user_traits() -> Self {
        Self::new(Category::UserTraits)
    }

    pub fn target_traits() -> Self {
        Self::new(Category::TargetTraits)
    }

    pub fn general_info() -> Self {
        Self::new(Category::GeneralInfo)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    /// The form's inputs, filled from `draft`
    pub fn fields(&self, draft: &ProfileDraft) -> Vec<FieldView> {
        questions_in(self.category)
            .map(|question| FieldView {
                question,
                value: draft.get(question.id).to_string(),
            })
            .collect()
    }

    /// Report an edit to `on_update` if the field belongs to this form
    pub fn edit<F>(&self, field_id: &str, value: &str, on_update: F) -> bool
    where
        F: FnOnce(&str, &str),
    {
        let owned = questions_in(self.category).any(|q| q.id == field_id);
        if owned {
            on_update(field_id, value);
        }
        owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_draft_values() {
        let draft: ProfileDraft = [("targetAge", "27"), ("userAge", "30")].into_iter().collect();
        let fields = TraitForm::target_traits().fields(&draft);

        assert!(fields.iter().all(|f| f.question.category == Category::TargetTraits));
        let age = fields.iter().find(|f| f.question.id == "targetAge").unwrap();
        assert_eq!(age.value, "27");
        let gender = fields.iter().find(|f| f.question.id == "targetGender").unwrap();
        assert_eq!(gender.value, "");
    }

    #[test]
    fn edit_forwards_only_own_fields() {
        let mut draft = ProfileDraft::new();
        let form = TraitForm::user_traits();

        assert!(form.edit("userAge", "33", |f, v| draft.set(f, v)));
        assert!(!form.edit("location", "beach", |f, v| draft.set(f, v)));

        assert_eq!(draft.get("userAge"), "33");
        assert_eq!(draft.get("location"), "");
    }
}
