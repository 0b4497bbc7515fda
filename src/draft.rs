//! The in-progress profile being edited

use std::collections::BTreeMap;

use crate::models::{ProfileSnapshot, SavedProfile};

/// Draft field ids for the values persisted with a saved profile
pub const USER_AGE: &str = "userAge";
pub const USER_GENDER: &str = "userGender";
pub const TARGET_AGE: &str = "targetAge";
pub const TARGET_GENDER: &str = "targetGender";

/// Field id to current value, for the active session only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    values: BTreeMap<String, String>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing its previous value
    pub fn set(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    /// The current value of a field, empty when never set
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Fields whose trimmed value is not empty, in id order
    pub fn filled(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// The scalar fields persisted by "save profile"
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            user_age: self.get(USER_AGE).to_string(),
            user_gender: self.get(USER_GENDER).to_string(),
            target_age: self.get(TARGET_AGE).to_string(),
            target_gender: self.get(TARGET_GENDER).to_string(),
        }
    }

    /// Load a saved profile's scalar fields, leaving other fields untouched
    pub fn apply_saved(&mut self, profile: &SavedProfile) {
        let fields = [
            (USER_AGE, &profile.user_age),
            (USER_GENDER, &profile.user_gender),
            (TARGET_AGE, &profile.target_age),
            (TARGET_GENDER, &profile.target_gender),
        ];
        for (field, value) in fields {
            self.set(field, value.as_deref().unwrap_or(""));
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileDraft {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_skips_blank_values() {
        let draft: ProfileDraft = [
            ("userAge", "29"),
            ("userGender", "   "),
            ("targetAge", ""),
            ("location", " a bookshop "),
        ]
        .into_iter()
        .collect();

        let filled: Vec<_> = draft.filled().collect();
        assert_eq!(filled, [("location", " a bookshop "), ("userAge", "29")]);
    }

    #[test]
    fn snapshot_and_apply_saved() {
        let mut draft = ProfileDraft::new();
        draft.set(USER_AGE, "31");
        draft.set("location", "park");
        assert_eq!(
            draft.snapshot(),
            ProfileSnapshot {
                user_age: "31".into(),
                ..Default::default()
            }
        );

        draft.apply_saved(&SavedProfile {
            id: "p1".into(),
            user_id: "u1".into(),
            profile_name: "Gym".into(),
            user_age: Some("32".into()),
            user_gender: Some("man".into()),
            target_age: None,
            target_gender: Some("woman".into()),
            created_at: None,
        });

        assert_eq!(draft.get(USER_AGE), "32");
        assert_eq!(draft.get(USER_GENDER), "man");
        assert_eq!(draft.get(TARGET_AGE), "");
        assert_eq!(draft.get(TARGET_GENDER), "woman");
        assert_eq!(draft.get("location"), "park");
    }
}
