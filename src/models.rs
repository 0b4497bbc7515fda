//! Records persisted in the data store

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// Table holding named profiles
pub const PROFILES_TABLE: &str = "user_profiles";

/// Table holding favorited icebreakers
pub const MESSAGES_TABLE: &str = "saved_messages";

/// Row ids may be uuids or bigints depending on the table definition
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid row id: {}", other))),
    }
}

/// Accepts `timestamptz` values and offset-less `timestamp` values (read as UTC)
fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    if let Ok(value) = raw.parse::<DateTime<Utc>>() {
        return Ok(Some(value));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
}

/// Ties break on id; bigint ids compare as numbers
fn id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// A named profile as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub user_id: String,
    pub profile_name: String,
    #[serde(default)]
    pub user_age: Option<String>,
    #[serde(default)]
    pub user_gender: Option<String>,
    #[serde(default)]
    pub target_age: Option<String>,
    #[serde(default)]
    pub target_gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedProfile {
    /// Display order: creation time ascending, undated rows first, ties by id
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| id_order(&a.id, &b.id))
    }
}

/// The scalar fields of a profile that get persisted with its name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub user_age: String,
    pub user_gender: String,
    pub target_age: String,
    pub target_gender: String,
}

/// Insert payload for [`PROFILES_TABLE`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedProfile {
    pub user_id: String,
    pub profile_name: String,
    pub user_age: String,
    pub user_gender: String,
    pub target_age: String,
    pub target_gender: String,
}

impl NewSavedProfile {
    /// Stamp a snapshot with its owner and name
    pub fn new(user_id: &str, profile_name: &str, snapshot: &ProfileSnapshot) -> Self {
        Self {
            user_id: user_id.to_string(),
            profile_name: profile_name.to_string(),
            user_age: snapshot.user_age.clone(),
            user_gender: snapshot.user_gender.clone(),
            target_age: snapshot.target_age.clone(),
            target_gender: snapshot.target_gender.clone(),
        }
    }
}

/// Partial update renaming a profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRename<'a> {
    pub profile_name: &'a str,
}

/// A favorited icebreaker as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMessage {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub user_id: String,
    pub message_text: String,
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedMessage {
    /// Display order: creation time ascending, undated rows first, ties by id
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| id_order(&a.id, &b.id))
    }
}

/// Insert payload for [`MESSAGES_TABLE`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedMessage<'a> {
    pub user_id: &'a str,
    pub message_text: &'a str,
}
