//! Building generation requests and reading icebreakers out of the response

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::catalog::find_question;
use crate::draft::ProfileDraft;
use crate::error::Error;

/// One answered field, joined with its catalog prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub value: String,
    pub prompt: String,
    pub temperature: f64,
}

/// Body sent to the generation function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub answers: BTreeMap<String, Answer>,
    pub is_first_time: bool,
    pub temperature: f64,
}

impl GenerationRequest {
    /// Join every filled draft field with its catalog question
    ///
    /// Fields with a blank value or without a catalog entry are left out.
    pub fn from_draft(draft: &ProfileDraft, is_first_time: bool, temperature: f64) -> Self {
        let answers = draft
            .filled()
            .filter_map(|(field, value)| {
                let question = find_question(field)?;
                Some((
                    field.to_string(),
                    Answer {
                        value: value.to_string(),
                        prompt: question.prompt.to_string(),
                        temperature: question.temperature,
                    },
                ))
            })
            .collect();

        Self {
            answers,
            is_first_time,
            temperature,
        }
    }
}

/// Body returned by the generation function
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub icebreakers: String,
}

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.").expect("ordinal pattern is valid"));

/// Split a numbered list ("1. ... 2. ...") into its trimmed items
///
/// Only text following an ordinal counts as an item, so a blob without any
/// ordinal yields no items.
pub fn parse_icebreakers(text: &str) -> Vec<String> {
    let mut pieces = ORDINAL.split(text);
    // text before the first ordinal is a preamble, not a candidate
    pieces.next();

    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Produces raw icebreaker text for a request
#[async_trait]
pub trait IcebreakerGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error>;
}
