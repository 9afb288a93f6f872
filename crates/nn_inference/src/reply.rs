//! Typed parsing of free-form model replies.
//!
//! Models wrap their answer in prose, so the first bracketed array is located
//! with a pattern match and then deserialized into a concrete shape. Anything
//! that does not fit the shape is an error for the caller to degrade on.

use nn_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Number;

static INDEX_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\d,\s]+\]").expect("Invalid index array regex"));

// Greedy and dot-matches-newline: topic lists are often pretty-printed.
static STRING_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("Invalid string array regex"));

/// Zero-based article indices, most relevant first.
///
/// Kept as raw JSON numbers so that one oversized entry does not sink the
/// whole reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RankingReply(pub Vec<Number>);

impl RankingReply {
    /// Entries that fit a `usize`, in reply order. Larger numbers can never be
    /// in range and are left out.
    pub fn indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(Number::as_u64)
            .filter_map(|i| usize::try_from(i).ok())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TopicReply(pub Vec<String>);

pub fn parse_ranking_reply(text: &str) -> Result<RankingReply> {
    let array = INDEX_ARRAY
        .find(text)
        .ok_or_else(|| Error::Inference("No index array found in model reply".to_string()))?;
    Ok(serde_json::from_str(array.as_str())?)
}

pub fn parse_topic_reply(text: &str) -> Result<TopicReply> {
    let array = STRING_ARRAY
        .find(text)
        .ok_or_else(|| Error::Inference("No topic array found in model reply".to_string()))?;
    Ok(serde_json::from_str(array.as_str())?)
}
