//! Domain records and request payloads.
//!
//! `Article` doubles as the wire payload pushed to feed subscribers: the
//! snapshot serialized on broadcast is exactly this struct's field set
//! `{id, title, text, author_id, status}`. It must not grow fields the feed
//! protocol does not carry.

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Lifecycle of an article. `Finished` is the terminal state; the transition
/// into it (and only that transition) is announced on the author's feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleStatus {
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "STARTED")]
    Started,
    #[serde(rename = "FINISHED")]
    Finished,
    #[serde(rename = "FAILED")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub fullname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub author_id: i64,
    pub status: ArticleStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorCreate {
    pub id: i64,
    pub name: String,
    pub fullname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorUpdate {
    pub name: String,
    pub fullname: String,
}

/// Body of an article submission, shared by the HTTP create endpoint and the
/// feed's inbound frames. An absent `id` gets a server-generated one.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleCreate {
    pub id: Option<i64>,
    pub title: String,
    pub text: String,
    pub author_id: i64,
}

impl ArticleCreate {
    /// Minimum article body length accepted on the HTTP create path.
    pub const MIN_TEXT_LEN: usize = 20;

    /// Validate an HTTP submission. Feed submissions skip this.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Invalid {
                field: "title",
                reason: "must not be empty".to_string(),
            });
        }
        if self.text.chars().count() < Self::MIN_TEXT_LEN {
            return Err(StoreError::Invalid {
                field: "text",
                reason: format!("must be at least {} characters", Self::MIN_TEXT_LEN),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleUpdate {
    pub title: String,
    pub text: String,
    pub author_id: i64,
}

/// Derive the feed topic for an author. The registry treats the result as an
/// opaque key; this is the only place the mapping lives, and the store takes
/// it as an injected function so tests can substitute their own.
pub fn author_topic(author_id: i64) -> String {
    author_id.to_string()
}

/// First character uppercased, the rest lowercased.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
