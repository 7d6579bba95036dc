//! The `store` module is the persistence layer for authors and articles.
//!
//! It uses `sled` as an embedded key-value store, one tree per record type
//! with JSON-encoded values. The store is also the domain event source for
//! the real-time feed: its status write path detects the transition to
//! `FINISHED` and hands a snapshot of the article to the dispatch queue
//! after the write has committed.

pub mod models;
pub mod sled_store;

pub use models::{Article, ArticleStatus, Author};
pub use sled_store::BlogStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("author {0} not found")]
    AuthorNotFound(i64),
    #[error("article {0} not found")]
    ArticleNotFound(i64),
    #[error("author {0} already exists")]
    AuthorExists(i64),
    #[error("article {0} already exists")]
    ArticleExists(i64),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
    #[error("storage error: {0}")]
    Db(#[from] sled::Error),
    #[error("corrupt record: {0}")]
    Codec(#[from] serde_json::Error),
}
