use serde::Deserialize;

use crate::store::models::ArticleCreate;

/// One inbound frame on a feed connection: a new article submission.
///
/// Feed submissions skip the HTTP-side validation, as a connected author is
/// driving their own feed. An absent `id` gets a server-generated one.
#[derive(Debug, Deserialize)]
pub struct ArticleSubmission {
    pub id: Option<i64>,
    pub title: String,
    pub text: String,
    pub author_id: i64,
}

impl ArticleSubmission {
    pub fn into_create(self) -> ArticleCreate {
        ArticleCreate {
            id: self.id,
            title: self.title,
            text: self.text,
            author_id: self.author_id,
        }
    }
}
