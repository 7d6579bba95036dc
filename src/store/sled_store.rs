//! Persistence layer backed by `sled`
//!
//! Authors and articles live in separate trees, keyed by their 8-byte
//! big-endian id so scans come back in id order. Values are JSON. The store
//! is cheap to clone and safe to share across tasks; sled serializes the
//! actual disk access.
//!
//! `set_article_status` is the domain event source: it is the only write
//! path that can move an article into `FINISHED`, and when it does, it
//! queues a snapshot for broadcast on the owning author's feed topic. The
//! queueing happens after the write and never blocks or fails it.

use sled::{Db, Tree};

use crate::registry::EventDispatcher;
use crate::store::StoreError;
use crate::store::models::{
    Article, ArticleCreate, ArticleStatus, ArticleUpdate, Author, AuthorCreate, AuthorUpdate,
    capitalize,
};

#[derive(Clone)]
pub struct BlogStore {
    db: Db,
    authors: Tree,
    articles: Tree,
    events: EventDispatcher,
    topic_fn: fn(i64) -> String,
}

impl BlogStore {
    /// Open or create the database at `path`. `topic_fn` maps an author id
    /// to the feed topic used when a finished article is announced.
    pub fn open(
        path: &str,
        events: EventDispatcher,
        topic_fn: fn(i64) -> String,
    ) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let authors = db.open_tree("authors")?;
        let articles = db.open_tree("articles")?;
        Ok(Self {
            db,
            authors,
            articles,
            events,
            topic_fn,
        })
    }

    fn key(id: i64) -> [u8; 8] {
        id.to_be_bytes()
    }

    pub fn create_author(&self, new: AuthorCreate) -> Result<Author, StoreError> {
        let key = Self::key(new.id);
        if self.authors.contains_key(key)? {
            return Err(StoreError::AuthorExists(new.id));
        }
        let author = Author {
            id: new.id,
            name: capitalize(&new.name),
            fullname: capitalize(&new.fullname),
        };
        self.authors.insert(key, serde_json::to_vec(&author)?)?;

        // Every new author starts with one seeded draft on their feed.
        let seed_id = self.db.generate_id()? as i64;
        let seed = Article {
            id: seed_id,
            title: "My first post".to_string(),
            text: "This is the first article on your feed.".to_string(),
            author_id: author.id,
            status: ArticleStatus::Draft,
        };
        self.articles
            .insert(Self::key(seed_id), serde_json::to_vec(&seed)?)?;

        Ok(author)
    }

    pub fn get_author(&self, id: i64) -> Result<Author, StoreError> {
        match self.authors.get(Self::key(id))? {
            Some(raw) => Ok(serde_json::from_slice(&raw)?),
            None => Err(StoreError::AuthorNotFound(id)),
        }
    }

    pub fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        let mut authors = Vec::new();
        for entry in self.authors.iter() {
            let (_, raw) = entry?;
            authors.push(serde_json::from_slice(&raw)?);
        }
        Ok(authors)
    }

    /// Update an author's names in place. Unlike creation, updates store the
    /// names as given.
    pub fn update_author(&self, id: i64, update: AuthorUpdate) -> Result<Author, StoreError> {
        let mut author = self.get_author(id)?;
        author.name = update.name;
        author.fullname = update.fullname;
        self.authors
            .insert(Self::key(id), serde_json::to_vec(&author)?)?;
        Ok(author)
    }

    /// Delete an author and every article they own.
    pub fn delete_author(&self, id: i64) -> Result<(), StoreError> {
        if self.authors.remove(Self::key(id))?.is_none() {
            return Err(StoreError::AuthorNotFound(id));
        }
        for article in self.list_articles(id)? {
            self.articles.remove(Self::key(article.id))?;
        }
        Ok(())
    }

    /// Create an article as a draft. The author is not required to exist;
    /// feed submissions arrive before any author bookkeeping.
    pub fn create_article(&self, new: ArticleCreate) -> Result<Article, StoreError> {
        let id = match new.id {
            Some(id) => id,
            None => self.db.generate_id()? as i64,
        };
        let key = Self::key(id);
        if self.articles.contains_key(key)? {
            return Err(StoreError::ArticleExists(id));
        }
        let article = Article {
            id,
            title: new.title,
            text: new.text,
            author_id: new.author_id,
            status: ArticleStatus::Draft,
        };
        self.articles.insert(key, serde_json::to_vec(&article)?)?;
        Ok(article)
    }

    pub fn get_article(&self, id: i64) -> Result<Article, StoreError> {
        match self.articles.get(Self::key(id))? {
            Some(raw) => Ok(serde_json::from_slice(&raw)?),
            None => Err(StoreError::ArticleNotFound(id)),
        }
    }

    /// All articles owned by `author_id`, in id order. An unknown author
    /// simply has no articles.
    pub fn list_articles(&self, author_id: i64) -> Result<Vec<Article>, StoreError> {
        let mut articles: Vec<Article> = Vec::new();
        for entry in self.articles.iter() {
            let (_, raw) = entry?;
            let article: Article = serde_json::from_slice(&raw)?;
            if article.author_id == author_id {
                articles.push(article);
            }
        }
        Ok(articles)
    }

    /// Update an article's content fields. Status is not client-writable and
    /// stays untouched, so this path can never trigger a feed notification.
    pub fn update_article(&self, id: i64, update: ArticleUpdate) -> Result<Article, StoreError> {
        let mut article = self.get_article(id)?;
        article.title = update.title;
        article.text = update.text;
        article.author_id = update.author_id;
        self.articles
            .insert(Self::key(id), serde_json::to_vec(&article)?)?;
        Ok(article)
    }

    pub fn delete_article(&self, id: i64) -> Result<(), StoreError> {
        if self.articles.remove(Self::key(id))?.is_none() {
            return Err(StoreError::ArticleNotFound(id));
        }
        Ok(())
    }

    /// Move an article to `status`. When this write takes the article from a
    /// non-finished state into `Finished`, and only then, a snapshot is
    /// queued for broadcast on the owning author's feed topic. Re-saving an
    /// already-finished article announces nothing.
    pub fn set_article_status(
        &self,
        id: i64,
        status: ArticleStatus,
    ) -> Result<Article, StoreError> {
        let mut article = self.get_article(id)?;
        let was_finished = article.status == ArticleStatus::Finished;
        article.status = status;
        self.articles
            .insert(Self::key(id), serde_json::to_vec(&article)?)?;

        if status == ArticleStatus::Finished && !was_finished {
            self.events
                .dispatch((self.topic_fn)(article.author_id), article.clone());
        }
        Ok(article)
    }
}

impl std::fmt::Debug for BlogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogStore").field("db", &"sled::Db").finish()
    }
}
