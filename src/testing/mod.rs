//! In-memory `Store` for unit tests of the validation layer and handlers.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::database::manager::DatabaseError;
use crate::database::models::{Article, Comment, NewComment, TableInfo, Topic, User};
use crate::database::query_builder::SqlValue;
use crate::database::schema::{ColumnDef, Table};
use crate::database::seed::Fixtures;
use crate::database::store::Store;
use crate::query::{ArticleQuery, SortColumn, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Every call fails as if the database were unreachable
    Failing,
    /// `list_topics` panics
    Panicking,
}

#[derive(Debug, Clone)]
struct ArticleRow {
    article_id: i32,
    title: String,
    topic: String,
    author: String,
    body: String,
    created_at: NaiveDateTime,
    votes: i32,
}

#[derive(Default)]
struct Data {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<ArticleRow>,
    comments: Vec<Comment>,
}

pub struct MemoryStore {
    data: Mutex<Data>,
    mode: Mode,
    exists_calls: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Loaded with the same fixtures the seed command uses for test databases
    pub fn seeded() -> Self {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/test-data");
        let fixtures = Fixtures::load(&dir).expect("bundled test fixtures");
        Self::from_fixtures(&fixtures, Mode::Normal)
    }

    pub fn with_mode(mode: Mode) -> Self {
        let mut store = Self::seeded();
        store.mode = mode;
        store
    }

    pub fn from_fixtures(fixtures: &Fixtures, mode: Mode) -> Self {
        let topics = fixtures
            .topics
            .iter()
            .map(|t| Topic { slug: t.slug.clone(), description: t.description.clone() })
            .collect();
        let users = fixtures
            .users
            .iter()
            .map(|u| User { username: u.username.clone(), name: u.name.clone(), avatar_url: u.avatar_url.clone() })
            .collect();
        let articles = fixtures
            .articles
            .iter()
            .zip(1..)
            .map(|(a, id)| ArticleRow {
                article_id: id,
                title: a.title.clone(),
                topic: a.topic.clone(),
                author: a.author.clone(),
                body: a.body.clone(),
                created_at: a.created_at,
                votes: a.votes,
            })
            .collect();
        let comments = fixtures
            .comments
            .iter()
            .zip(1..)
            .map(|(c, id)| Comment {
                comment_id: id,
                article_id: c.article_id,
                author: c.author.clone(),
                body: c.body.clone(),
                votes: c.votes,
                created_at: c.created_at,
            })
            .collect();

        Self {
            data: Mutex::new(Data { topics, users, articles, comments }),
            mode,
            exists_calls: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `row_exists` probes issued so far
    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of successful inserts and updates so far
    pub fn writes(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    pub fn comment_count(&self) -> usize {
        self.data.lock().unwrap().comments.len()
    }

    fn check(&self) -> Result<(), DatabaseError> {
        match self.mode {
            Mode::Failing => Err(DatabaseError::QueryError("store offline".to_string())),
            _ => Ok(()),
        }
    }
}

impl Data {
    fn to_article(&self, row: &ArticleRow) -> Article {
        let comment_count = self.comments.iter().filter(|c| c.article_id == row.article_id).count() as i64;
        Article {
            article_id: row.article_id,
            title: row.title.clone(),
            topic: row.topic.clone(),
            author: row.author.clone(),
            body: row.body.clone(),
            created_at: row.created_at,
            votes: row.votes,
            comment_count,
        }
    }
}

fn compare(a: &ArticleRow, b: &ArticleRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Topic => a.topic.cmp(&b.topic),
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Votes => a.votes.cmp(&b.votes),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_tables(&self) -> Result<Vec<TableInfo>, DatabaseError> {
        self.check()?;
        let mut tables: Vec<TableInfo> = Table::ALL
            .iter()
            .map(|t| TableInfo { schemaname: "public".to_string(), tablename: t.name().to_string() })
            .collect();
        tables.sort_by(|a, b| a.tablename.cmp(&b.tablename));
        Ok(tables)
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, DatabaseError> {
        self.check()?;
        if self.mode == Mode::Panicking {
            panic!("topics exploded");
        }
        Ok(self.data.lock().unwrap().topics.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.check()?;
        Ok(self.data.lock().unwrap().users.clone())
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, DatabaseError> {
        self.check()?;
        let data = self.data.lock().unwrap();
        let mut rows: Vec<&ArticleRow> = data
            .articles
            .iter()
            .filter(|a| query.topic.as_ref().map_or(true, |t| &a.topic == t))
            .collect();
        rows.sort_by(|a, b| {
            let primary = match query.order {
                SortDirection::Asc => compare(a, b, query.sort_by),
                SortDirection::Desc => compare(b, a, query.sort_by),
            };
            primary.then(a.article_id.cmp(&b.article_id))
        });
        Ok(rows.into_iter().map(|r| data.to_article(r)).collect())
    }

    async fn find_article(&self, article_id: i32) -> Result<Option<Article>, DatabaseError> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|r| data.to_article(r)))
    }

    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, DatabaseError> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let Some(row) = data.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(None);
        };
        // Postgres rejects an INT overflow; mirror that as a store error
        row.votes = row
            .votes
            .checked_add(delta)
            .ok_or_else(|| DatabaseError::QueryError("integer out of range".to_string()))?;
        let row = row.clone();
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(Some(data.to_article(&row)))
    }

    async fn list_comments(&self, article_id: i32) -> Result<Vec<Comment>, DatabaseError> {
        self.check()?;
        let mut comments: Vec<Comment> = self
            .data
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.comment_id.cmp(&a.comment_id)));
        Ok(comments)
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DatabaseError> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let comment_id = data.comments.iter().map(|c| c.comment_id).max().unwrap_or(0) + 1;
        let inserted = Comment {
            comment_id,
            article_id: comment.article_id,
            author: comment.author.clone(),
            body: comment.body.clone(),
            votes: 0,
            created_at: Utc::now().naive_utc(),
        };
        data.comments.push(inserted.clone());
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(inserted)
    }

    async fn row_exists(&self, table: Table, column: &'static ColumnDef, value: &SqlValue) -> Result<bool, DatabaseError> {
        self.check()?;
        self.exists_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let data = self.data.lock().unwrap();
        let found = match (table, column.name, value) {
            (Table::Articles, "article_id", SqlValue::Int(id)) => data.articles.iter().any(|a| a.article_id == *id),
            (Table::Comments, "comment_id", SqlValue::Int(id)) => data.comments.iter().any(|c| c.comment_id == *id),
            (Table::Users, "username", SqlValue::Text(name)) => data.users.iter().any(|u| &u.username == name),
            (Table::Topics, "slug", SqlValue::Text(slug)) => data.topics.iter().any(|t| &t.slug == slug),
            _ => {
                return Err(DatabaseError::QueryError(format!(
                    "memory store cannot probe {}.{}",
                    table, column.name
                )))
            }
        };
        Ok(found)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }

    async fn close(&self) {}
}
