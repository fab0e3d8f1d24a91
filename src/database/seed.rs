//! Fixture loading for development and test databases.
//!
//! Drops and recreates the four tables, then bulk-inserts JSON fixtures.
//! Articles get serial ids in file order, which is what `comments.json`
//! refers to with `article_id`.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

const DROP_TABLES: &str = "DROP TABLE IF EXISTS comments, articles, users, topics";

const CREATE_TABLES: [&str; 4] = [
    "CREATE TABLE topics (
        slug VARCHAR PRIMARY KEY,
        description VARCHAR NOT NULL
    )",
    "CREATE TABLE users (
        username VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        avatar_url VARCHAR NOT NULL
    )",
    "CREATE TABLE articles (
        article_id SERIAL PRIMARY KEY,
        title VARCHAR NOT NULL,
        topic VARCHAR NOT NULL REFERENCES topics(slug),
        author VARCHAR NOT NULL REFERENCES users(username),
        body VARCHAR NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        votes INT NOT NULL DEFAULT 0
    )",
    "CREATE TABLE comments (
        comment_id SERIAL PRIMARY KEY,
        article_id INT NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
        author VARCHAR NOT NULL REFERENCES users(username),
        body VARCHAR NOT NULL,
        votes INT NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
];

#[derive(Debug, Clone, Deserialize)]
pub struct TopicFixture {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleFixture {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub votes: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentFixture {
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub votes: i32,
}

#[derive(Debug, Clone)]
pub struct Fixtures {
    pub topics: Vec<TopicFixture>,
    pub users: Vec<UserFixture>,
    pub articles: Vec<ArticleFixture>,
    pub comments: Vec<CommentFixture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub topics: usize,
    pub users: usize,
    pub articles: usize,
    pub comments: usize,
}

impl Fixtures {
    /// Reads `topics.json`, `users.json`, `articles.json` and `comments.json` from `dir`
    pub fn load(dir: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            topics: read_fixture(dir, "topics.json")?,
            users: read_fixture(dir, "users.json")?,
            articles: read_fixture(dir, "articles.json")?,
            comments: read_fixture(dir, "comments.json")?,
        })
    }
}

fn read_fixture<T: serde::de::DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, DatabaseError> {
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| DatabaseError::Fixture(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content).map_err(|e| DatabaseError::Fixture(format!("{}: {}", path.display(), e)))
}

/// Recreate the schema and load `fixtures` into it
pub async fn seed(pool: &PgPool, fixtures: &Fixtures) -> Result<SeedSummary, DatabaseError> {
    sqlx::query(DROP_TABLES).execute(pool).await?;
    for ddl in CREATE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }

    if !fixtures.topics.is_empty() {
        let mut qb = sqlx::QueryBuilder::new("INSERT INTO topics (slug, description) ");
        qb.push_values(&fixtures.topics, |mut b, t| {
            b.push_bind(&t.slug).push_bind(&t.description);
        });
        qb.build().execute(pool).await?;
    }

    if !fixtures.users.is_empty() {
        let mut qb = sqlx::QueryBuilder::new("INSERT INTO users (username, name, avatar_url) ");
        qb.push_values(&fixtures.users, |mut b, u| {
            b.push_bind(&u.username).push_bind(&u.name).push_bind(&u.avatar_url);
        });
        qb.build().execute(pool).await?;
    }

    if !fixtures.articles.is_empty() {
        let mut qb =
            sqlx::QueryBuilder::new("INSERT INTO articles (title, topic, author, body, created_at, votes) ");
        qb.push_values(&fixtures.articles, |mut b, a| {
            b.push_bind(&a.title)
                .push_bind(&a.topic)
                .push_bind(&a.author)
                .push_bind(&a.body)
                .push_bind(a.created_at)
                .push_bind(a.votes);
        });
        qb.build().execute(pool).await?;
    }

    if !fixtures.comments.is_empty() {
        let mut qb =
            sqlx::QueryBuilder::new("INSERT INTO comments (article_id, author, body, created_at, votes) ");
        qb.push_values(&fixtures.comments, |mut b, c| {
            b.push_bind(c.article_id)
                .push_bind(&c.author)
                .push_bind(&c.body)
                .push_bind(c.created_at)
                .push_bind(c.votes);
        });
        qb.build().execute(pool).await?;
    }

    let summary = SeedSummary {
        topics: fixtures.topics.len(),
        users: fixtures.users.len(),
        articles: fixtures.articles.len(),
        comments: fixtures.comments.len(),
    };
    info!(?summary, "database seeded");
    Ok(summary)
}
