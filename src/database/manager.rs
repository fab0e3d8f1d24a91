use std::future::Future;
use std::time::{Duration, Instant};

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;

/// Errors from the store adapter
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy)]
struct QueryLogSettings {
    enable_query_logging: bool,
    slow_query_threshold: Duration,
}

/// PostgreSQL-backed store. Owns the connection pool for the life of the process.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    settings: QueryLogSettings,
}

impl PgStore {
    /// Build the pool without opening a connection, so the server can start
    /// (and report a degraded /health) while the database is still coming up
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.url.as_deref().ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let pool = Self::pool_options(config).connect_lazy(url)?;
        info!("Created database pool for {}", redact_url(url)?);
        Ok(Self::from_pool(pool, config))
    }

    /// Build the pool and open a first connection, failing fast when unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.url.as_deref().ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let pool = Self::pool_options(config).connect(url).await?;
        info!("Connected to {}", redact_url(url)?);
        Ok(Self::from_pool(pool, config))
    }

    pub fn from_pool(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            settings: QueryLogSettings {
                enable_query_logging: config.enable_query_logging,
                slow_query_threshold: Duration::from_millis(config.slow_query_threshold_ms),
            },
        }
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run one query future, logging its text in verbose mode and warning when slow
    pub(crate) async fn timed<T, F>(&self, label: &'static str, sql: &str, fut: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        if self.settings.enable_query_logging {
            debug!(query = label, sql, "executing query");
        }

        let started = Instant::now();
        let result = fut.await;
        let elapsed = started.elapsed();

        if elapsed >= self.settings.slow_query_threshold {
            warn!(query = label, elapsed_ms = elapsed.as_millis() as u64, "slow query");
        }

        result.map_err(DatabaseError::from)
    }
}

/// Connection string with the password masked, safe for logs
pub fn redact_url(raw: &str) -> Result<String, DatabaseError> {
    let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    if url.password().is_some() {
        // Fails only for cannot-be-a-base URLs
        let _ = url.set_password(Some("***"));
    }
    Ok(url.into())
}
