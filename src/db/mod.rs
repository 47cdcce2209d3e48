//! Tracking storage using SQLite
//!
//! This module handles all persistent state:
//! - Tracked URLs (canonical `scheme://host`, unique by name)
//! - Page checks (immutable, append-only history per URL)

mod schema;

pub use schema::*;

use crate::error::{Error, Result};
use crate::extract::PageCheckData;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use tracing::{debug, info};

/// A URL the user asked to track
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TrackedUrl {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// One stored fetch-and-extract result
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PageCheck {
    pub id: i64,
    pub url_id: i64,
    pub status_code: Option<i64>,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// A tracked URL with its most recent check, if any
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UrlSummary {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub last_checked_at: Option<String>,
    pub last_status_code: Option<i64>,
}

/// Result of inserting a URL name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlInsert {
    /// A new row was written
    Created(i64),
    /// The name was already stored (possibly by a concurrent insert)
    Existing(i64),
}

impl UrlInsert {
    pub fn id(&self) -> i64 {
        match self {
            UrlInsert::Created(id) | UrlInsert::Existing(id) => *id,
        }
    }
}

/// Tracking database handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `db_path` and ensure the schema exists
    pub async fn connect(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };

        if !db.is_initialized().await? {
            db.init_schema().await?;
        }

        Ok(db)
    }

    /// Initialize the database schema
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if database is initialized
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='urls'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    // ===== URL Operations =====

    /// Get a tracked URL by its canonical name
    pub async fn find_url_by_name(&self, name: &str) -> Result<Option<TrackedUrl>> {
        let url = sqlx::query_as::<_, TrackedUrl>(
            "SELECT id, name, created_at FROM urls WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }

    /// Get a tracked URL by ID
    pub async fn find_url_by_id(&self, id: i64) -> Result<Option<TrackedUrl>> {
        let url = sqlx::query_as::<_, TrackedUrl>(
            "SELECT id, name, created_at FROM urls WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }

    /// Insert a URL name.
    ///
    /// The UNIQUE constraint on `name` arbitrates concurrent inserts: the
    /// loser gets `UrlInsert::Existing` with the winner's id.
    pub async fn insert_url(&self, name: &str) -> Result<UrlInsert> {
        let created_at = Utc::now().to_rfc3339();

        let inserted: std::result::Result<i64, sqlx::Error> =
            sqlx::query_scalar("INSERT INTO urls (name, created_at) VALUES (?, ?) RETURNING id")
                .bind(name)
                .bind(&created_at)
                .fetch_one(&self.pool)
                .await;

        match inserted {
            Ok(id) => {
                debug!("Inserted url {} as id {}", name, id);
                Ok(UrlInsert::Created(id))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!("Url {} already stored", name);
                let existing = self
                    .find_url_by_name(name)
                    .await?
                    .ok_or(Error::Database(sqlx::Error::RowNotFound))?;
                Ok(UrlInsert::Existing(existing.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List all tracked URLs, newest first, with their latest check
    pub async fn list_urls(&self) -> Result<Vec<UrlSummary>> {
        let urls = sqlx::query_as::<_, UrlSummary>(
            r#"
            WITH latest AS (
                SELECT url_id,
                       status_code,
                       created_at,
                       ROW_NUMBER() OVER (PARTITION BY url_id ORDER BY id DESC) AS rn
                FROM url_checks
            )
            SELECT u.id,
                   u.name,
                   u.created_at,
                   latest.created_at AS last_checked_at,
                   latest.status_code AS last_status_code
            FROM urls u
            LEFT JOIN latest
                ON latest.url_id = u.id AND latest.rn = 1
            ORDER BY u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(urls)
    }

    // ===== Check Operations =====

    /// Record a successful check for `url_id`
    pub async fn insert_check(&self, url_id: i64, data: &PageCheckData) -> Result<PageCheck> {
        let created_at = Utc::now().to_rfc3339();

        // Rolled back on drop unless committed
        let mut tx = self.pool.begin().await?;

        let check = sqlx::query_as::<_, PageCheck>(
            r#"
            INSERT INTO url_checks (url_id, status_code, h1, title, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, url_id, status_code, h1, title, description, created_at
            "#,
        )
        .bind(url_id)
        .bind(i64::from(data.status_code))
        .bind(&data.h1)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("Inserted check {} for url {}", check.id, url_id);
        Ok(check)
    }

    /// Get a single check by ID
    pub async fn find_check_by_id(&self, id: i64) -> Result<Option<PageCheck>> {
        let check = sqlx::query_as::<_, PageCheck>(
            r#"
            SELECT id, url_id, status_code, h1, title, description, created_at
            FROM url_checks WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(check)
    }

    /// List checks for a URL, most recent first
    pub async fn list_checks(&self, url_id: i64) -> Result<Vec<PageCheck>> {
        let checks = sqlx::query_as::<_, PageCheck>(
            r#"
            SELECT id, url_id, status_code, h1, title, description, created_at
            FROM url_checks
            WHERE url_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(url_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(checks)
    }
}
