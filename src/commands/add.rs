//! Add command implementation

use crate::db::{Database, TrackedUrl, UrlInsert};
use crate::error::{Error, Result};
use crate::normalize::canonicalize;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What happened when a URL was submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new URL was stored
    Added(TrackedUrl),
    /// The canonical URL was already tracked
    Exists(TrackedUrl),
}

impl AddOutcome {
    pub fn url(&self) -> &TrackedUrl {
        match self {
            AddOutcome::Added(url) | AddOutcome::Exists(url) => url,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AddOutcome::Added(_) => "Page added successfully",
            AddOutcome::Exists(_) => "Page already exists",
        }
    }
}

/// Validate, canonicalize and store a URL, deduplicating by canonical name
pub async fn cmd_add(db: &Database, raw: &str) -> Result<AddOutcome> {
    let name = canonicalize(raw)?;

    if let Some(existing) = db.find_url_by_name(&name).await? {
        info!("Url {} already tracked as {}", name, existing.id);
        return Ok(AddOutcome::Exists(existing));
    }

    let inserted = db.insert_url(&name).await?;
    let url = db
        .find_url_by_id(inserted.id())
        .await?
        .ok_or(Error::UrlNotFound(inserted.id()))?;

    Ok(match inserted {
        UrlInsert::Created(_) => {
            info!("Tracking {} as {}", url.name, url.id);
            AddOutcome::Added(url)
        }
        UrlInsert::Existing(_) => AddOutcome::Exists(url),
    })
}

/// Print the add outcome to console
pub fn print_add_outcome(outcome: &AddOutcome) {
    let mark = match outcome {
        AddOutcome::Added(_) => "✓",
        AddOutcome::Exists(_) => "•",
    };
    let url = outcome.url();
    println!("{} {}: {} (ID: {})", mark, outcome.message(), url.name, url.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ValidationError;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Database, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db = Database::connect(&tmp.path().join("test.db")).await.unwrap();
        (db, tmp)
    }

    #[tokio::test]
    async fn test_add_stores_canonical_name() {
        let (db, _tmp) = setup_test_db().await;

        let outcome = cmd_add(&db, "HTTPS://Example.com/path?x=1").await.unwrap();
        assert!(matches!(outcome, AddOutcome::Added(_)));
        assert_eq!(outcome.url().name, "https://example.com");
    }

    #[tokio::test]
    async fn test_add_same_site_twice() {
        let (db, _tmp) = setup_test_db().await;

        let first = cmd_add(&db, "https://example.com/a").await.unwrap();
        let second = cmd_add(&db, "https://EXAMPLE.com/b#c").await.unwrap();

        assert!(matches!(second, AddOutcome::Exists(_)));
        assert_eq!(second.url(), first.url());
        assert_eq!(second.message(), "Page already exists");
        assert_eq!(db.list_urls().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_persists_nothing() {
        let (db, _tmp) = setup_test_db().await;

        let result = cmd_add(&db, "").await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::Empty))
        ));

        let result = cmd_add(&db, "definitely not a url").await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::Malformed))
        ));

        assert!(db.list_urls().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_idn_expanding_past_limit_is_rejected() {
        let (db, _tmp) = setup_test_db().await;

        let raw = crate::normalize::tests::long_idn_url();
        let result = cmd_add(&db, &raw).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::TooLong))
        ));

        assert!(db.list_urls().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_adds_resolve_to_one_url() {
        let (db, _tmp) = setup_test_db().await;

        let a = db.clone();
        let b = db.clone();
        let (left, right) = tokio::join!(
            tokio::spawn(async move { cmd_add(&a, "https://example.com/one").await }),
            tokio::spawn(async move { cmd_add(&b, "https://example.com/two").await }),
        );
        let left = left.unwrap().unwrap();
        let right = right.unwrap().unwrap();

        assert_eq!(left.url().id, right.url().id);
        let added = [&left, &right]
            .iter()
            .filter(|o| matches!(o, AddOutcome::Added(_)))
            .count();
        assert_eq!(added, 1);
        assert_eq!(db.list_urls().await.unwrap().len(), 1);
    }
}
