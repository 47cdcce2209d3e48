//! Page check orchestration
//!
//! fetch -> extract -> store, all or nothing: a check row exists only if
//! the fetch succeeded and extraction completed.

use crate::db::{Database, PageCheck};
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::fetch::PageFetcher;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Message shown for any failed check, whatever the cause
pub const CHECK_FAILED_MESSAGE: &str = "An error occurred while checking the page";

/// Message shown after a stored check
pub const CHECK_OK_MESSAGE: &str = "Page checked successfully";

/// What happened when a check was requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The page was fetched and a new check was stored
    Checked(PageCheck),
    /// Fetching failed; nothing was stored
    Failed,
}

impl CheckOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CheckOutcome::Checked(_) => CHECK_OK_MESSAGE,
            CheckOutcome::Failed => CHECK_FAILED_MESSAGE,
        }
    }
}

/// Run one check against the tracked URL `url_id`.
///
/// Fetch errors are not distinguished for the caller: network failures,
/// timeouts and HTTP error statuses all become [`CheckOutcome::Failed`].
/// Database errors propagate.
pub async fn run_check(
    db: &Database,
    fetcher: &PageFetcher,
    url_id: i64,
) -> Result<CheckOutcome> {
    let url = db
        .find_url_by_id(url_id)
        .await?
        .ok_or(Error::UrlNotFound(url_id))?;

    let page = match fetcher.fetch(&url.name).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Check of {} failed: {}", url.name, e);
            return Ok(CheckOutcome::Failed);
        }
    };

    let data = extract(&page);
    let check = db.insert_check(url.id, &data).await?;

    info!(
        "Checked {} via {} (status {}, check id {})",
        url.name, page.url, data.status_code, check.id
    );
    Ok(CheckOutcome::Checked(check))
}
