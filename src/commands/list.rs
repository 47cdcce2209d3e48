//! List and show command implementations

use super::format_date;
use crate::db::{Database, PageCheck, TrackedUrl, UrlSummary};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A tracked URL with its full check history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlDetails {
    pub url: TrackedUrl,
    /// Most recent first
    pub checks: Vec<PageCheck>,
}

/// List all tracked URLs with their latest check
pub async fn cmd_list(db: &Database) -> Result<Vec<UrlSummary>> {
    info!("Listing tracked urls");
    db.list_urls().await
}

/// Show one tracked URL and its check history
pub async fn cmd_show(db: &Database, url_id: i64) -> Result<UrlDetails> {
    let url = db
        .find_url_by_id(url_id)
        .await?
        .ok_or(Error::UrlNotFound(url_id))?;
    let checks = db.list_checks(url_id).await?;
    Ok(UrlDetails { url, checks })
}

/// Print tracked URLs to console
pub fn print_urls(urls: &[UrlSummary]) {
    println!("\n🔎 Tracked Sites\n");

    if urls.is_empty() {
        println!("No sites tracked. Use 'sitecheck add <url>' to add one.");
        return;
    }

    println!("{:>5}  {:<40}  {:<12}  {}", "ID", "Name", "Last check", "Status");
    for url in urls {
        let last_checked = url
            .last_checked_at
            .as_deref()
            .map(format_date)
            .unwrap_or_default();
        let status = url
            .last_status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!(
            "{:>5}  {:<40}  {:<12}  {}",
            url.id, url.name, last_checked, status
        );
    }
}

/// Print one URL and its checks to console
pub fn print_url_details(details: &UrlDetails) {
    let url = &details.url;
    println!("\n🌐 {}\n", url.name);
    println!("  ID: {}", url.id);
    println!("  Added: {}", format_date(&url.created_at));

    println!("\nChecks:");
    if details.checks.is_empty() {
        println!("  None yet. Run 'sitecheck check {}'.", url.id);
        return;
    }

    for check in &details.checks {
        let status = check
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!(
            "• #{} [{}] {}",
            check.id,
            status,
            format_date(&check.created_at)
        );
        println!("  h1: {}", check.h1);
        println!("  title: {}", check.title);
        println!("  description: {}", check.description);
    }
}
