//! Check command implementation

use crate::check::{run_check, CheckOutcome};
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::fetch::PageFetcher;

/// Fetch a tracked URL once and record its metadata
pub async fn cmd_check(config: &Config, db: &Database, url_id: i64) -> Result<CheckOutcome> {
    let fetcher = PageFetcher::new(&config.fetch)?;
    run_check(db, &fetcher, url_id).await
}

/// Print the check outcome to console
pub fn print_check_outcome(outcome: &CheckOutcome) {
    match outcome {
        CheckOutcome::Checked(check) => {
            println!("✓ {}", outcome.message());
            if let Some(code) = check.status_code {
                println!("  Status: {}", code);
            }
            println!("  h1: {}", check.h1);
            println!("  title: {}", check.title);
            println!("  description: {}", check.description);
        }
        CheckOutcome::Failed => {
            println!("✗ {}", outcome.message());
        }
    }
}
