//! CLI commands implementation

pub mod add;
pub mod check;
pub mod init;
pub mod list;

pub use add::*;
pub use check::*;
pub use init::*;
pub use list::*;

use chrono::DateTime;

/// Render a stored RFC 3339 timestamp as a calendar date
pub fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
