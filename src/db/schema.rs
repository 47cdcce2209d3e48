//! SQLite schema definition

/// SQL schema for the tracking database
pub const SCHEMA_SQL: &str = r#"
-- Tracked URLs, stored in canonical scheme://host form
CREATE TABLE IF NOT EXISTS urls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(name) <= 255),
    created_at TEXT NOT NULL
);

-- Page checks: append-only history per URL
CREATE TABLE IF NOT EXISTS url_checks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url_id INTEGER NOT NULL REFERENCES urls(id),
    status_code INTEGER,
    h1 TEXT NOT NULL DEFAULT '',
    title TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_url_checks_url ON url_checks(url_id);
"#;
