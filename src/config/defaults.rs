//! Default values for configuration

/// Default fetch timeout in seconds
pub fn default_fetch_timeout() -> u64 {
    10
}

/// Default user agent, overridable with SITECHECK_USER_AGENT
pub fn default_fetch_user_agent() -> String {
    std::env::var("SITECHECK_USER_AGENT")
        .unwrap_or_else(|_| format!("sitecheck/{}", env!("CARGO_PKG_VERSION")))
}

/// Default database file name, relative to the config directory
pub fn default_db_file_name() -> String {
    "sitecheck.db".to_string()
}
