//! URL validation and canonicalization
//!
//! A tracked URL is stored as `scheme://host`: path, query, fragment, port
//! and credentials are dropped so that every page of a site maps to the
//! same record. Validation always looks at the raw input the user typed,
//! never at the canonical form.

use thiserror::Error;
use url::{Host, Url};

/// Maximum accepted length of a raw URL, in characters
pub const MAX_URL_LEN: usize = 255;

/// Why a raw URL was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is too long (must be at most {} characters)", MAX_URL_LEN)]
    TooLong,

    #[error("Invalid URL")]
    Malformed,
}

/// Validate a raw URL as typed by the user.
///
/// Only one error is reported. Checks run malformed, then empty, then
/// too-long, and a later violation replaces an earlier one, so the
/// effective priority is `TooLong` over `Empty` over `Malformed`.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    let mut error = None;

    if !is_well_formed(raw) {
        error = Some(ValidationError::Malformed);
    }
    if raw.is_empty() {
        error = Some(ValidationError::Empty);
    }
    if raw.chars().count() > MAX_URL_LEN {
        error = Some(ValidationError::TooLong);
    }

    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Reduce a URL to `scheme://host`.
///
/// Scheme and host come out lowercase. Idempotent: normalizing an already
/// canonical URL returns it unchanged.
pub fn normalize(raw: &str) -> Result<String, ValidationError> {
    let url = Url::parse(raw).map_err(|_| ValidationError::Malformed)?;
    let host = url.host_str().ok_or(ValidationError::Malformed)?;
    Ok(format!("{}://{}", url.scheme(), host.to_ascii_lowercase()))
}

/// Validate then normalize; the form stored for a newly added URL.
///
/// IDN hosts come back punycode-encoded, which can push a raw URL that was
/// within the limit past it, so the canonical form is length-checked too.
pub fn canonicalize(raw: &str) -> Result<String, ValidationError> {
    validate(raw)?;
    let name = normalize(raw)?;
    if name.chars().count() > MAX_URL_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(name)
}

/// Generic URL syntax check: http(s) scheme, explicit `://`, and a real host
fn is_well_formed(raw: &str) -> bool {
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if !raw.contains("://") {
        return false;
    }

    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn is_valid_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }
    if !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
