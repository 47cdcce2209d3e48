//! sitecheck - track websites and record SEO checks
//!
//! This crate provides:
//! - URL validation and normalization to a canonical `scheme://host` form
//! - A single-shot page fetcher and an HTML metadata extractor
//! - SQLite storage for tracked URLs and their check history
//! - CLI commands tying those together

pub mod check;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;

pub use config::Config;
pub use error::{Error, Result};
