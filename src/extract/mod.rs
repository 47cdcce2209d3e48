//! SEO metadata extraction from fetched HTML

use crate::fetch::FetchedPage;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Metadata recorded by one page check, before it is stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCheckData {
    pub status_code: u16,
    pub h1: String,
    pub title: String,
    pub description: String,
}

/// Extract check data from a fetched page
pub fn extract(page: &FetchedPage) -> PageCheckData {
    extract_html(page.status, &page.body)
}

/// Parse `html` and pull out the first `<h1>`, the `<title>`, and the
/// `content` of `<meta name="description">`.
///
/// Parsing is best-effort: broken markup never fails, missing elements
/// become empty strings. Text is kept exactly as it appears in the
/// document, whitespace included.
pub fn extract_html(status_code: u16, html: &str) -> PageCheckData {
    let document = Html::parse_document(html);

    PageCheckData {
        status_code,
        h1: first_text(&document, "h1"),
        title: first_text(&document, "title"),
        description: meta_description(&document),
    }
}

fn first_text(document: &Html, tag: &str) -> String {
    Selector::parse(tag)
        .ok()
        .and_then(|selector| document.select(&selector).next().map(element_text))
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn meta_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse("meta") else {
        return String::new();
    };

    document
        .select(&selector)
        .find(|meta| meta.value().attr("name") == Some("description"))
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
        .unwrap_or_default()
}
