//! URL unfurling
//!
//! Fetches a page and extracts the title, description, image and author
//! that resource cards display. Open Graph and Twitter tags win over the
//! plain HTML ones.

use anyhow::Result;
use reqwest::Url;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use devhub_core::models::Unfurl;

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_KEYS: &[&str] = &["og:image", "og:image:url", "twitter:image"];
const AUTHOR_KEYS: &[&str] = &["article:author", "author", "dc.creator"];

/// Fetch and unfurl a URL
///
/// Returns an unfurl titled with the URL itself on failure.
pub async fn fetch_unfurl(url: &str) -> Unfurl {
    match fetch_html(url).await {
        Ok(Some(html)) => parse_unfurl(&html, url),
        Ok(None) => fallback(url),
        Err(e) => {
            warn!("Failed to unfurl {}: {}", url, e);
            fallback(url)
        }
    }
}

async fn fetch_html(url: &str) -> Result<Option<String>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; DevHub/1.0)")
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        debug!(status = %response.status(), "unfurl fetch was not successful");
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}

fn fallback(url: &str) -> Unfurl {
    Unfurl {
        title: url.to_string(),
        ..Unfurl::default()
    }
}

/// Extract unfurl metadata from a page fetched from `url`
pub fn parse_unfurl(html: &str, url: &str) -> Unfurl {
    let document = Html::parse_document(html);

    let title = first_meta(&document, TITLE_KEYS)
        .or_else(|| title_tag(&document))
        .unwrap_or_else(|| url.to_string());
    let image = first_meta(&document, IMAGE_KEYS).map(|src| resolve(url, &src));

    Unfurl {
        title,
        description: first_meta(&document, DESCRIPTION_KEYS),
        image,
        author: first_meta(&document, AUTHOR_KEYS),
    }
}

/// Resolve a possibly relative image URL against the page URL
fn resolve(page: &str, src: &str) -> String {
    Url::parse(page)
        .and_then(|base| base.join(src))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| src.to_string())
}

fn title_tag(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_meta(document: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| meta_content(document, key))
}

/// Content of a `<meta>` tag matched by `property` or `name`
fn meta_content(document: &Html, key: &str) -> Option<String> {
    ["property", "name"].iter().find_map(|attr| {
        let selector = Selector::parse(&format!(r#"meta[{}="{}"]"#, attr, key)).ok()?;
        document
            .select(&selector)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://developer.example.com/docs/intro";

    #[test]
    fn test_open_graph_wins() {
        let html = r#"
            <html><head>
                <title>Plain title</title>
                <meta property="og:title" content="OG title">
                <meta name="description" content="Plain description">
                <meta property="og:description" content="OG description">
                <meta property="og:image" content="https://img.example.com/card.png">
            </head></html>
        "#;

        let unfurl = parse_unfurl(html, PAGE);
        assert_eq!(unfurl.title, "OG title");
        assert_eq!(unfurl.description.as_deref(), Some("OG description"));
        assert_eq!(unfurl.image.as_deref(), Some("https://img.example.com/card.png"));
        assert!(unfurl.author.is_none());
    }

    #[test]
    fn test_falls_back_to_plain_tags() {
        let html = r#"
            <html><head>
                <title>  Intro to DevHub  </title>
                <meta name="description" content="Start here">
                <meta name="author" content="DevHub Team">
            </head></html>
        "#;

        let unfurl = parse_unfurl(html, PAGE);
        assert_eq!(unfurl.title, "Intro to DevHub");
        assert_eq!(unfurl.description.as_deref(), Some("Start here"));
        assert_eq!(unfurl.author.as_deref(), Some("DevHub Team"));
    }

    #[test]
    fn test_relative_image_is_resolved() {
        let html = r#"<meta property="og:image" content="/static/card.png">"#;
        let unfurl = parse_unfurl(html, PAGE);
        assert_eq!(
            unfurl.image.as_deref(),
            Some("https://developer.example.com/static/card.png")
        );
    }

    #[test]
    fn test_empty_page_uses_url_as_title() {
        let unfurl = parse_unfurl("<html></html>", PAGE);
        assert_eq!(unfurl.title, PAGE);
        assert!(unfurl.description.is_none());
        assert!(unfurl.image.is_none());
    }

    #[test]
    fn test_blank_meta_is_skipped() {
        let html = r#"
            <meta property="og:title" content="   ">
            <meta name="twitter:title" content="Twitter title">
        "#;
        assert_eq!(parse_unfurl(html, PAGE).title, "Twitter title");
    }
}
