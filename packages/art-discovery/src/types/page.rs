//! Fetched pages and their plain-text view.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Meta tags that carry a page description, most specific first.
const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
];

/// Main-content containers, tried in order. WordPress/Elementor first.
const CONTENT_SELECTORS: &[&str] = &[
    "div.entry-content",
    "article",
    "main",
    r#"div[class*="elementor-widget-container"]"#,
];

const HEADING_SELECTORS: &[&str] = &["h1", "h2.entry-title"];

/// A page returned by a `PageFetcher`, before any extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// Raw response body (HTML or plain text)
    pub body: String,

    /// HTTP status, when fetched over the network
    pub status: Option<u16>,

    /// Content type header, if any
    pub content_type: Option<String>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            status: None,
            content_type: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Parse the body and pull out the text the extractor works on.
    pub fn text(&self) -> PageText {
        let document = Html::parse_document(&self.body);

        let meta_description = DESCRIPTION_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .find_map(|selector| {
                document
                    .select(&selector)
                    .find_map(|el| el.value().attr("content"))
                    .map(|c| c.trim().to_string())
            })
            .unwrap_or_default();

        let heading = HEADING_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .find_map(|selector| document.select(&selector).next().map(element_text))
            .filter(|t| !t.is_empty());

        let main_content = CONTENT_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .find_map(|selector| document.select(&selector).next().map(element_text))
            .or_else(|| {
                // No content container: fall back to the whole body
                let body = Selector::parse("body").ok()?;
                document.select(&body).next().map(element_text)
            })
            .unwrap_or_default();

        PageText {
            heading,
            meta_description,
            main_content,
        }
    }
}

/// Plain-text view of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageText {
    /// First `h1` (or entry title), if any
    pub heading: Option<String>,

    /// Meta / OpenGraph description
    pub meta_description: String,

    /// Text of the main content container
    pub main_content: String,
}

impl PageText {
    /// Meta description followed by main content, whitespace-collapsed.
    pub fn combined(&self) -> String {
        collapse_whitespace(&format!("{} {}", self.meta_description, self.main_content))
    }

    pub fn is_empty(&self) -> bool {
        self.meta_description.trim().is_empty() && self.main_content.trim().is_empty()
    }
}

/// Text nodes of an element, skipping script/style, whitespace-collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            let inside_code = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| matches!(a.value().name(), "script" | "style" | "noscript"));
            if !inside_code {
                parts.push(String::from(&**text));
            }
        }
    }
    collapse_whitespace(&parts.join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_and_entry_content() {
        let html = r#"
            <html><head>
              <meta name="description" content="Two new murals downtown.">
            </head><body>
              <nav>Menu</nav>
              <h1>Ness + Jacobson collaborate</h1>
              <div class="entry-content"><p>Painted by Kent Ness.</p><script>var x = 1;</script></div>
            </body></html>
        "#;
        let text = FetchedPage::new("https://example.com", html).text();

        assert_eq!(text.meta_description, "Two new murals downtown.");
        assert_eq!(text.heading.as_deref(), Some("Ness + Jacobson collaborate"));
        assert_eq!(text.main_content, "Painted by Kent Ness.");
        assert_eq!(
            text.combined(),
            "Two new murals downtown. Painted by Kent Ness."
        );
    }

    #[test]
    fn test_og_description_fallback() {
        let html = r#"<html><head><meta property="og:description" content="OG text"></head>
            <body><article>Body</article></body></html>"#;
        let text = FetchedPage::new("https://example.com", html).text();
        assert_eq!(text.meta_description, "OG text");
        assert_eq!(text.main_content, "Body");
    }

    #[test]
    fn test_plain_text_falls_back_to_body() {
        let text = FetchedPage::new("https://example.com", "By Jane Smith, a mural.").text();
        assert_eq!(text.main_content, "By Jane Smith, a mural.");
        assert!(!text.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let page = FetchedPage::new("https://example.com", "   ");
        assert!(page.text().is_empty());
    }
}
