use scraper::{ElementRef, Html, Selector};

use crate::extractors::text::normalized_text;

/// One fetched and parsed document.
///
/// A `Page` belongs to a single extraction call and is never mutated;
/// noise filtering happens while reading text, not by editing the tree.
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// First element matching a CSS selector
    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }

    pub fn has(&self, selector: &str) -> bool {
        self.select_first(selector).is_some()
    }

    /// Text of the first non-empty match among the given selectors
    pub fn first_text(&self, selectors: &[&str]) -> Option<String> {
        selectors.iter().find_map(|sel| {
            let text = normalized_text(self.select_first(sel)?);
            (!text.is_empty()).then_some(text)
        })
    }

    /// Best-effort page title used when a strategy has no name of its own
    pub fn title(&self) -> Option<String> {
        if let Some(og) = self
            .select_first(r#"meta[property="og:title"]"#)
            .and_then(|m| m.value().attr("content"))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
        {
            return Some(og);
        }
        self.first_text(&["h1", "title"])
    }
}
