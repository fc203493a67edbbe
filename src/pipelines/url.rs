use crate::config::EngineConfig;
use crate::error::FetchError;
use crate::fetchers::Fetcher;
use crate::model::Recipe;
use crate::observer::{ExtractionEvent, ExtractionObserver};
use crate::page::Page;

/// Fetch a URL and run the strategy chain over it
///
/// A failed fetch ends the extraction before any strategy runs.
///
/// # Returns
/// * `Ok(Some(Recipe))` - A recipe was extracted
/// * `Ok(None)` - The page was fetched but holds no recognizable recipe
/// * `Err(FetchError)` - The page could not be retrieved
pub async fn process(
    url: &str,
    fetcher: &dyn Fetcher,
    config: &EngineConfig,
    observer: &dyn ExtractionObserver,
) -> Result<Option<Recipe>, FetchError> {
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            observer.on_event(&ExtractionEvent::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            });
            return Err(e);
        }
    };
    observer.on_event(&ExtractionEvent::Fetched {
        url: url.to_string(),
        bytes: html.len(),
    });

    let page = Page::parse(url, &html);
    Ok(super::html::process(&page, config, observer))
}
