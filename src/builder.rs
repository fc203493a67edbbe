use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::ExtractError;
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::Recipe;
use crate::observer::{ExtractionObserver, LogObserver};
use crate::page::Page;
use crate::pipelines::{self, GenericStrategy};

/// Builder for configuring a [`RecipeExtractor`]
#[derive(Default)]
pub struct RecipeExtractorBuilder {
    config: Option<EngineConfig>,
    timeout: Option<Duration>,
    generic_order: Option<Vec<GenericStrategy>>,
    fetcher: Option<Box<dyn Fetcher>>,
    observer: Option<Arc<dyn ExtractionObserver>>,
}

impl RecipeExtractorBuilder {
    /// Use this configuration instead of loading one from file and environment
    ///
    /// # Example
    /// ```
    /// use recipe_extract::{EngineConfig, RecipeExtractor};
    ///
    /// let config = EngineConfig {
    ///     heading_scan_limit: 20,
    ///     ..EngineConfig::default()
    /// };
    /// let builder = RecipeExtractor::builder().config(config);
    /// ```
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_extract::RecipeExtractor;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeExtractor::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the order of the generic strategies
    ///
    /// # Example
    /// ```
    /// use recipe_extract::{GenericStrategy, RecipeExtractor};
    ///
    /// let builder = RecipeExtractor::builder()
    ///     .generic_order(vec![GenericStrategy::Heuristic, GenericStrategy::StructuredData]);
    /// ```
    pub fn generic_order(mut self, order: Vec<GenericStrategy>) -> Self {
        self.generic_order = Some(order);
        self
    }

    /// Replace the HTTP fetcher, e.g. with a [`StaticFetcher`](crate::StaticFetcher)
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Send extraction events somewhere other than the `log` facade
    pub fn observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the extractor
    ///
    /// # Errors
    /// Returns `ExtractError` if:
    /// - No configuration was given and loading one fails
    /// - The timeout is zero
    /// - The generic strategy order is empty
    /// - The HTTP client cannot be created
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_extract::RecipeExtractor;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let extractor = RecipeExtractor::builder().build()?;
    /// if let Some(recipe) = extractor.extract("https://example.com/recipe").await? {
    ///     println!("{}", recipe.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<RecipeExtractor, ExtractError> {
        let mut config = match self.config {
            Some(config) => config,
            None => EngineConfig::load()?,
        };
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(order) = self.generic_order {
            config.generic_order = order;
        }

        if config.timeout.is_zero() {
            return Err(ExtractError::Builder(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        if config.generic_order.is_empty() {
            return Err(ExtractError::Builder(
                "Generic strategy order must name at least one strategy".to_string(),
            ));
        }

        let observer = self.observer.unwrap_or_else(|| Arc::new(LogObserver));
        let fetcher: Box<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(RequestFetcher::with_observer(&config, observer.clone())?),
        };

        Ok(RecipeExtractor {
            config,
            fetcher,
            observer,
        })
    }
}

/// Extracts recipes from web pages
///
/// Holds no per-page state, so one extractor can serve concurrent calls.
pub struct RecipeExtractor {
    config: EngineConfig,
    fetcher: Box<dyn Fetcher>,
    observer: Arc<dyn ExtractionObserver>,
}

impl RecipeExtractor {
    /// Creates a new builder for extracting recipes
    ///
    /// # Example
    /// ```
    /// use recipe_extract::RecipeExtractor;
    ///
    /// let builder = RecipeExtractor::builder();
    /// ```
    pub fn builder() -> RecipeExtractorBuilder {
        RecipeExtractorBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch `url` and extract its recipe
    ///
    /// # Returns
    /// * `Ok(Some(Recipe))` - A recipe was found
    /// * `Ok(None)` - The page holds no recognizable recipe
    /// * `Err(ExtractError::Fetch)` - The page could not be retrieved
    pub async fn extract(&self, url: &str) -> Result<Option<Recipe>, ExtractError> {
        let recipe = pipelines::url::process(
            url,
            self.fetcher.as_ref(),
            &self.config,
            self.observer.as_ref(),
        )
        .await?;
        Ok(recipe)
    }

    /// Extract a recipe from HTML the caller already fetched
    pub fn extract_html(&self, url: &str, html: &str) -> Option<Recipe> {
        let page = Page::parse(url, html);
        pipelines::html::process(&page, &self.config, self.observer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::StaticFetcher;

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = RecipeExtractor::builder()
            .config(EngineConfig::default())
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(ExtractError::Builder(_))));
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let extractor = RecipeExtractor::builder()
            .config(EngineConfig::default())
            .timeout(Duration::from_millis(1500))
            .build()
            .unwrap();
        assert_eq!(extractor.config().timeout, Duration::from_millis(1500));

        let extractor = RecipeExtractor::builder()
            .config(EngineConfig::default())
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        assert_eq!(extractor.config().timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_empty_generic_order_is_rejected() {
        let result = RecipeExtractor::builder()
            .config(EngineConfig::default())
            .generic_order(Vec::new())
            .build();
        assert!(matches!(result, Err(ExtractError::Builder(_))));
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let extractor = RecipeExtractor::builder()
            .config(EngineConfig::default())
            .timeout(Duration::from_secs(3))
            .generic_order(vec![GenericStrategy::Heuristic])
            .fetcher(StaticFetcher::new())
            .build()
            .unwrap();
        assert_eq!(extractor.config().timeout, Duration::from_secs(3));
        assert_eq!(extractor.config().generic_order, vec![GenericStrategy::Heuristic]);
    }
}
