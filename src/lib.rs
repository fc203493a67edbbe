//! Multi-strategy recipe extraction.
//!
//! Give it a recipe page and it returns `{name, ingredients, instructions}`,
//! trying site-specific templates, embedded structured data and generic
//! list heuristics in turn until one yields something recipe-like.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! match recipe_extract::extract_recipe("https://example.com/recipe").await? {
//!     Some(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
//!     None => eprintln!("No recipe found"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod observer;
pub mod page;
pub mod pipelines;
pub mod validator;

pub use builder::{RecipeExtractor, RecipeExtractorBuilder};
pub use classifier::{classify, StrategyHint};
pub use config::EngineConfig;
pub use error::{ExtractError, FetchError};
pub use fetchers::{Fetcher, RequestFetcher, StaticFetcher};
pub use model::{Recipe, UNTITLED};
pub use observer::{
    ExtractionEvent, ExtractionObserver, LogObserver, NullObserver, RecordingObserver,
};
pub use pipelines::{GenericStrategy, Strategy};
pub use validator::{is_recipe_like, Rejection, RecipeScore};

/// Fetch a page and extract its recipe with configuration from
/// `recipe_extract.toml` and `RECIPE_EXTRACT__*` environment variables
///
/// # Returns
/// * `Ok(Some(Recipe))` - A recipe was found
/// * `Ok(None)` - The page holds no recognizable recipe
/// * `Err(ExtractError)` - Configuration or fetching failed
pub async fn extract_recipe(url: &str) -> Result<Option<Recipe>, ExtractError> {
    RecipeExtractor::builder().build()?.extract(url).await
}

/// Extract a recipe from HTML that is already in hand, using default settings
///
/// `url` only feeds the page classifier; nothing is fetched.
pub fn extract_recipe_from_html(url: &str, html: &str) -> Option<Recipe> {
    let page = page::Page::parse(url, html);
    pipelines::html::process(&page, &EngineConfig::default(), &LogObserver)
}
