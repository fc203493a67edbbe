use crate::config::EngineConfig;
use crate::model::Candidate;
use crate::observer::ExtractionObserver;
use crate::page::Page;

mod entry_content;
mod heuristic;
mod jetpack;
mod json_ld;
mod keyword_container;
mod microdata;
mod tasty_recipes;
pub mod text;
mod wprm;

pub use entry_content::EntryContentExtractor;
pub use heuristic::HeuristicExtractor;
pub use jetpack::JetpackExtractor;
pub use json_ld::JsonLdExtractor;
pub use keyword_container::KeywordContainerExtractor;
pub use microdata::MicroDataExtractor;
pub use tasty_recipes::TastyRecipesExtractor;
pub use wprm::WprmExtractor;

/// Everything a strategy may look at while extracting from one page
pub struct ParsingContext<'a> {
    pub page: &'a Page,
    pub config: &'a EngineConfig,
    pub observer: &'a dyn ExtractionObserver,
}

/// One extraction strategy.
///
/// `None` means the strategy found nothing on this page, which is expected;
/// the orchestrator moves on to the next strategy.
pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate>;
}
