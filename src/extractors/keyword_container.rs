use super::heuristic::HeuristicExtractor;
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use log::debug;
use scraper::{ElementRef, Selector};

/// Re-runs the list heuristics inside containers whose class or id looks
/// recipe-related, for pages where page-wide lists drown the recipe out.
pub struct KeywordContainerExtractor;

const KEYWORDS: &[&str] = &["recipe", "ingredients", "instructions", "directions", "cooking"];

fn is_keyword_container(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    let mut attrs: Vec<String> = value.classes().map(str::to_lowercase).collect();
    if let Some(id) = value.id() {
        attrs.push(id.to_lowercase());
    }
    attrs
        .iter()
        .any(|attr| KEYWORDS.iter().any(|keyword| attr.contains(keyword)))
}

impl Extractor for KeywordContainerExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        let selector = Selector::parse("div, section, article, span").ok()?;
        let limit = context.config.keyword_container_limit;

        let found = context
            .page
            .document()
            .select(&selector)
            .filter(is_keyword_container)
            .take(limit)
            .enumerate()
            .find_map(|(index, container)| {
                HeuristicExtractor
                    .extract_from(container, context.config.heading_scan_limit)
                    .inspect(|_| debug!("KeywordContainerExtractor: Container {index} matched"))
            });

        if found.is_none() {
            debug!("KeywordContainerExtractor: No container produced a recipe");
        }
        found
    }
}
