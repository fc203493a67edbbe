use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::extractors::ParsingContext;
use crate::model::{Recipe, UNTITLED};
use crate::observer::{ExtractionEvent, ExtractionObserver};
use crate::page::Page;
use crate::validator;

use super::plan;

/// Run the strategy chain over an already-fetched page
///
/// This pipeline:
/// 1. Classifies the page to find a site-specific strategy
/// 2. Tries that strategy, then the generic ones in configured order
/// 3. Passes every candidate through the recipe-likeness gate
/// 4. Returns the first accepted candidate as a `Recipe`
///
/// # Returns
/// * `Some(Recipe)` - A strategy produced a recipe-like candidate
/// * `None` - Every strategy came up empty or was rejected
pub fn process(page: &Page, config: &EngineConfig, observer: &dyn ExtractionObserver) -> Option<Recipe> {
    let hint = classify(page);
    observer.on_event(&ExtractionEvent::Classified { hint });

    let context = ParsingContext {
        page,
        config,
        observer,
    };

    for strategy in plan(hint, config) {
        observer.on_event(&ExtractionEvent::StrategyStarted { strategy });

        let Some(candidate) = strategy.run(&context) else {
            observer.on_event(&ExtractionEvent::NoMatch { strategy });
            continue;
        };

        if let Err(rejection) = validator::check(&candidate.ingredients, &candidate.instructions) {
            observer.on_event(&ExtractionEvent::NotRecipeLike {
                strategy,
                rejection,
            });
            continue;
        }

        observer.on_event(&ExtractionEvent::Accepted { strategy });
        let fallback_name = page.title().unwrap_or_else(|| UNTITLED.to_string());
        return Some(candidate.into_recipe(&fallback_name));
    }

    observer.on_event(&ExtractionEvent::Exhausted);
    None
}
