pub mod html;
pub mod url;

use std::fmt;

use serde::Deserialize;

use crate::classifier::StrategyHint;
use crate::config::EngineConfig;
use crate::extractors::{
    EntryContentExtractor, Extractor, HeuristicExtractor, JetpackExtractor, JsonLdExtractor,
    KeywordContainerExtractor, MicroDataExtractor, ParsingContext, TastyRecipesExtractor,
    WprmExtractor,
};
use crate::model::Candidate;

/// Every way the engine knows to pull a recipe out of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SmittenKitchen,
    Wprm,
    TastyRecipes,
    Jetpack,
    StructuredData,
    Heuristic,
    KeywordContainer,
    EntryContent,
}

/// The strategies that apply to any page, in the names used by config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericStrategy {
    StructuredData,
    Heuristic,
    KeywordContainer,
    EntryContent,
}

impl From<GenericStrategy> for Strategy {
    fn from(strategy: GenericStrategy) -> Self {
        match strategy {
            GenericStrategy::StructuredData => Strategy::StructuredData,
            GenericStrategy::Heuristic => Strategy::Heuristic,
            GenericStrategy::KeywordContainer => Strategy::KeywordContainer,
            GenericStrategy::EntryContent => Strategy::EntryContent,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::SmittenKitchen => "smitten_kitchen",
            Strategy::Wprm => "wprm",
            Strategy::TastyRecipes => "tasty_recipes",
            Strategy::Jetpack => "jetpack",
            Strategy::StructuredData => "structured_data",
            Strategy::Heuristic => "heuristic",
            Strategy::KeywordContainer => "keyword_container",
            Strategy::EntryContent => "entry_content",
        };
        f.write_str(name)
    }
}

impl Strategy {
    fn site_specific(hint: StrategyHint) -> Option<Self> {
        match hint {
            StrategyHint::SmittenKitchen => Some(Strategy::SmittenKitchen),
            StrategyHint::Wprm => Some(Strategy::Wprm),
            StrategyHint::TastyRecipes => Some(Strategy::TastyRecipes),
            StrategyHint::Jetpack => Some(Strategy::Jetpack),
            StrategyHint::Generic => None,
        }
    }

    /// Run this strategy against the page in `context`
    pub fn run(self, context: &ParsingContext) -> Option<Candidate> {
        match self {
            Strategy::SmittenKitchen => JetpackExtractor::smitten_kitchen().parse(context),
            Strategy::Wprm => WprmExtractor.parse(context),
            Strategy::TastyRecipes => TastyRecipesExtractor.parse(context),
            Strategy::Jetpack => JetpackExtractor::plugin().parse(context),
            Strategy::StructuredData => JsonLdExtractor
                .parse(context)
                .or_else(|| MicroDataExtractor.parse(context)),
            Strategy::Heuristic => HeuristicExtractor.parse(context),
            Strategy::KeywordContainer => KeywordContainerExtractor.parse(context),
            Strategy::EntryContent => EntryContentExtractor.parse(context),
        }
    }
}

/// The hinted site strategy, if any, followed by the configured generic order
pub fn plan(hint: StrategyHint, config: &EngineConfig) -> Vec<Strategy> {
    Strategy::site_specific(hint)
        .into_iter()
        .chain(config.generic_order.iter().copied().map(Strategy::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_plan_uses_default_order() {
        let config = EngineConfig::default();
        assert_eq!(
            plan(StrategyHint::Generic, &config),
            vec![
                Strategy::StructuredData,
                Strategy::Heuristic,
                Strategy::KeywordContainer,
                Strategy::EntryContent,
            ]
        );
    }

    #[test]
    fn test_site_strategy_goes_first() {
        let config = EngineConfig {
            generic_order: vec![GenericStrategy::Heuristic],
            ..EngineConfig::default()
        };
        assert_eq!(
            plan(StrategyHint::TastyRecipes, &config),
            vec![Strategy::TastyRecipes, Strategy::Heuristic]
        );
    }

    #[test]
    fn test_display_matches_config_names() {
        assert_eq!(Strategy::KeywordContainer.to_string(), "keyword_container");
        assert_eq!(Strategy::SmittenKitchen.to_string(), "smitten_kitchen");
    }
}
