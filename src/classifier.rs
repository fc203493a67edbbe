//! Picks the site-specific strategy for a page, if any.
//!
//! Rules run in a fixed order and the first match wins. Each rule keys off a
//! fingerprint no other rule uses, so at most one can match in practice.

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyHint {
    SmittenKitchen,
    Wprm,
    TastyRecipes,
    Jetpack,
    Generic,
}

/// (URL token, hint)
const DOMAIN_RULES: &[(&str, StrategyHint)] = &[("smittenkitchen.com", StrategyHint::SmittenKitchen)];

/// (marker selector, hint)
const MARKER_RULES: &[(&str, StrategyHint)] = &[
    (".wprm-recipe-container", StrategyHint::Wprm),
    (".tasty-recipes", StrategyHint::TastyRecipes),
    (".jetpack-recipe", StrategyHint::Jetpack),
];

pub fn classify(page: &Page) -> StrategyHint {
    let url = page.url().to_lowercase();
    if let Some((_, hint)) = DOMAIN_RULES.iter().find(|(token, _)| url.contains(token)) {
        return *hint;
    }

    MARKER_RULES
        .iter()
        .find(|(selector, _)| page.has(selector))
        .map(|(_, hint)| *hint)
        .unwrap_or(StrategyHint::Generic)
}
