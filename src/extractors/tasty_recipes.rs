use super::text::{block_steps, clean_text, is_tag, GroupedList, NoiseFilter};
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use crate::page::Page;
use log::debug;
use scraper::ElementRef;

/// Tasty Recipes plugin cards (`.tasty-recipes`).
///
/// Current cards wrap each list in a `-body` div under the section; older
/// cards put the lists directly in the section. The body is tried first.
pub struct TastyRecipesExtractor;

const INGREDIENT_CONTAINERS: &[&str] = &[
    ".tasty-recipes-ingredients-body",
    ".tasty-recipes-ingredients",
];

const INSTRUCTION_CONTAINERS: &[&str] = &[
    ".tasty-recipes-instructions-body",
    ".tasty-recipes-instructions",
];

const TASTY_NOISE: NoiseFilter = NoiseFilter::with_class_prefixes(&["tasty-recipes-button", "tasty-link"]);

const GROUPED_ITEMS: GroupedList = GroupedList {
    is_heading: |el| is_tag(el, &["h3", "h4", "h5", "h6"]),
    is_item: |el| is_tag(el, &["li"]),
};

/// Primary container, then the documented secondary one
fn find_container<'a>(page: &'a Page, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|selector| {
        let found = page.select_first(selector);
        if found.is_some() {
            debug!("TastyRecipesExtractor: Using container {selector}");
        }
        found
    })
}

impl Extractor for TastyRecipesExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("Attempting to extract recipe using Tasty Recipes extractor");
        let page = context.page;

        let ingredients = find_container(page, INGREDIENT_CONTAINERS)
            .map(|container| {
                GROUPED_ITEMS.read(container, &TASTY_NOISE, |el| clean_text(el, &TASTY_NOISE))
            })
            .unwrap_or_default();

        let instructions = find_container(page, INSTRUCTION_CONTAINERS)
            .map(|container| block_steps(container, &TASTY_NOISE))
            .unwrap_or_default();

        let candidate = Candidate::new(ingredients, instructions);
        if candidate.is_empty() {
            return None;
        }

        Some(match page.first_text(&[".tasty-recipes-title"]) {
            Some(name) => candidate.with_name(name),
            None => candidate,
        })
    }
}
