use super::text::{clean_text, has_class, is_tag, step_text, GroupedList, NoiseFilter};
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use log::debug;
use scraper::{ElementRef, Selector};

/// WP Recipe Maker plugin cards (`.wprm-recipe-container`).
pub struct WprmExtractor;

// Checkbox widgets render a "▢" in front of every ingredient.
const WPRM_NOISE: NoiseFilter = NoiseFilter::with_class_prefixes(&["wprm-checkbox", "wprm-recipe-icon"]);

fn is_group_heading(el: &ElementRef<'_>) -> bool {
    has_class(el, "wprm-recipe-group-name") || is_tag(el, &["h3", "h4", "h5"])
}

const INGREDIENTS: GroupedList = GroupedList {
    is_heading: is_group_heading,
    is_item: |el| is_tag(el, &["li"]) && has_class(el, "wprm-recipe-ingredient"),
};

const INSTRUCTIONS: GroupedList = GroupedList {
    is_heading: is_group_heading,
    is_item: |el| is_tag(el, &["li"]) && has_class(el, "wprm-recipe-instruction"),
};

/// Older cards and theme overrides drop the per-item classes
const ANY_ITEM: GroupedList = GroupedList {
    is_heading: is_group_heading,
    is_item: |el| is_tag(el, &["li"]),
};

impl WprmExtractor {
    fn read_list(
        &self,
        container: ElementRef<'_>,
        list: GroupedList,
        item_text: impl Fn(ElementRef<'_>) -> String + Copy,
    ) -> Vec<String> {
        let items = list.read(container, &WPRM_NOISE, item_text);
        if items.iter().any(|line| !line.ends_with(':')) {
            return items;
        }
        debug!("WprmExtractor: No classed items, falling back to plain list items");
        ANY_ITEM.read(container, &WPRM_NOISE, item_text)
    }
}

fn instruction_text(item: ElementRef<'_>) -> String {
    // The step body sits in its own div next to optional images
    let body = Selector::parse(".wprm-recipe-instruction-text")
        .ok()
        .and_then(|sel| item.select(&sel).next());
    step_text(body.unwrap_or(item), &WPRM_NOISE)
}

impl Extractor for WprmExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("Attempting to extract recipe using WPRM extractor");
        let page = context.page;

        let ingredients = page
            .select_first(".wprm-recipe-ingredients-container")
            .map(|container| {
                self.read_list(container, INGREDIENTS, |el| clean_text(el, &WPRM_NOISE))
            })
            .unwrap_or_default();

        let instructions = page
            .select_first(".wprm-recipe-instructions-container")
            .map(|container| self.read_list(container, INSTRUCTIONS, instruction_text))
            .unwrap_or_default();

        let candidate = Candidate::new(ingredients, instructions);
        if candidate.is_empty() {
            return None;
        }

        Some(match page.first_text(&[".wprm-recipe-name"]) {
            Some(name) => candidate.with_name(name),
            None => candidate,
        })
    }
}
