use super::text::{block_steps, clean_text, is_tag, GroupedList, NoiseFilter};
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use log::debug;

/// Jetpack recipe blocks (`.jetpack-recipe`), also used by Smitten Kitchen.
///
/// Directions are free-form: a step is either a block element or a run of
/// loose text between blocks, often opening with a bold title.
pub struct JetpackExtractor {
    noise: NoiseFilter,
    title_selectors: &'static [&'static str],
}

const GROUPED_ITEMS: GroupedList = GroupedList {
    is_heading: |el| is_tag(el, &["h3", "h4", "h5", "h6"]),
    is_item: |el| is_tag(el, &["li"]),
};

impl JetpackExtractor {
    pub const fn plugin() -> Self {
        Self {
            noise: NoiseFilter::with_class_prefixes(&["jetpack-recipe-print"]),
            title_selectors: &[".jetpack-recipe-title"],
        }
    }

    /// smittenkitchen.com wraps ad slots in `code-block` / `htlad-*` divs
    /// and sometimes leaves the recipe title only on the post header.
    pub const fn smitten_kitchen() -> Self {
        Self {
            noise: NoiseFilter::with_class_prefixes(&[
                "jetpack-recipe-print",
                "code-block",
                "htlad",
                "medrec",
                "sharedaddy",
            ]),
            title_selectors: &[".jetpack-recipe-title", ".entry-title", "h1"],
        }
    }
}

impl Extractor for JetpackExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("Attempting to extract recipe using Jetpack extractor");
        let page = context.page;
        let noise = &self.noise;

        let ingredients = page
            .select_first(".jetpack-recipe-ingredients")
            .map(|container| GROUPED_ITEMS.read(container, noise, |el| clean_text(el, noise)))
            .unwrap_or_default();

        let instructions = page
            .select_first(".jetpack-recipe-directions")
            .map(|container| block_steps(container, noise))
            .unwrap_or_default();

        let candidate = Candidate::new(ingredients, instructions);
        if candidate.is_empty() {
            return None;
        }

        Some(match page.first_text(self.title_selectors) {
            Some(name) => candidate.with_name(name),
            None => candidate,
        })
    }
}
