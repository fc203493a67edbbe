use super::text::{clean_text, step_text, NoiseFilter};
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use log::debug;
use scraper::{ElementRef, Selector};

/// Reads schema.org `Recipe` microdata (`itemscope`/`itemprop` attributes).
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a scraper::Html) -> Option<ElementRef<'a>> {
        // Look for elements with itemscope and itemtype containing "Recipe"
        let selector = Selector::parse("[itemscope][itemtype]").ok()?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe") || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Properties that belong to `root` itself, not to a nested item such as the author
    fn own_props<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        let Ok(selector) = Selector::parse(&format!("[itemprop='{prop}']")) else {
            return Vec::new();
        };
        root.select(&selector)
            .filter(|el| nearest_scope(*el).map(|scope| scope.id()) == Some(root.id()))
            .collect()
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str, filter: &NoiseFilter) -> Option<String> {
        self.own_props(root, prop).into_iter().find_map(|el| {
            let text = el
                .value()
                .attr("content")
                .map(str::to_string)
                .unwrap_or_else(|| clean_text(el, filter));
            (!text.trim().is_empty()).then(|| text.trim().to_string())
        })
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str, filter: &NoiseFilter) -> Vec<String> {
        self.own_props(root, prop)
            .into_iter()
            .map(|el| clean_text(el, filter))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Instructions are either one element per step or a single container of steps
    fn get_instructions(&self, root: ElementRef, prop: &str, filter: &NoiseFilter) -> Vec<String> {
        let Ok(step_selector) = Selector::parse("li, p") else {
            return Vec::new();
        };
        let mut steps = Vec::new();
        for el in self.own_props(root, prop) {
            let inner: Vec<_> = el
                .select(&step_selector)
                .filter(|step| !inside_other_step(*step, el))
                .collect();
            if inner.is_empty() {
                steps.push(step_text(el, filter));
            } else {
                steps.extend(inner.into_iter().map(|step| step_text(step, filter)));
            }
        }
        steps.retain(|step| !step.is_empty());
        steps
    }
}

/// True for a `p` inside an `li` (or similar), which belongs to the outer step
fn inside_other_step(step: ElementRef<'_>, container: ElementRef<'_>) -> bool {
    step.ancestors()
        .take_while(|node| node.id() != container.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| matches!(ancestor.value().name(), "li" | "p"))
}

/// Closest ancestor (excluding the element itself) that opens an item scope
fn nearest_scope(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().attr("itemscope").is_some())
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Global itemprop searches pick up site titles and author bios, so
        // everything is scoped to a Recipe item.
        let container = self.find_recipe_container(context.page.document())?;
        let filter = NoiseFilter::default();

        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient", &filter);
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients", &filter);
        }

        let mut instructions = self.get_instructions(container, "recipeInstructions", &filter);
        if instructions.is_empty() {
            instructions = self.get_instructions(container, "instructions", &filter);
        }

        let candidate = Candidate::new(ingredients, instructions);
        if candidate.is_empty() {
            return None;
        }

        Some(match self.get_itemprop(container, "name", &filter) {
            Some(name) => candidate.with_name(name),
            None => candidate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::observer::NullObserver;
    use crate::page::Page;

    #[test]
    fn test_microdata_recipe() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Recipe">
            <h2 itemprop="name">Garlic Bread</h2>
            <div itemprop="author" itemscope itemtype="https://schema.org/Person">
                <span itemprop="name">Jamie</span>
            </div>
            <ul>
                <li itemprop="recipeIngredient">1 loaf bread</li>
                <li itemprop="recipeIngredient">4 cloves garlic</li>
                <li itemprop="recipeIngredient">4 tbsp butter</li>
            </ul>
            <ol itemprop="recipeInstructions">
                <li>Mix garlic and butter.</li>
                <li><strong>Bake</strong> at 400F for 10 minutes.</li>
            </ol>
        </div>"#;
        let page = Page::parse("https://example.com/bread", html);
        let config = EngineConfig::default();
        let context = ParsingContext {
            page: &page,
            config: &config,
            observer: &NullObserver,
        };

        let candidate = MicroDataExtractor.parse(&context).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Garlic Bread"));
        assert_eq!(candidate.ingredients.len(), 3);
        assert_eq!(
            candidate.instructions,
            vec!["Mix garlic and butter.", "Bake: at 400F for 10 minutes."]
        );
    }

    #[test]
    fn test_paragraphs_inside_list_items_are_one_step() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Recipe">
            <span itemprop="recipeIngredient">2 cups flour</span>
            <ol itemprop="recipeInstructions">
                <li><p>Mix the batter.</p></li>
                <li><p>Bake for 20 minutes.</p></li>
            </ol>
        </div>"#;
        let page = Page::parse("https://example.com/cake", html);
        let config = EngineConfig::default();
        let context = ParsingContext {
            page: &page,
            config: &config,
            observer: &NullObserver,
        };

        let candidate = MicroDataExtractor.parse(&context).unwrap();
        assert_eq!(
            candidate.instructions,
            vec!["Mix the batter.", "Bake for 20 minutes."]
        );
    }

    #[test]
    fn test_no_recipe_scope() {
        let html = r#"<div itemscope itemtype="https://schema.org/Article"><span itemprop="name">News</span></div>"#;
        let page = Page::parse("https://example.com", html);
        let config = EngineConfig::default();
        let context = ParsingContext {
            page: &page,
            config: &config,
            observer: &NullObserver,
        };
        assert!(MicroDataExtractor.parse(&context).is_none());
    }
}
