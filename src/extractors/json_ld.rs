use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use crate::observer::ExtractionEvent;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

/// Reads schema.org `Recipe` objects from `application/ld+json` blocks.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_candidate(&self, json_ld_recipe: JsonLdRecipe) -> Candidate {
        let ingredients = json_ld_recipe
            .recipe_ingredient
            .or(json_ld_recipe.ingredients)
            .map(|ingredients| match ingredients {
                RecipeIngredients::Strings(items) => items,
                RecipeIngredients::String(item) => vec![item],
                RecipeIngredients::Other(_) => Vec::new(),
            })
            .unwrap_or_default()
            .iter()
            .map(|ing| decode_html_symbols(ing))
            .filter(|ing| !ing.is_empty())
            .collect();

        let mut instructions = Vec::new();
        if let Some(recipe_instructions) = json_ld_recipe.recipe_instructions {
            match recipe_instructions {
                RecipeInstructions::String(text) => push_text_lines(&text, &mut instructions),
                RecipeInstructions::Multiple(entries) => {
                    for entry in &entries {
                        flatten_instruction(entry, &mut instructions);
                    }
                }
                RecipeInstructions::Single(entry) => flatten_instruction(&entry, &mut instructions),
                RecipeInstructions::Other(_) => {}
            }
        }

        let candidate = Candidate::new(ingredients, instructions);
        match json_ld_recipe.name {
            Some(name) => candidate.with_name(decode_html_symbols(&name)),
            None => candidate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Option<RecipeIngredients>,
    /// Pre-2015 schema.org spelling
    #[serde(default)]
    ingredients: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: Option<RecipeInstructions>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    String(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<InstructionEntry>),
    Single(InstructionEntry),
    Other(IgnoredAny),
}

// Sections must come before steps: every step field is optional, so a
// step would match a section object too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionEntry {
    Text(String),
    Section(HowToSection),
    Step(HowToStep),
    Nested(Vec<InstructionEntry>),
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionEntry>,
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

fn flatten_instruction(entry: &InstructionEntry, out: &mut Vec<String>) {
    match entry {
        InstructionEntry::Text(text) => push_step(text, out),
        InstructionEntry::Section(section) => {
            for item in &section.item_list_element {
                flatten_instruction(item, out);
            }
        }
        // Prefer text over name
        InstructionEntry::Step(step) => {
            if let Some(text) = step.text.as_ref().or(step.name.as_ref()) {
                push_step(text, out);
            }
        }
        InstructionEntry::Nested(entries) => {
            for item in entries {
                flatten_instruction(item, out);
            }
        }
    }
}

// One list entry is one step, whatever line breaks its text carries
fn push_step(text: &str, out: &mut Vec<String>) {
    let step = decode_html_symbols(text);
    if !step.is_empty() {
        out.push(step);
    }
}

/// A bare string holding every step, one per line
fn push_text_lines(text: &str, out: &mut Vec<String>) {
    out.extend(
        text.lines()
            .map(decode_html_symbols)
            .filter(|line| !line.is_empty()),
    );
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Array(items) => items.into_iter().find_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        }),
        _ => None,
    })
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn is_recipe_like_object(value: &Value) -> bool {
    value.is_object() && (is_recipe_type(value) || value.get("recipeInstructions").is_some())
}

/// First recipe object in a parsed block: the root, a list entry, or a `@graph` entry
fn find_recipe(json_ld: &Value) -> Option<&Value> {
    match json_ld {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(_) if is_recipe_like_object(json_ld) => Some(json_ld),
        Value::Object(_) => json_ld
            .get("@graph")
            .and_then(Value::as_array)
            .and_then(|graph| graph.iter().find(|item| is_recipe_like_object(item))),
        _ => None,
    }
}

// Raw control characters inside strings are invalid JSON but common in the
// wild; outside strings they are plain whitespace either way.
fn sanitize_json(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.page.url());
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;

        for (index, script) in context.page.document().select(&selector).enumerate() {
            let raw_json = script.text().collect::<String>();
            if raw_json.trim().is_empty() {
                continue;
            }

            let json_ld = match serde_json::from_str::<Value>(&sanitize_json(&raw_json)) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    context.observer.on_event(&ExtractionEvent::ParseSkip {
                        reason: format!("JSON-LD block {index}: {e}"),
                    });
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD block {index}");
                continue;
            };

            match JsonLdRecipe::try_from(recipe) {
                Ok(recipe) => {
                    let candidate = self.convert_to_candidate(recipe);
                    if candidate.is_empty() {
                        debug!("JsonLdExtractor: Recipe in block {index} has no content");
                        continue;
                    }
                    return Some(candidate);
                }
                Err(e) => {
                    context.observer.on_event(&ExtractionEvent::ParseSkip {
                        reason: format!("JSON-LD recipe in block {index}: {e}"),
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::observer::{NullObserver, RecordingObserver};
    use crate::page::Page;

    fn parse_with(html: &str, observer: &dyn crate::observer::ExtractionObserver) -> Option<Candidate> {
        let page = Page::parse("https://example.com/recipe", html);
        let config = EngineConfig::default();
        let context = ParsingContext {
            page: &page,
            config: &config,
            observer,
        };
        JsonLdExtractor.parse(&context)
    }

    fn page_with(json: &str) -> String {
        format!(
            r#"<html><head><script type="application/ld+json">{json}</script></head><body></body></html>"#
        )
    }

    #[test]
    fn test_how_to_sections_flatten_in_order() {
        let html = page_with(
            r#"{
                "@context": "https://schema.org",
                "@type": "Recipe",
                "name": "Lasagna",
                "recipeIngredient": ["9 noodles", "2 cups ricotta"],
                "recipeInstructions": [
                    {"@type": "HowToSection", "name": "Sauce", "itemListElement": [
                        {"@type": "HowToStep", "text": "Simmer the tomatoes."},
                        {"@type": "HowToStep", "text": "Stir in basil."}
                    ]},
                    {"@type": "HowToSection", "name": "Assembly", "itemListElement": [
                        {"@type": "HowToStep", "name": "Layer everything."}
                    ]}
                ]
            }"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Lasagna"));
        assert_eq!(
            candidate.instructions,
            vec!["Simmer the tomatoes.", "Stir in basil.", "Layer everything."]
        );
    }

    #[test]
    fn test_single_string_instructions_and_entities() {
        let html = page_with(
            r#"{"@type": "recipe", "name": "Mac &amp;amp; Cheese",
                "recipeIngredient": "1 lb macaroni",
                "recipeInstructions": "Boil the pasta."}"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Mac & Cheese"));
        assert_eq!(candidate.ingredients, vec!["1 lb macaroni"]);
        assert_eq!(candidate.instructions, vec!["Boil the pasta."]);
    }

    #[test]
    fn test_line_breaks_inside_a_step_stay_in_that_step() {
        let html = page_with(
            r#"{"@type": "Recipe", "name": "Omelette",
                "recipeIngredient": ["3 eggs", "2 tbsp milk"],
                "recipeInstructions": [
                    {"@type": "HowToStep", "text": "Whisk the eggs.\nAdd the milk."},
                    "Heat the pan.\n  Add butter.",
                    {"@type": "HowToStep", "text": "\n"}
                ]}"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert_eq!(
            candidate.instructions,
            vec!["Whisk the eggs. Add the milk.", "Heat the pan. Add butter."]
        );

        let html = page_with(
            r#"{"@type": "Recipe", "name": "Omelette",
                "recipeInstructions": "Whisk the eggs.\nCook gently."}"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert_eq!(candidate.instructions, vec!["Whisk the eggs.", "Cook gently."]);
    }

    #[test]
    fn test_graph_and_type_array() {
        let html = page_with(
            r#"{"@context": "https://schema.org", "@graph": [
                {"@type": "WebPage", "name": "Page"},
                {"@type": ["Recipe", "NewsArticle"], "name": "Chili",
                 "recipeIngredient": ["1 can beans"],
                 "recipeInstructions": [{"@type": "HowToStep", "text": "Cook slowly."}]}
            ]}"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Chili"));
        assert_eq!(candidate.instructions, vec!["Cook slowly."]);
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{ "@type": "Recipe", "name": </script>
            <script type="application/ld+json">{"@type": "Recipe", "name": "Toast",
                "recipeIngredient": ["2 slices bread"], "recipeInstructions": ["Grill the bread."]}</script>
            </head></html>"#;
        let observer = RecordingObserver::new();
        let candidate = parse_with(html, &observer).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Toast"));
        assert!(observer
            .events()
            .iter()
            .any(|e| matches!(e, ExtractionEvent::ParseSkip { .. })));
    }

    #[test]
    fn test_missing_ingredients_yield_empty_list() {
        let html = page_with(
            r#"{"@type": "Recipe", "name": "Water", "recipeInstructions": ["Boil water."]}"#,
        );
        let candidate = parse_with(&html, &NullObserver).unwrap();
        assert!(candidate.ingredients.is_empty());
        assert_eq!(candidate.instructions, vec!["Boil water."]);
    }

    #[test]
    fn test_non_recipe_blocks_return_none() {
        let html = page_with(r#"{"@type": "Organization", "name": "Food Blog"}"#);
        assert!(parse_with(&html, &NullObserver).is_none());
    }
}
