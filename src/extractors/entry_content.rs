use super::text::normalized_text;
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use crate::validator::contains_measurement;
use log::debug;
use scraper::Selector;

/// Recipes typed straight into a WordPress post body (`.entry-content`)
/// as paragraphs, with "Ingredients" / "Instructions" paragraphs as
/// section markers.
pub struct EntryContentExtractor;

const INGREDIENT_MARKERS: &[&str] = &["ingredients"];
const INSTRUCTION_MARKERS: &[&str] = &["instructions", "method", "directions"];
const FALLBACK_VERBS: &[&str] = &["preheat", "bake", "boil", "mix", "stir", "cook"];

// Longer paragraphs mention "ingredients" in passing rather than opening a section.
const MAX_MARKER_LEN: usize = 60;

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Ingredients,
    Instructions,
}

fn marker(line: &str) -> Option<Section> {
    if line.chars().count() > MAX_MARKER_LEN {
        return None;
    }
    let lower = line.to_lowercase();
    if INGREDIENT_MARKERS.iter().any(|m| lower.contains(m)) {
        Some(Section::Ingredients)
    } else if INSTRUCTION_MARKERS.iter().any(|m| lower.contains(m)) {
        Some(Section::Instructions)
    } else {
        None
    }
}

fn has_digit(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit())
}

fn split_sections(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();
    let mut section = Section::None;

    for line in lines {
        if let Some(next) = marker(line) {
            section = next;
            continue;
        }
        match section {
            Section::Ingredients if has_digit(line) || contains_measurement(line) => {
                ingredients.push(line.clone())
            }
            Section::Instructions => instructions.push(line.clone()),
            _ => {}
        }
    }
    (ingredients, instructions)
}

/// Without section markers, guess line by line
fn guess_lines(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let ingredients: Vec<String> = lines
        .iter()
        .filter(|line| has_digit(line) && contains_measurement(line))
        .cloned()
        .collect();
    let instructions: Vec<String> = lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            FALLBACK_VERBS.iter().any(|verb| lower.contains(verb))
        })
        .cloned()
        .collect();

    if ingredients.is_empty() || instructions.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        (ingredients, instructions)
    }
}

impl Extractor for EntryContentExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        let entry = context.page.select_first(".entry-content")?;
        let paragraph = Selector::parse("p").ok()?;
        let lines: Vec<String> = entry
            .select(&paragraph)
            .map(normalized_text)
            .filter(|line| !line.is_empty())
            .collect();
        debug!("EntryContentExtractor: {} paragraphs in post body", lines.len());

        let (mut ingredients, mut instructions) = split_sections(&lines);
        if ingredients.is_empty() && instructions.is_empty() {
            (ingredients, instructions) = guess_lines(&lines);
        }

        let candidate = Candidate::new(ingredients, instructions);
        (!candidate.is_empty()).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sections_split_on_markers() {
        let (ingredients, instructions) = split_sections(&lines(&[
            "My grandmother made this every winter and we loved all the ingredients she chose.",
            "Ingredients",
            "2 cups flour",
            "a happy heart",
            "1 tsp salt",
            "Method",
            "Mix the flour and salt.",
            "Bake for an hour.",
        ]));
        assert_eq!(ingredients, vec!["2 cups flour", "1 tsp salt"]);
        assert_eq!(instructions, vec!["Mix the flour and salt.", "Bake for an hour."]);
    }

    #[test]
    fn test_guess_without_markers() {
        let (ingredients, instructions) = guess_lines(&lines(&[
            "Hello friends!",
            "3 cups broth",
            "Boil the broth.",
        ]));
        assert_eq!(ingredients, vec!["3 cups broth"]);
        assert_eq!(instructions, vec!["Boil the broth."]);
    }
}
