use super::text::{is_tag, normalized_text, text_lines, NoiseFilter};
use super::{Extractor, ParsingContext};
use crate::model::Candidate;
use crate::validator::{contains_measurement, is_recipe_like};
use log::debug;
use scraper::{ElementRef, Selector};

/// Template-free extraction from list and heading structure.
///
/// Ingredient lists are `<ul>`s dominated by measurement units; instruction
/// lists come from `<ol>`s, instruction-classed containers, or the
/// paragraphs after an "Instructions" heading. The first ingredient and
/// instruction pair that passes the recipe-likeness gate wins.
pub struct HeuristicExtractor;

const HEADING_TAGS: &[&str] = &["h2", "h3", "strong", "span", "b"];
const HEADING_KEYWORDS: &[&str] = &["instructions", "directions", "method"];
/// Nodes read when testing whether an element is a heading
const MAX_HEADING_NODES: usize = 64;
const INSTRUCTION_CONTAINERS: &str = "div[class*='instruction'], div[class*='direction'], \
     section[class*='instruction'], section[class*='direction']";

fn list_items(list: ElementRef<'_>) -> Vec<String> {
    let Ok(li) = Selector::parse("li") else {
        return Vec::new();
    };
    list.select(&li)
        .map(normalized_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn select_all<'a>(root: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => root.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Every `<ul>` where more than half of the items name a unit
pub fn ingredient_candidates(root: ElementRef<'_>) -> Vec<Vec<String>> {
    select_all(root, "ul")
        .into_iter()
        .map(list_items)
        .filter(|items| {
            let hits = items.iter().filter(|item| contains_measurement(item)).count();
            !items.is_empty() && hits * 2 > items.len()
        })
        .collect()
}

/// Instruction lists by decreasing confidence; a later source is only
/// consulted when every earlier one came up empty.
pub fn instruction_candidates(root: ElementRef<'_>, heading_scan_limit: usize) -> Vec<Vec<String>> {
    let ordered: Vec<_> = select_all(root, "ol")
        .into_iter()
        .map(list_items)
        .filter(|steps| steps.len() > 2)
        .collect();
    if !ordered.is_empty() {
        return ordered;
    }

    let filter = NoiseFilter::default();
    let classed: Vec<_> = select_all(root, INSTRUCTION_CONTAINERS)
        .into_iter()
        .map(|container| text_lines(container, &filter))
        .filter(|lines| lines.len() > 2)
        .collect();
    if !classed.is_empty() {
        return classed;
    }

    after_headings(root, heading_scan_limit)
}

// Headings are short, so only the first few nodes under a candidate are read;
// `span` candidates can wrap the rest of the page.
fn heading_text(element: &ElementRef<'_>) -> String {
    element
        .descendants()
        .take(MAX_HEADING_NODES)
        .filter_map(|node| node.value().as_text().map(|text| text.to_lowercase()))
        .collect()
}

fn after_headings(root: ElementRef<'_>, limit: usize) -> Vec<Vec<String>> {
    let elements: Vec<ElementRef<'_>> = root.descendants().filter_map(ElementRef::wrap).collect();
    let mut candidates = Vec::new();

    for keyword in HEADING_KEYWORDS {
        let Some(position) = elements.iter().position(|el| {
            is_tag(el, HEADING_TAGS) && heading_text(el).contains(keyword)
        }) else {
            continue;
        };

        let steps: Vec<String> = elements[position + 1..]
            .iter()
            .filter(|el| is_tag(el, &["p", "li"]))
            .take(limit)
            .map(|el| normalized_text(*el))
            .filter(|text| !text.is_empty())
            .collect();
        if steps.len() >= 2 {
            debug!("HeuristicExtractor: {} steps after a '{keyword}' heading", steps.len());
            candidates.push(steps);
        }
    }
    candidates
}

impl HeuristicExtractor {
    /// Run the heuristic on one subtree of the page
    pub fn extract_from(&self, root: ElementRef<'_>, heading_scan_limit: usize) -> Option<Candidate> {
        let ingredient_lists = ingredient_candidates(root);
        if ingredient_lists.is_empty() {
            return None;
        }
        let instruction_lists = instruction_candidates(root, heading_scan_limit);

        for ingredients in &ingredient_lists {
            for instructions in &instruction_lists {
                if is_recipe_like(ingredients, instructions) {
                    return Some(Candidate::new(ingredients.clone(), instructions.clone()));
                }
            }
        }
        None
    }
}

impl Extractor for HeuristicExtractor {
    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("Attempting to extract recipe using list heuristics");
        self.extract_from(context.page.root(), context.config.heading_scan_limit)
    }
}
