//! Noise-aware text helpers shared by the DOM-walking extractors.
//!
//! Publisher pages interleave ads and embeds inside recipe containers, so
//! every text read here skips noise subtrees instead of reading `.text()`.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Node};

/// Tags whose content is never recipe text
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "ins", "embed", "object", "template", "svg",
    "button", "form",
];

/// Ad wrapper classes matched exactly
const NOISE_CLASSES: &[&str] = &[
    "ad",
    "ads",
    "adsbygoogle",
    "ad-container",
    "ad-wrapper",
    "advertisement",
    "code-block",
    "wprm-recipe-video-container",
    "tasty-recipes-video-embed",
];

/// Ad wrapper class prefixes
const NOISE_CLASS_PREFIXES: &[&str] = &["htlad", "adthrive", "ad-", "mv-ad", "google-ad"];

const NOISE_ID_PREFIXES: &[&str] = &["google_ads", "div-gpt-ad", "ad-"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Leads longer than this are prose, not a step title
const MAX_TITLE_LEN: usize = 80;

/// Decides which elements are advertisement or embed noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseFilter {
    extra_class_prefixes: &'static [&'static str],
}

impl NoiseFilter {
    /// Filter with additional site-specific class prefixes
    pub const fn with_class_prefixes(extra: &'static [&'static str]) -> Self {
        Self {
            extra_class_prefixes: extra,
        }
    }

    pub fn is_noise(&self, element: &Element) -> bool {
        if NOISE_TAGS.contains(&element.name()) {
            return true;
        }
        if element
            .attr("aria-label")
            .is_some_and(|label| label.eq_ignore_ascii_case("advertisement"))
        {
            return true;
        }
        if let Some(id) = element.id() {
            let id = id.to_ascii_lowercase();
            if NOISE_ID_PREFIXES.iter().any(|p| id.starts_with(p)) {
                return true;
            }
        }
        element.classes().any(|class| {
            let class = class.to_ascii_lowercase();
            NOISE_CLASSES.contains(&class.as_str())
                || class.ends_with("-ad")
                || NOISE_CLASS_PREFIXES.iter().any(|p| class.starts_with(p))
                || self.extra_class_prefixes.iter().any(|p| class.starts_with(p))
        })
    }
}

fn is_block(element: &Element) -> bool {
    BLOCK_TAGS.contains(&element.name())
}

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pending work in an explicit-stack tree walk
enum Visit<'a> {
    Enter(NodeRef<'a, Node>),
    /// End of a block element
    Close,
}

// Block boundaries become '\n'; whitespace inside text nodes becomes ' ',
// so source formatting never produces a line break on its own.
// Walks with its own stack: page nesting depth is unbounded.
fn collect(node: NodeRef<'_, Node>, filter: &NoiseFilter, out: &mut String) {
    let mut stack = vec![Visit::Enter(node)];
    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Enter(node) => node,
            Visit::Close => {
                out.push('\n');
                continue;
            }
        };
        match node.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(element) => {
                if filter.is_noise(element) {
                    continue;
                }
                if is_block(element) {
                    out.push('\n');
                    stack.push(Visit::Close);
                }
                stack.extend(node.children().rev().map(Visit::Enter));
            }
            _ => {}
        }
    }
}

fn raw_text(element: ElementRef<'_>, filter: &NoiseFilter) -> String {
    let mut out = String::new();
    collect(*element, filter, &mut out);
    out
}

/// Element text with noise removed, on one line
pub fn clean_text(element: ElementRef<'_>, filter: &NoiseFilter) -> String {
    normalize_spaces(&raw_text(element, filter))
}

/// Element text with the default noise filter
pub fn normalized_text(element: ElementRef<'_>) -> String {
    clean_text(element, &NoiseFilter::default())
}

/// Element text split at block and `<br>` boundaries, empty lines dropped
pub fn text_lines(element: ElementRef<'_>, filter: &NoiseFilter) -> Vec<String> {
    raw_text(element, filter)
        .split('\n')
        .map(normalize_spaces)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_blank(node: &NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Text(text) => text.trim().is_empty(),
        Node::Comment(_) => true,
        _ => false,
    }
}

fn nodes_text(nodes: &[NodeRef<'_, Node>], filter: &NoiseFilter) -> String {
    let mut out = String::new();
    for node in nodes {
        collect(*node, filter, &mut out);
    }
    normalize_spaces(&out)
}

/// Join a run of sibling nodes into one step.
///
/// A run that opens with a short `<b>`/`<strong>` lead followed by prose
/// becomes `"<title>: <description>"`; anything else is read as-is.
pub fn step_from_nodes(nodes: &[NodeRef<'_, Node>], filter: &NoiseFilter) -> String {
    let mut rest = nodes.iter().skip_while(|n| is_blank(n));
    let Some(first) = rest.next() else {
        return String::new();
    };

    let lead = ElementRef::wrap(*first)
        .filter(|el| matches!(el.value().name(), "b" | "strong"))
        .map(|el| clean_text(el, filter));

    match lead {
        Some(title) if !title.is_empty() && title.chars().count() <= MAX_TITLE_LEN => {
            let remaining: Vec<_> = rest.copied().collect();
            let description = nodes_text(&remaining, filter);
            if description.is_empty() {
                return title;
            }
            let title = title.trim_end_matches(':').trim_end();
            let description = description.trim_start_matches(':').trim_start();
            format!("{title}: {description}")
        }
        _ => nodes_text(nodes, filter),
    }
}

/// A single block read as one step, honoring a bold title lead
pub fn step_text(element: ElementRef<'_>, filter: &NoiseFilter) -> String {
    let children: Vec<_> = element.children().collect();
    step_from_nodes(&children, filter)
}

/// Reads a list container whose items may be split into named groups.
#[derive(Clone, Copy)]
pub struct GroupedList {
    pub is_heading: fn(&ElementRef<'_>) -> bool,
    pub is_item: fn(&ElementRef<'_>) -> bool,
}

impl GroupedList {
    /// Emit items in document order. A heading becomes a `"<name>:"` line and
    /// the items that follow it are prefixed with `"- "`.
    pub fn read(
        &self,
        container: ElementRef<'_>,
        filter: &NoiseFilter,
        item_text: impl Fn(ElementRef<'_>) -> String,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut grouped = false;
        let mut stack = child_elements_rev(container);

        while let Some(child) = stack.pop() {
            if filter.is_noise(child.value()) {
                continue;
            }
            if (self.is_heading)(&child) {
                let heading = clean_text(child, filter);
                let heading = heading.trim_end_matches(':').trim_end();
                if !heading.is_empty() && !is_section_title(heading) {
                    lines.push(format!("{heading}:"));
                    grouped = true;
                }
            } else if (self.is_item)(&child) {
                let text = item_text(child);
                if !text.is_empty() {
                    if grouped {
                        lines.push(format!("- {text}"));
                    } else {
                        lines.push(text);
                    }
                }
            } else {
                stack.extend(child_elements_rev(child));
            }
        }
        lines
    }
}

/// Child elements last-first, ready to be pushed on a walk stack
fn child_elements_rev(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element.children().rev().filter_map(ElementRef::wrap).collect()
}

/// Headings such as "Ingredients" that name the whole section, not a group
pub fn is_section_title(text: &str) -> bool {
    const TITLES: &[&str] = &[
        "ingredients", "instructions", "directions", "method", "steps", "preparation",
    ];
    let text = text.trim().trim_end_matches(':').trim().to_lowercase();
    TITLES.contains(&text.as_str())
}

/// Split a free-form directions container into steps.
///
/// Block children (`p`, `li`, nested lists and wrappers) are steps of their
/// own; loose text and inline elements between blocks form one step per run.
pub fn block_steps(container: ElementRef<'_>, filter: &NoiseFilter) -> Vec<String> {
    let mut steps = Vec::new();
    collect_steps(container, filter, &mut steps);
    steps
}

fn flush_run(run: &mut Vec<NodeRef<'_, Node>>, filter: &NoiseFilter, steps: &mut Vec<String>) {
    let step = step_from_nodes(run, filter);
    if !step.is_empty() {
        steps.push(step);
    }
    run.clear();
}

// Wrapper divs are descended with an explicit stack; `Close` marks the end
// of a wrapper, where its trailing loose run becomes a step.
fn collect_steps(container: ElementRef<'_>, filter: &NoiseFilter, steps: &mut Vec<String>) {
    let mut run: Vec<NodeRef<'_, Node>> = Vec::new();
    let mut stack: Vec<Visit<'_>> = container.children().rev().map(Visit::Enter).collect();

    while let Some(visit) = stack.pop() {
        let child = match visit {
            Visit::Enter(child) => child,
            Visit::Close => {
                flush_run(&mut run, filter, steps);
                continue;
            }
        };
        let Some(element) = ElementRef::wrap(child) else {
            if child.value().is_text() {
                run.push(child);
            }
            continue;
        };
        if filter.is_noise(element.value()) {
            continue;
        }
        if !is_block(element.value()) {
            run.push(child);
            continue;
        }

        flush_run(&mut run, filter, steps);
        match element.value().name() {
            "br" | "hr" => {}
            "ul" | "ol" => {
                for item in element.child_elements().filter(|el| is_tag(el, &["li"])) {
                    if !filter.is_noise(item.value()) {
                        let step = step_text(item, filter);
                        if !step.is_empty() {
                            steps.push(step);
                        }
                    }
                }
            }
            "div" | "section" | "article" => {
                stack.push(Visit::Close);
                stack.extend(child.children().rev().map(Visit::Enter));
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let heading = clean_text(element, filter);
                let heading = heading.trim_end_matches(':').trim_end();
                if !heading.is_empty() && !is_section_title(heading) {
                    steps.push(format!("{heading}:"));
                }
            }
            _ => {
                let step = step_text(element, filter);
                if !step.is_empty() {
                    steps.push(step);
                }
            }
        }
    }
    flush_run(&mut run, filter, steps);
}

pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub fn is_tag(element: &ElementRef<'_>, names: &[&str]) -> bool {
    names.contains(&element.value().name())
}
