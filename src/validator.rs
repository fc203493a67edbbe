//! Recipe-likeness gate shared by every extraction strategy.
//!
//! A candidate passes when at least 30% of its instruction lines mention a
//! cooking verb and at least 30% of its ingredient lines mention a unit of
//! measurement. Both lists must be non-empty.

/// Verbs looked up as substrings, so "stirring" and "baked" both count.
pub const COOKING_VERBS: &[&str] = &[
    "bake", "boil", "simmer", "stir", "mix", "cook", "grill", "saute", "whisk", "marinate",
    "roast",
];

/// Units looked up as whole words after splitting on anything that is not a letter.
pub const MEASUREMENT_UNITS: &[&str] = &[
    "cup", "cups", "tbsp", "tbs", "tablespoon", "tablespoons", "tsp", "teaspoon",
    "teaspoons", "oz", "ounce", "ounces", "pound", "pounds", "lb", "lbs", "g", "gram",
    "grams", "kg", "ml", "l", "liter", "liters", "litre", "litres", "pinch", "clove",
    "cloves", "bunch", "slice", "slices", "quart", "pint",
];

/// Units that are also everyday words; they only count right after a quantity
pub const QUANTITY_UNITS: &[&str] = &["can", "cans", "stick", "sticks", "dash", "dashes"];

// 30% expressed as a ratio so the comparison stays exact.
const MIN_NUMERATOR: usize = 3;
const MIN_DENOMINATOR: usize = 10;

/// Fractions of lines that matched each lexical cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeScore {
    pub ingredients: f64,
    pub instructions: f64,
}

/// Why a candidate was turned away
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    MissingIngredients,
    MissingInstructions,
    LowIngredientScore(RecipeScore),
    LowInstructionScore(RecipeScore),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::MissingIngredients => write!(f, "no ingredients"),
            Rejection::MissingInstructions => write!(f, "no instructions"),
            Rejection::LowIngredientScore(s) => {
                write!(f, "ingredient score {:.2} below 0.30", s.ingredients)
            }
            Rejection::LowInstructionScore(s) => {
                write!(f, "instruction score {:.2} below 0.30", s.instructions)
            }
        }
    }
}

pub fn contains_cooking_verb(line: &str) -> bool {
    let lower = line.to_lowercase();
    COOKING_VERBS.iter().any(|verb| lower.contains(verb))
}

pub fn contains_measurement(line: &str) -> bool {
    let mut word = String::new();
    let mut after_quantity = false;

    for c in line.chars().chain(std::iter::once(' ')) {
        if c.is_alphabetic() {
            word.extend(c.to_lowercase());
            continue;
        }
        if !word.is_empty() {
            if MEASUREMENT_UNITS.contains(&word.as_str())
                || (after_quantity && QUANTITY_UNITS.contains(&word.as_str()))
            {
                return true;
            }
            word.clear();
            after_quantity = false;
        }
        if c.is_numeric() {
            after_quantity = true;
        }
    }
    false
}

fn count_matching<S: AsRef<str>>(lines: &[S], pred: fn(&str) -> bool) -> usize {
    lines.iter().filter(|line| pred(line.as_ref())).count()
}

fn meets_threshold(matched: usize, total: usize) -> bool {
    matched * MIN_DENOMINATOR >= total * MIN_NUMERATOR
}

fn fraction(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

/// Score a candidate, returning the reason when it is not recipe-like.
pub fn check<S: AsRef<str>>(ingredients: &[S], instructions: &[S]) -> Result<RecipeScore, Rejection> {
    if ingredients.is_empty() {
        return Err(Rejection::MissingIngredients);
    }
    if instructions.is_empty() {
        return Err(Rejection::MissingInstructions);
    }

    let verb_hits = count_matching(instructions, contains_cooking_verb);
    let unit_hits = count_matching(ingredients, contains_measurement);
    let score = RecipeScore {
        ingredients: fraction(unit_hits, ingredients.len()),
        instructions: fraction(verb_hits, instructions.len()),
    };

    if !meets_threshold(verb_hits, instructions.len()) {
        return Err(Rejection::LowInstructionScore(score));
    }
    if !meets_threshold(unit_hits, ingredients.len()) {
        return Err(Rejection::LowIngredientScore(score));
    }
    Ok(score)
}

pub fn is_recipe_like<S: AsRef<str>>(ingredients: &[S], instructions: &[S]) -> bool {
    check(ingredients, instructions).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_lists_are_rejected() {
        let some = lines(&["1 cup flour", "Bake it"]);
        let none: Vec<String> = Vec::new();
        assert!(!is_recipe_like(&none, &some));
        assert!(!is_recipe_like(&some, &none));
        assert!(!is_recipe_like(&none, &none));
        assert_eq!(check(&none, &some), Err(Rejection::MissingIngredients));
        assert_eq!(check(&some, &none), Err(Rejection::MissingInstructions));
    }

    #[test]
    fn test_units_match_whole_words() {
        assert!(contains_measurement("1 cup flour"));
        assert!(contains_measurement("200g butter"));
        assert!(contains_measurement("1/2 Tsp. salt"));
        assert!(contains_measurement("2 cloves garlic"));
        assert!(!contains_measurement("2 eggs"));
        assert!(!contains_measurement("salt and pepper to taste"));
        assert!(!contains_measurement("Delicious globe artichoke"));
    }

    #[test]
    fn test_everyday_word_units_need_a_quantity() {
        assert!(contains_measurement("1 can chickpeas"));
        assert!(contains_measurement("2 (15 oz.) cans black beans"));
        assert!(contains_measurement("½ stick butter"));
        assert!(contains_measurement("3 dashes hot sauce"));
        assert!(!contains_measurement("add more if you can"));
        assert!(!contains_measurement("stick to the pan"));
        assert!(!contains_measurement("a dash of nutmeg"));

        let ingredients = ["add more if you can", "eggs", "salt"];
        let instructions = ["Whisk the eggs.", "Season well."];
        assert!(matches!(
            check(&ingredients, &instructions),
            Err(Rejection::LowIngredientScore(_))
        ));
    }

    #[test]
    fn test_verbs_match_substrings() {
        assert!(contains_cooking_verb("Stirring constantly, add the milk"));
        assert!(contains_cooking_verb("BAKE for 20 minutes"));
        assert!(!contains_cooking_verb("Serve warm."));
    }

    #[test]
    fn test_low_ingredient_score_rejects() {
        // 2 of 10 lines mention a unit
        let ingredients = lines(&[
            "1 cup flour", "2 tsp sugar", "eggs", "milk", "butter", "salt", "vanilla",
            "berries", "lemon", "honey",
        ]);
        let instructions = lines(&["Mix everything", "Bake until golden", "Cool"]);
        assert!(matches!(
            check(&ingredients, &instructions),
            Err(Rejection::LowIngredientScore(_))
        ));
        match check(&ingredients, &instructions) {
            Err(Rejection::LowIngredientScore(score)) => {
                assert!((score.ingredients - 0.2).abs() < f64::EPSILON)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // exactly 3 of 10 on both sides
        let ingredients = lines(&[
            "1 cup flour", "2 tsp sugar", "1 pinch salt", "eggs", "milk", "butter", "vanilla",
            "berries", "lemon", "honey",
        ]);
        let instructions = lines(&[
            "Mix", "Bake", "Stir", "Rest", "Serve", "Enjoy", "Share", "Slice", "Plate", "Eat",
        ]);
        assert!(is_recipe_like(&ingredients, &instructions));
    }

    #[test]
    fn test_low_instruction_score_rejects() {
        let ingredients = lines(&["1 cup flour", "2 tbsp oil"]);
        let instructions = lines(&["Read the story", "Share with friends", "Subscribe"]);
        assert!(matches!(
            check(&ingredients, &instructions),
            Err(Rejection::LowInstructionScore(_))
        ));
    }

    #[test]
    fn test_pancakes_are_recipe_like() {
        let ingredients = lines(&["1 cup flour", "2 eggs"]);
        let instructions = lines(&["Mix.", "Cook on griddle."]);
        let score = check(&ingredients, &instructions).unwrap();
        assert_eq!(score.ingredients, 0.5);
        assert_eq!(score.instructions, 1.0);
    }
}
