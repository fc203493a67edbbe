use serde::{Deserialize, Serialize};

/// Placeholder used when a page carries no usable title
pub const UNTITLED: &str = "Untitled Recipe";

/// A recipe that passed the recipe-likeness gate.
///
/// Serializes with exactly the keys `name`, `ingredients` and `instructions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Unvalidated output of a single strategy attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub name: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Candidate {
    pub fn new(ingredients: Vec<String>, instructions: Vec<String>) -> Self {
        Self {
            name: None,
            ingredients,
            instructions,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            None
        } else {
            Some(name.trim().to_string())
        };
        self
    }

    /// True when the strategy found neither ingredients nor instructions
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.instructions.is_empty()
    }

    /// Only the validator turns candidates into recipes.
    pub(crate) fn into_recipe(self, fallback_name: &str) -> Recipe {
        let name = self.name.unwrap_or_else(|| {
            if fallback_name.trim().is_empty() {
                UNTITLED.to_string()
            } else {
                fallback_name.trim().to_string()
            }
        });
        Recipe {
            name,
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_json_keys() {
        let recipe = Recipe {
            name: "Pancakes".to_string(),
            ingredients: vec!["1 cup flour".to_string(), "2 eggs".to_string()],
            instructions: vec!["Mix.".to_string()],
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Pancakes",
                "ingredients": ["1 cup flour", "2 eggs"],
                "instructions": ["Mix."]
            })
        );
    }

    #[test]
    fn test_blank_name_falls_back() {
        let candidate = Candidate::new(vec!["a".into()], vec!["b".into()]).with_name("   ");
        assert_eq!(candidate.name, None);
        assert_eq!(candidate.clone().into_recipe("").name, UNTITLED);
        assert_eq!(candidate.into_recipe(" Page Title ").name, "Page Title");
    }
}
