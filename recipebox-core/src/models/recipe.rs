use serde::{Deserialize, Serialize};
use std::fmt;

use super::ingredient::ExtendedIngredient;

/// Recipe identifier assigned by the recipe source.
pub type RecipeId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// Ingredient reference inside an instruction step (no quantities).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StepIngredient {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
    #[serde(default)]
    pub ingredients: Vec<StepIngredient>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

/// A recipe record as returned by the recipe source.
///
/// Only `id` and `title` are required when parsing; everything else falls
/// back to empty values so partially populated records still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_type: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub cheap: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub very_healthy: bool,
}

impl Recipe {
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<ExtendedIngredient>) -> Self {
        self.extended_ingredients = ingredients;
        self
    }

    pub fn with_ready_in_minutes(mut self, minutes: u32) -> Self {
        self.ready_in_minutes = minutes;
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_diets(mut self, diets: Vec<String>) -> Self {
        self.diets = diets;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Case-insensitive substring match against title and summary.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.summary.to_lowercase().contains(&query)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.title, self.id)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;

        if self.servings > 0 {
            writeln!(f, "Servings: {}", self.servings)?;
        }
        if self.ready_in_minutes > 0 {
            writeln!(f, "Ready in: {} min", self.ready_in_minutes)?;
        }
        if !self.diets.is_empty() {
            writeln!(f, "Diets: {}", self.diets.join(", "))?;
        }
        if !self.summary.is_empty() {
            writeln!(f, "\n{}", self.summary)?;
        }

        if !self.extended_ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.extended_ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        let steps: Vec<&InstructionStep> = self
            .analyzed_instructions
            .iter()
            .flat_map(|i| i.steps.iter())
            .collect();
        if !steps.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for step in steps {
                writeln!(f, "  {}. {}", step.number, step.step)?;
            }
        } else if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:\n{}", self.instructions)?;
        }

        Ok(())
    }
}
