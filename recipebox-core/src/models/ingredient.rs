use serde::{Deserialize, Serialize};
use std::fmt;

/// An ingredient line as delivered by the recipe source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExtendedIngredient {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub aisle: String,
    #[serde(default)]
    pub consistency: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    pub name: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub image: String,
}

impl ExtendedIngredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn with_aisle(mut self, aisle: impl Into<String>) -> Self {
        self.aisle = aisle.into();
        self
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }
}

impl fmt::Display for ExtendedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.original.is_empty() {
            write!(f, "{}", self.original)
        } else if self.unit.is_empty() {
            write!(f, "{} {}", self.amount, self.name)
        } else {
            write!(f, "{} {} {}", self.amount, self.unit, self.name)
        }
    }
}
