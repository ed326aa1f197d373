use serde::{Deserialize, Serialize};

use super::recipe::Recipe;

/// A page of recipes returned by a search or random lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<Recipe>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub number: usize,
    pub total_results: usize,
}
