// src/services/category.rs

//! Category classifier.

use crate::models::{Category, CategoryRule};
use crate::utils::contains_any;

/// Assigns exactly one category by keyword presence.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    /// Rules are tried in order; the first with a matching keyword wins.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| contains_any(text, &rule.keywords))
            .map_or(Category::Other, |rule| rule.category)
    }
}
