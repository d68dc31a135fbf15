use alloc::{string::String, vec::Vec};
use serde::Deserialize;

/// Sentinel category identifier that draws from every category.
pub const ALL_CATEGORIES: i32 = 0;

/// Request for the next unseen quiz question.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Category to draw from. A missing category is distinct from [`ALL_CATEGORIES`].
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    /// Identifiers of the questions already asked in this round.
    #[serde(default)]
    pub previous_questions: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "crate::category::deserialize_loose_id")]
    pub id: i32,
    /// Echo of the category label. Clients send it along but it plays no part in the selection.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl QuizCategory {
    /// Returns the category to filter by, or `None` when every category is eligible.
    pub const fn filter(&self) -> Option<i32> {
        if self.id == ALL_CATEGORIES {
            None
        } else {
            Some(self.id)
        }
    }
}
