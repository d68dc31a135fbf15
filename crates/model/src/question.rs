use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A trivia record as persisted by the store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Store-assigned identifier.
    pub id: i32,
    /// Text shown to the player.
    pub question: String,
    /// Expected answer.
    pub answer: String,
    /// Identifier of the owning [`Category`](crate::Category). This is not checked against the
    /// category table.
    pub category: i32,
    /// Small positive difficulty score.
    pub difficulty: i32,
}

/// Fields of a question yet to be inserted. Nothing is validated here: absent fields are handed to
/// the store as-is so that its own constraints decide whether the insertion is acceptable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "crate::category::deserialize_optional_loose_id")]
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}
