use serde::{Deserialize, Serialize};

/// Rating is kept as a raw integer here so range errors surface as a
/// validation failure from the review service instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub is_spoiler: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewChanges {
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub is_spoiler: Option<bool>,
}

impl ReviewChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comment.is_none() && self.is_spoiler.is_none()
    }
}
