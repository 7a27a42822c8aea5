use serde::{Deserialize, Serialize};

/// Create or rename payload for genres, themes, studios and authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedInput {
    pub name: String,
}
