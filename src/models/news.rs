use serde::{Deserialize, Serialize};

use crate::domain::NewsTag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsInput {
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub tag: NewsTag,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub source: Option<String>,
    pub tag: Option<NewsTag>,
}
