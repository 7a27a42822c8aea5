use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MangaInput {
    pub name: String,
    pub name_jpn: Option<String>,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    #[serde(default = "default_status")]
    pub status: String,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub author_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub theme_ids: Vec<i32>,
    #[serde(default)]
    pub is_recommended: bool,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    #[serde(default)]
    pub popularity: i32,
    #[serde(default)]
    pub members: i32,
    #[serde(default)]
    pub favorites: i32,
}

fn default_media_type() -> String {
    "manga".to_string()
}

fn default_status() -> String {
    "finished".to_string()
}

impl MangaInput {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            name_jpn: None,
            image: None,
            synopsis: None,
            media_type: default_media_type(),
            chapters: None,
            volumes: None,
            status: default_status(),
            published_from: None,
            published_to: None,
            author_id: None,
            genre_ids: Vec::new(),
            theme_ids: Vec::new(),
            is_recommended: false,
            score: None,
            ranked: None,
            popularity: 0,
            members: 0,
            favorites: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MangaPatch {
    pub name: Option<String>,
    pub name_jpn: Option<String>,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub media_type: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub status: Option<String>,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub author_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
    pub theme_ids: Option<Vec<i32>>,
    pub is_recommended: Option<bool>,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    pub popularity: Option<i32>,
    pub members: Option<i32>,
    pub favorites: Option<i32>,
}
