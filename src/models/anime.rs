use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeInput {
    pub name: String,
    pub name_jpn: Option<String>,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub episodes: Option<i32>,
    #[serde(default = "default_status")]
    pub status: String,
    pub aired_from: Option<String>,
    pub aired_to: Option<String>,
    pub studio_id: Option<i32>,
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
    "tv".to_string()
}

fn default_status() -> String {
    "finished".to_string()
}

impl AnimeInput {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            name_jpn: None,
            image: None,
            synopsis: None,
            season: None,
            year: None,
            media_type: default_media_type(),
            episodes: None,
            status: default_status(),
            aired_from: None,
            aired_to: None,
            studio_id: None,
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

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimePatch {
    pub name: Option<String>,
    pub name_jpn: Option<String>,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub media_type: Option<String>,
    pub episodes: Option<i32>,
    pub status: Option<String>,
    pub aired_from: Option<String>,
    pub aired_to: Option<String>,
    pub studio_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
    pub theme_ids: Option<Vec<i32>>,
    pub is_recommended: Option<bool>,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    pub popularity: Option<i32>,
    pub members: Option<i32>,
    pub favorites: Option<i32>,
}
