use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterInput {
    pub name: String,
    pub name_kanji: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
    pub anime_id: Option<i32>,
    pub manga_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub name_kanji: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
    pub anime_id: Option<i32>,
    pub manga_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub birthday: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub birthday: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
}

/// Links a voice actor to a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInput {
    pub person_id: i32,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "japanese".to_string()
}
