//! Characters and the persons who voice them.

use crate::api::types::{
    AnimeListDto, CharacterDto, MangaListDto, Page, PersonDto, RoleDto, VoiceDto,
};
use crate::domain::ListQuery;
use crate::models::people::{CharacterInput, CharacterPatch, PersonInput, PersonPatch, VoiceInput};
use crate::services::catalog::CatalogError;

#[async_trait::async_trait]
pub trait PeopleService: Send + Sync {
    async fn list_characters(&self, query: ListQuery) -> Result<Page<CharacterDto>, CatalogError>;

    async fn get_character(&self, id: i32) -> Result<CharacterDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Validation`] on a blank name or when the
    ///   linked anime/manga is missing or unavailable
    async fn create_character(&self, input: CharacterInput) -> Result<CharacterDto, CatalogError>;

    async fn update_character(
        &self,
        id: i32,
        patch: CharacterPatch,
    ) -> Result<CharacterDto, CatalogError>;

    async fn delete_character(&self, id: i32) -> Result<(), CatalogError>;

    async fn restore_character(&self, id: i32) -> Result<CharacterDto, CatalogError>;

    /// The anime a character appears in.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] when the character is unlinked or
    ///   the anime is unavailable
    async fn character_anime(&self, id: i32) -> Result<AnimeListDto, CatalogError>;

    async fn character_manga(&self, id: i32) -> Result<MangaListDto, CatalogError>;

    async fn character_voices(&self, id: i32) -> Result<Vec<VoiceDto>, CatalogError>;

    /// Credits a person as a voice of the character; re-crediting updates the language.
    async fn add_voice(&self, id: i32, input: VoiceInput) -> Result<Vec<VoiceDto>, CatalogError>;

    async fn list_persons(&self, query: ListQuery) -> Result<Page<PersonDto>, CatalogError>;

    async fn get_person(&self, id: i32) -> Result<PersonDto, CatalogError>;

    async fn create_person(&self, input: PersonInput) -> Result<PersonDto, CatalogError>;

    async fn update_person(&self, id: i32, patch: PersonPatch) -> Result<PersonDto, CatalogError>;

    async fn delete_person(&self, id: i32) -> Result<(), CatalogError>;

    async fn restore_person(&self, id: i32) -> Result<PersonDto, CatalogError>;

    /// Characters voiced by the person.
    async fn person_voices(&self, id: i32) -> Result<Vec<RoleDto>, CatalogError>;
}
