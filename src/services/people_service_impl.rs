//! `SeaORM` implementation of the `PeopleService` trait.

use std::sync::Arc;

use crate::api::types::{
    AnimeListDto, CharacterDto, MangaListDto, Page, PersonDto, RoleDto, VoiceDto,
};
use crate::db::Store;
use crate::domain::ListQuery;
use crate::entities::{characters, persons};
use crate::models::people::{CharacterInput, CharacterPatch, PersonInput, PersonPatch, VoiceInput};
use crate::services::catalog::{CatalogError, validate_name};
use crate::services::people_service::PeopleService;

const CHARACTER: &str = "Character";
const PERSON: &str = "Person";

pub struct SeaOrmPeopleService {
    store: Arc<Store>,
}

impl SeaOrmPeopleService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn require_character(&self, id: i32) -> Result<characters::Model, CatalogError> {
        self.store
            .people_repo()
            .get_character(id)
            .await?
            .ok_or(CatalogError::not_found(CHARACTER, id))
    }

    async fn require_person(&self, id: i32) -> Result<persons::Model, CatalogError> {
        self.store
            .people_repo()
            .get_person(id)
            .await?
            .ok_or(CatalogError::not_found(PERSON, id))
    }

    async fn check_links(
        &self,
        anime_id: Option<i32>,
        manga_id: Option<i32>,
    ) -> Result<(), CatalogError> {
        if let Some(id) = anime_id
            && self.store.anime_repo().get(id).await?.is_none()
        {
            return Err(CatalogError::validation(format!("Unknown anime id: {id}")));
        }

        if let Some(id) = manga_id
            && self.store.manga_repo().get(id).await?.is_none()
        {
            return Err(CatalogError::validation(format!("Unknown manga id: {id}")));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl PeopleService for SeaOrmPeopleService {
    async fn list_characters(&self, query: ListQuery) -> Result<Page<CharacterDto>, CatalogError> {
        let (items, count) = self.store.people_repo().list_characters(&query).await?;
        Ok(Page::new(items, count, query.page).map(CharacterDto::from))
    }

    async fn get_character(&self, id: i32) -> Result<CharacterDto, CatalogError> {
        Ok(self.require_character(id).await?.into())
    }

    async fn create_character(
        &self,
        mut input: CharacterInput,
    ) -> Result<CharacterDto, CatalogError> {
        input.name = validate_name("name", &input.name)?;
        self.check_links(input.anime_id, input.manga_id).await?;

        let character = self.store.people_repo().create_character(&input).await?;
        tracing::info!(character_id = character.id, "Created character");

        Ok(character.into())
    }

    async fn update_character(
        &self,
        id: i32,
        mut patch: CharacterPatch,
    ) -> Result<CharacterDto, CatalogError> {
        let character = self.require_character(id).await?;

        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(validate_name("name", name)?);
        }
        self.check_links(patch.anime_id, patch.manga_id).await?;

        let character = self
            .store
            .people_repo()
            .update_character(character, &patch)
            .await?;

        Ok(character.into())
    }

    async fn delete_character(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.people_repo().mark_character_unavailable(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(CHARACTER, id))
        }
    }

    async fn restore_character(&self, id: i32) -> Result<CharacterDto, CatalogError> {
        if !self.store.people_repo().restore_character(id).await? {
            return Err(CatalogError::not_found(CHARACTER, id));
        }
        self.get_character(id).await
    }

    async fn character_anime(&self, id: i32) -> Result<AnimeListDto, CatalogError> {
        let character = self.require_character(id).await?;
        let anime_id = character
            .anime_id
            .ok_or(CatalogError::not_found("Anime for character", id))?;

        self.store
            .anime_repo()
            .get(anime_id)
            .await?
            .map(AnimeListDto::from)
            .ok_or(CatalogError::not_found("Anime", anime_id))
    }

    async fn character_manga(&self, id: i32) -> Result<MangaListDto, CatalogError> {
        let character = self.require_character(id).await?;
        let manga_id = character
            .manga_id
            .ok_or(CatalogError::not_found("Manga for character", id))?;

        self.store
            .manga_repo()
            .get(manga_id)
            .await?
            .map(MangaListDto::from)
            .ok_or(CatalogError::not_found("Manga", manga_id))
    }

    async fn character_voices(&self, id: i32) -> Result<Vec<VoiceDto>, CatalogError> {
        let character = self.require_character(id).await?;
        let voices = self.store.people_repo().voices_of(&character).await?;
        Ok(voices.into_iter().map(VoiceDto::from).collect())
    }

    async fn add_voice(&self, id: i32, input: VoiceInput) -> Result<Vec<VoiceDto>, CatalogError> {
        let character = self.require_character(id).await?;
        let person = self.require_person(input.person_id).await?;
        let language = validate_name("language", &input.language)?.to_lowercase();

        let repo = self.store.people_repo();
        repo.add_voice(character.id, person.id, &language).await?;

        let voices = repo.voices_of(&character).await?;
        Ok(voices.into_iter().map(VoiceDto::from).collect())
    }

    async fn list_persons(&self, query: ListQuery) -> Result<Page<PersonDto>, CatalogError> {
        let (items, count) = self.store.people_repo().list_persons(&query).await?;
        Ok(Page::new(items, count, query.page).map(PersonDto::from))
    }

    async fn get_person(&self, id: i32) -> Result<PersonDto, CatalogError> {
        Ok(self.require_person(id).await?.into())
    }

    async fn create_person(&self, mut input: PersonInput) -> Result<PersonDto, CatalogError> {
        input.name = validate_name("name", &input.name)?;

        let person = self.store.people_repo().create_person(&input).await?;
        tracing::info!(person_id = person.id, "Created person");

        Ok(person.into())
    }

    async fn update_person(&self, id: i32, mut patch: PersonPatch) -> Result<PersonDto, CatalogError> {
        let person = self.require_person(id).await?;

        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(validate_name("name", name)?);
        }

        let person = self.store.people_repo().update_person(person, &patch).await?;
        Ok(person.into())
    }

    async fn delete_person(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.people_repo().mark_person_unavailable(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(PERSON, id))
        }
    }

    async fn restore_person(&self, id: i32) -> Result<PersonDto, CatalogError> {
        if !self.store.people_repo().restore_person(id).await? {
            return Err(CatalogError::not_found(PERSON, id));
        }
        self.get_person(id).await
    }

    async fn person_voices(&self, id: i32) -> Result<Vec<RoleDto>, CatalogError> {
        let person = self.require_person(id).await?;
        let roles = self.store.people_repo().roles_of(&person).await?;
        Ok(roles.into_iter().map(RoleDto::from).collect())
    }
}
