use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::catalog::{self, available};
use crate::domain::ListQuery;
use crate::entities::{character_voices, characters, persons, prelude::*};
use crate::models::people::{CharacterInput, CharacterPatch, PersonInput, PersonPatch};

/// A voice credit seen from either side of the link.
#[derive(Debug, Clone)]
pub struct VoiceCredit<M> {
    pub item: M,
    pub language: String,
}

pub struct PeopleRepository {
    conn: DatabaseConnection,
}

impl PeopleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Characters
    // ========================================================================

    pub async fn list_characters(&self, query: &ListQuery) -> Result<(Vec<characters::Model>, u64)> {
        catalog::list_page::<Characters, _>(&self.conn, query).await
    }

    pub async fn get_character(&self, id: i32) -> Result<Option<characters::Model>> {
        catalog::find_available::<Characters, _>(&self.conn, id).await
    }

    pub async fn get_character_any(&self, id: i32) -> Result<Option<characters::Model>> {
        catalog::find_any::<Characters, _>(&self.conn, id).await
    }

    pub async fn create_character(&self, input: &CharacterInput) -> Result<characters::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = characters::ActiveModel {
            name: Set(input.name.clone()),
            name_kanji: Set(input.name_kanji.clone()),
            about: Set(input.about.clone()),
            image: Set(input.image.clone()),
            anime_id: Set(input.anime_id),
            manga_id: Set(input.manga_id),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    pub async fn update_character(
        &self,
        character: characters::Model,
        patch: &CharacterPatch,
    ) -> Result<characters::Model> {
        let mut active: characters::ActiveModel = character.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(name_kanji) = &patch.name_kanji {
            active.name_kanji = Set(Some(name_kanji.clone()));
        }
        if let Some(about) = &patch.about {
            active.about = Set(Some(about.clone()));
        }
        if let Some(image) = &patch.image {
            active.image = Set(Some(image.clone()));
        }
        if let Some(anime_id) = patch.anime_id {
            active.anime_id = Set(Some(anime_id));
        }
        if let Some(manga_id) = patch.manga_id {
            active.manga_id = Set(Some(manga_id));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn mark_character_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<Characters, _>(&self.conn, id).await
    }

    pub async fn restore_character(&self, id: i32) -> Result<bool> {
        catalog::restore::<Characters, _>(&self.conn, id).await
    }

    /// Persons voicing `character`, available ones only.
    pub async fn voices_of(&self, character: &characters::Model) -> Result<Vec<VoiceCredit<persons::Model>>> {
        let links = CharacterVoices::find()
            .filter(character_voices::Column::CharacterId.eq(character.id))
            .all(&self.conn)
            .await?;

        let people = character
            .find_related(Persons)
            .filter(persons::Column::Available.eq(true))
            .order_by_asc(persons::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(people
            .into_iter()
            .filter_map(|person| {
                links
                    .iter()
                    .find(|link| link.person_id == person.id)
                    .map(|link| VoiceCredit {
                        language: link.language.clone(),
                        item: person,
                    })
            })
            .collect())
    }

    pub async fn add_voice(&self, character_id: i32, person_id: i32, language: &str) -> Result<()> {
        let link = character_voices::ActiveModel {
            character_id: Set(character_id),
            person_id: Set(person_id),
            language: Set(language.to_string()),
        };

        CharacterVoices::insert(link)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    character_voices::Column::CharacterId,
                    character_voices::Column::PersonId,
                ])
                .update_column(character_voices::Column::Language)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    // ========================================================================
    // Persons
    // ========================================================================

    pub async fn list_persons(&self, query: &ListQuery) -> Result<(Vec<persons::Model>, u64)> {
        catalog::list_page::<Persons, _>(&self.conn, query).await
    }

    pub async fn get_person(&self, id: i32) -> Result<Option<persons::Model>> {
        catalog::find_available::<Persons, _>(&self.conn, id).await
    }

    pub async fn get_person_any(&self, id: i32) -> Result<Option<persons::Model>> {
        catalog::find_any::<Persons, _>(&self.conn, id).await
    }

    pub async fn create_person(&self, input: &PersonInput) -> Result<persons::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = persons::ActiveModel {
            name: Set(input.name.clone()),
            given_name: Set(input.given_name.clone()),
            family_name: Set(input.family_name.clone()),
            birthday: Set(input.birthday.clone()),
            about: Set(input.about.clone()),
            image: Set(input.image.clone()),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    pub async fn update_person(
        &self,
        person: persons::Model,
        patch: &PersonPatch,
    ) -> Result<persons::Model> {
        let mut active: persons::ActiveModel = person.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(given_name) = &patch.given_name {
            active.given_name = Set(Some(given_name.clone()));
        }
        if let Some(family_name) = &patch.family_name {
            active.family_name = Set(Some(family_name.clone()));
        }
        if let Some(birthday) = &patch.birthday {
            active.birthday = Set(Some(birthday.clone()));
        }
        if let Some(about) = &patch.about {
            active.about = Set(Some(about.clone()));
        }
        if let Some(image) = &patch.image {
            active.image = Set(Some(image.clone()));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn mark_person_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<Persons, _>(&self.conn, id).await
    }

    pub async fn restore_person(&self, id: i32) -> Result<bool> {
        catalog::restore::<Persons, _>(&self.conn, id).await
    }

    /// Characters voiced by `person`, available ones only.
    pub async fn roles_of(&self, person: &persons::Model) -> Result<Vec<VoiceCredit<characters::Model>>> {
        let links = CharacterVoices::find()
            .filter(character_voices::Column::PersonId.eq(person.id))
            .all(&self.conn)
            .await?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let roles = available::<Characters>()
            .filter(
                characters::Column::Id.is_in(links.iter().map(|link| link.character_id)),
            )
            .order_by_asc(characters::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(roles
            .into_iter()
            .filter_map(|character| {
                links
                    .iter()
                    .find(|link| link.character_id == character.id)
                    .map(|link| VoiceCredit {
                        language: link.language.clone(),
                        item: character,
                    })
            })
            .collect())
    }
}
