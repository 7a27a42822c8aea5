//! `SeaORM` implementation of the `AnimeService` trait.

use std::sync::Arc;

use crate::api::types::{AnimeDto, AnimeListDto, AnimeSummaryDto, CharacterDto, NamedDto, Page};
use crate::db::{AnimeDetail, Store};
use crate::domain::{ListQuery, PageRequest};
use crate::entities::animes;
use crate::entities::prelude::{Genres, Studios};
use crate::models::anime::{AnimeInput, AnimePatch};
use crate::services::anime_service::AnimeService;
use crate::services::catalog::{
    self, CatalogError, normalize_ids, slugify, validate_name, validate_non_negative,
    validate_score, validate_year,
};

const KIND: &str = "Anime";

pub struct SeaOrmAnimeService {
    store: Arc<Store>,
}

impl SeaOrmAnimeService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn require(&self, id: i32) -> Result<animes::Model, CatalogError> {
        self.store
            .anime_repo()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(KIND, id))
    }

    async fn to_dto(&self, anime: animes::Model) -> Result<AnimeDto, CatalogError> {
        let detail = self.store.anime_repo().detail(anime).await?;
        Ok(detail_to_dto(detail))
    }

    async fn check_studio(&self, studio_id: Option<i32>) -> Result<(), CatalogError> {
        if let Some(id) = studio_id {
            let found = self.store.named_repo().count_available::<Studios>(&[id]).await?;
            if found == 0 {
                return Err(CatalogError::validation(format!("Unknown studio id: {id}")));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AnimeService for SeaOrmAnimeService {
    async fn list(&self, query: ListQuery) -> Result<Page<AnimeListDto>, CatalogError> {
        let (items, count) = self.store.anime_repo().list(&query).await?;
        Ok(Page::new(items, count, query.page).map(AnimeListDto::from))
    }

    async fn get(&self, id: i32) -> Result<AnimeDto, CatalogError> {
        let anime = self.require(id).await?;
        self.to_dto(anime).await
    }

    async fn create(&self, mut input: AnimeInput) -> Result<AnimeDto, CatalogError> {
        input.name = validate_name("name", &input.name)?;
        validate_year(input.year)?;
        validate_score(input.score)?;
        validate_non_negative("episodes", input.episodes)?;
        validate_non_negative("ranked", input.ranked)?;
        validate_non_negative("popularity", Some(input.popularity))?;
        validate_non_negative("members", Some(input.members))?;
        validate_non_negative("favorites", Some(input.favorites))?;

        input.genre_ids = normalize_ids(&input.genre_ids);
        input.theme_ids = normalize_ids(&input.theme_ids);
        catalog::check_taxonomy(&self.store, &input.genre_ids, &input.theme_ids).await?;
        self.check_studio(input.studio_id).await?;

        let slug = slugify(&input.name);
        let anime = self.store.anime_repo().create(&input, &slug).await?;

        tracing::info!(anime_id = anime.id, name = %anime.name, "Created anime");

        self.to_dto(anime).await
    }

    async fn update(&self, id: i32, mut patch: AnimePatch) -> Result<AnimeDto, CatalogError> {
        let anime = self.require(id).await?;

        let slug = match patch.name.as_deref() {
            Some(name) => {
                let name = validate_name("name", name)?;
                let slug = slugify(&name);
                patch.name = Some(name);
                Some(slug)
            }
            None => None,
        };
        validate_year(patch.year)?;
        validate_score(patch.score)?;
        validate_non_negative("episodes", patch.episodes)?;
        validate_non_negative("ranked", patch.ranked)?;
        validate_non_negative("popularity", patch.popularity)?;
        validate_non_negative("members", patch.members)?;
        validate_non_negative("favorites", patch.favorites)?;

        patch.genre_ids = patch.genre_ids.as_deref().map(normalize_ids);
        patch.theme_ids = patch.theme_ids.as_deref().map(normalize_ids);
        catalog::check_taxonomy(
            &self.store,
            patch.genre_ids.as_deref().unwrap_or_default(),
            patch.theme_ids.as_deref().unwrap_or_default(),
        )
        .await?;
        self.check_studio(patch.studio_id).await?;

        let anime = self.store.anime_repo().update(anime, &patch, slug.as_deref()).await?;
        self.to_dto(anime).await
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.anime_repo().mark_unavailable(id).await? {
            tracing::info!(anime_id = id, "Marked anime unavailable");
            Ok(())
        } else {
            Err(CatalogError::not_found(KIND, id))
        }
    }

    async fn restore(&self, id: i32) -> Result<AnimeDto, CatalogError> {
        if !self.store.anime_repo().restore(id).await? {
            return Err(CatalogError::not_found(KIND, id));
        }
        self.get(id).await
    }

    async fn popular(&self, limit: u64) -> Result<Vec<AnimeListDto>, CatalogError> {
        let items = self.store.anime_repo().popular(limit).await?;
        Ok(items.into_iter().map(AnimeListDto::from).collect())
    }

    async fn top_scored(&self, limit: u64) -> Result<Vec<AnimeListDto>, CatalogError> {
        let items = self.store.anime_repo().top_scored(limit).await?;
        Ok(items.into_iter().map(AnimeListDto::from).collect())
    }

    async fn recommended(&self) -> Result<Vec<AnimeSummaryDto>, CatalogError> {
        Ok(self.store.anime_repo().recommended().await?)
    }

    async fn by_genre(&self, genre_id: i32) -> Result<Vec<AnimeSummaryDto>, CatalogError> {
        if self.store.named_repo().get::<Genres>(genre_id).await?.is_none() {
            return Err(CatalogError::not_found("Genre", genre_id));
        }
        Ok(self.store.anime_repo().by_genre(genre_id).await?)
    }

    async fn similar(&self, id: i32) -> Result<Vec<AnimeListDto>, CatalogError> {
        let anime = self.require(id).await?;
        let items = self.store.anime_repo().similar(anime.id).await?;
        Ok(items.into_iter().map(AnimeListDto::from).collect())
    }

    async fn characters(&self, id: i32) -> Result<Vec<CharacterDto>, CatalogError> {
        let anime = self.require(id).await?;
        let characters = self.store.anime_repo().characters(anime.id).await?;
        Ok(characters.into_iter().map(CharacterDto::from).collect())
    }

    async fn by_studio(
        &self,
        studio_id: i32,
        page: PageRequest,
    ) -> Result<Page<AnimeListDto>, CatalogError> {
        if self.store.named_repo().get::<Studios>(studio_id).await?.is_none() {
            return Err(CatalogError::not_found("Studio", studio_id));
        }
        let (items, count) = self.store.anime_repo().by_studio(studio_id, page).await?;
        Ok(Page::new(items, count, page).map(AnimeListDto::from))
    }
}

fn detail_to_dto(detail: AnimeDetail) -> AnimeDto {
    let AnimeDetail {
        anime,
        genres,
        themes,
        studio,
    } = detail;

    AnimeDto {
        id: anime.id,
        name: anime.name,
        name_jpn: anime.name_jpn,
        slug: anime.slug,
        image: anime.image,
        synopsis: anime.synopsis,
        season: anime.season,
        year: anime.year,
        media_type: anime.media_type,
        episodes: anime.episodes,
        status: anime.status,
        aired_from: anime.aired_from,
        aired_to: anime.aired_to,
        studio: studio.map(NamedDto::from),
        genres: genres.into_iter().map(NamedDto::from).collect(),
        themes: themes.into_iter().map(NamedDto::from).collect(),
        is_recommended: anime.is_recommended,
        score: anime.score,
        ranked: anime.ranked,
        popularity: anime.popularity,
        members: anime.members,
        favorites: anime.favorites,
        created_at: anime.created_at,
        updated_at: anime.updated_at,
    }
}
