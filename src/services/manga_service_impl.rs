//! `SeaORM` implementation of the `MangaService` trait.

use std::sync::Arc;

use crate::api::types::{CharacterDto, MangaDto, MangaListDto, MangaSummaryDto, NamedDto, Page};
use crate::db::{MangaDetail, Store};
use crate::domain::{ListQuery, PageRequest};
use crate::entities::mangas;
use crate::entities::prelude::{Authors, Genres};
use crate::models::manga::{MangaInput, MangaPatch};
use crate::services::catalog::{
    self, CatalogError, normalize_ids, slugify, validate_name, validate_non_negative,
    validate_score,
};
use crate::services::manga_service::MangaService;

const KIND: &str = "Manga";

pub struct SeaOrmMangaService {
    store: Arc<Store>,
}

impl SeaOrmMangaService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn require(&self, id: i32) -> Result<mangas::Model, CatalogError> {
        self.store
            .manga_repo()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(KIND, id))
    }

    async fn to_dto(&self, manga: mangas::Model) -> Result<MangaDto, CatalogError> {
        let detail = self.store.manga_repo().detail(manga).await?;
        Ok(detail_to_dto(detail))
    }

    async fn check_author(&self, author_id: Option<i32>) -> Result<(), CatalogError> {
        if let Some(id) = author_id {
            let found = self.store.named_repo().count_available::<Authors>(&[id]).await?;
            if found == 0 {
                return Err(CatalogError::validation(format!("Unknown author id: {id}")));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MangaService for SeaOrmMangaService {
    async fn list(&self, query: ListQuery) -> Result<Page<MangaListDto>, CatalogError> {
        let (items, count) = self.store.manga_repo().list(&query).await?;
        Ok(Page::new(items, count, query.page).map(MangaListDto::from))
    }

    async fn get(&self, id: i32) -> Result<MangaDto, CatalogError> {
        let manga = self.require(id).await?;
        self.to_dto(manga).await
    }

    async fn create(&self, mut input: MangaInput) -> Result<MangaDto, CatalogError> {
        input.name = validate_name("name", &input.name)?;
        validate_score(input.score)?;
        validate_non_negative("chapters", input.chapters)?;
        validate_non_negative("volumes", input.volumes)?;
        validate_non_negative("ranked", input.ranked)?;
        validate_non_negative("popularity", Some(input.popularity))?;
        validate_non_negative("members", Some(input.members))?;
        validate_non_negative("favorites", Some(input.favorites))?;

        input.genre_ids = normalize_ids(&input.genre_ids);
        input.theme_ids = normalize_ids(&input.theme_ids);
        catalog::check_taxonomy(&self.store, &input.genre_ids, &input.theme_ids).await?;
        self.check_author(input.author_id).await?;

        let slug = slugify(&input.name);
        let manga = self.store.manga_repo().create(&input, &slug).await?;

        tracing::info!(manga_id = manga.id, name = %manga.name, "Created manga");

        self.to_dto(manga).await
    }

    async fn update(&self, id: i32, mut patch: MangaPatch) -> Result<MangaDto, CatalogError> {
        let manga = self.require(id).await?;

        let slug = match patch.name.as_deref() {
            Some(name) => {
                let name = validate_name("name", name)?;
                let slug = slugify(&name);
                patch.name = Some(name);
                Some(slug)
            }
            None => None,
        };
        validate_score(patch.score)?;
        validate_non_negative("chapters", patch.chapters)?;
        validate_non_negative("volumes", patch.volumes)?;
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
        self.check_author(patch.author_id).await?;

        let manga = self.store.manga_repo().update(manga, &patch, slug.as_deref()).await?;
        self.to_dto(manga).await
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.manga_repo().mark_unavailable(id).await? {
            tracing::info!(manga_id = id, "Marked manga unavailable");
            Ok(())
        } else {
            Err(CatalogError::not_found(KIND, id))
        }
    }

    async fn restore(&self, id: i32) -> Result<MangaDto, CatalogError> {
        if !self.store.manga_repo().restore(id).await? {
            return Err(CatalogError::not_found(KIND, id));
        }
        self.get(id).await
    }

    async fn popular(&self, limit: u64) -> Result<Vec<MangaListDto>, CatalogError> {
        let items = self.store.manga_repo().popular(limit).await?;
        Ok(items.into_iter().map(MangaListDto::from).collect())
    }

    async fn top_scored(&self, limit: u64) -> Result<Vec<MangaListDto>, CatalogError> {
        let items = self.store.manga_repo().top_scored(limit).await?;
        Ok(items.into_iter().map(MangaListDto::from).collect())
    }

    async fn recommended(&self) -> Result<Vec<MangaSummaryDto>, CatalogError> {
        Ok(self.store.manga_repo().recommended().await?)
    }

    async fn by_genre(&self, genre_id: i32) -> Result<Vec<MangaSummaryDto>, CatalogError> {
        if self.store.named_repo().get::<Genres>(genre_id).await?.is_none() {
            return Err(CatalogError::not_found("Genre", genre_id));
        }
        Ok(self.store.manga_repo().by_genre(genre_id).await?)
    }

    async fn similar(&self, id: i32) -> Result<Vec<MangaListDto>, CatalogError> {
        let manga = self.require(id).await?;
        let items = self.store.manga_repo().similar(manga.id).await?;
        Ok(items.into_iter().map(MangaListDto::from).collect())
    }

    async fn characters(&self, id: i32) -> Result<Vec<CharacterDto>, CatalogError> {
        let manga = self.require(id).await?;
        let characters = self.store.manga_repo().characters(manga.id).await?;
        Ok(characters.into_iter().map(CharacterDto::from).collect())
    }

    async fn by_author(
        &self,
        author_id: i32,
        page: PageRequest,
    ) -> Result<Page<MangaListDto>, CatalogError> {
        if self.store.named_repo().get::<Authors>(author_id).await?.is_none() {
            return Err(CatalogError::not_found("Author", author_id));
        }

        let (items, count) = self.store.manga_repo().by_author(author_id, page).await?;
        if count == 0 {
            return Err(CatalogError::not_found("Manga by author", author_id));
        }

        Ok(Page::new(items, count, page).map(MangaListDto::from))
    }
}

fn detail_to_dto(detail: MangaDetail) -> MangaDto {
    let MangaDetail {
        manga,
        genres,
        themes,
        author,
    } = detail;

    MangaDto {
        id: manga.id,
        name: manga.name,
        name_jpn: manga.name_jpn,
        slug: manga.slug,
        image: manga.image,
        synopsis: manga.synopsis,
        media_type: manga.media_type,
        chapters: manga.chapters,
        volumes: manga.volumes,
        status: manga.status,
        published_from: manga.published_from,
        published_to: manga.published_to,
        author: author.map(NamedDto::from),
        genres: genres.into_iter().map(NamedDto::from).collect(),
        themes: themes.into_iter().map(NamedDto::from).collect(),
        is_recommended: manga.is_recommended,
        score: manga.score,
        ranked: manga.ranked,
        popularity: manga.popularity,
        members: manga.members,
        favorites: manga.favorites,
        created_at: manga.created_at,
        updated_at: manga.updated_at,
    }
}
