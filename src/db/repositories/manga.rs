use anyhow::Result;
use futures::TryFutureExt;
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use super::catalog::{self, available};
use super::ranking::{self, Ranked};
use crate::domain::{ListQuery, PageRequest};
use crate::entities::{
    authors, characters, genres, manga_genres, manga_themes, mangas, prelude::*, themes,
};
use crate::models::manga::{MangaInput, MangaPatch};

/// Fixed projection used by the recommended and by-genre listings.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct MangaSummary {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub media_type: String,
    pub status: String,
}

impl Ranked for Mangas {
    type Summary = MangaSummary;

    fn popularity_column() -> mangas::Column {
        mangas::Column::Popularity
    }

    fn score_column() -> mangas::Column {
        mangas::Column::Score
    }

    fn recommended_column() -> mangas::Column {
        mangas::Column::IsRecommended
    }

    fn summary_columns() -> Vec<mangas::Column> {
        vec![
            mangas::Column::Id,
            mangas::Column::Name,
            mangas::Column::Image,
            mangas::Column::PublishedFrom,
            mangas::Column::PublishedTo,
            mangas::Column::MediaType,
            mangas::Column::Status,
        ]
    }

    fn ids_in_genres(genre_ids: &[i32]) -> SelectStatement {
        Query::select()
            .column(manga_genres::Column::MangaId)
            .from(MangaGenres)
            .and_where(manga_genres::Column::GenreId.is_in(genre_ids.iter().copied()))
            .to_owned()
    }

    fn ids_in_themes(theme_ids: &[i32]) -> SelectStatement {
        Query::select()
            .column(manga_themes::Column::MangaId)
            .from(MangaThemes)
            .and_where(manga_themes::Column::ThemeId.is_in(theme_ids.iter().copied()))
            .to_owned()
    }
}

#[derive(Debug, Clone)]
pub struct MangaDetail {
    pub manga: mangas::Model,
    pub genres: Vec<genres::Model>,
    pub themes: Vec<themes::Model>,
    pub author: Option<authors::Model>,
}

pub struct MangaRepository {
    conn: DatabaseConnection,
}

impl MangaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<mangas::Model>, u64)> {
        catalog::list_page::<Mangas, _>(&self.conn, query).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<mangas::Model>> {
        catalog::find_available::<Mangas, _>(&self.conn, id).await
    }

    pub async fn get_any(&self, id: i32) -> Result<Option<mangas::Model>> {
        catalog::find_any::<Mangas, _>(&self.conn, id).await
    }

    /// Loads available genres, themes and the author alongside the manga.
    pub async fn detail(&self, manga: mangas::Model) -> Result<MangaDetail> {
        let (genres, themes, author) = futures::try_join!(
            manga
                .find_related(Genres)
                .filter(genres::Column::Available.eq(true))
                .order_by_asc(genres::Column::Name)
                .all(&self.conn)
                .err_into::<anyhow::Error>(),
            manga
                .find_related(Themes)
                .filter(themes::Column::Available.eq(true))
                .order_by_asc(themes::Column::Name)
                .all(&self.conn)
                .err_into::<anyhow::Error>(),
            self.author_of(manga.author_id),
        )?;

        Ok(MangaDetail {
            manga,
            genres,
            themes,
            author,
        })
    }

    async fn author_of(&self, author_id: Option<i32>) -> Result<Option<authors::Model>> {
        match author_id {
            Some(id) => catalog::find_available::<Authors, _>(&self.conn, id).await,
            None => Ok(None),
        }
    }

    /// Inserts a row. `base_slug` gets a numeric suffix when another row already holds it.
    pub async fn create(&self, input: &MangaInput, base_slug: &str) -> Result<mangas::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;
        let slug =
            catalog::unique_slug::<Mangas, _>(&txn, mangas::Column::Slug, base_slug, None).await?;

        let model = mangas::ActiveModel {
            name: Set(input.name.clone()),
            name_jpn: Set(input.name_jpn.clone()),
            slug: Set(slug),
            image: Set(input.image.clone()),
            synopsis: Set(input.synopsis.clone()),
            media_type: Set(input.media_type.clone()),
            chapters: Set(input.chapters),
            volumes: Set(input.volumes),
            status: Set(input.status.clone()),
            published_from: Set(input.published_from.clone()),
            published_to: Set(input.published_to.clone()),
            author_id: Set(input.author_id),
            is_recommended: Set(input.is_recommended),
            score: Set(input.score),
            ranked: Set(input.ranked),
            popularity: Set(input.popularity),
            members: Set(input.members),
            favorites: Set(input.favorites),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        replace_genres(&txn, model.id, &input.genre_ids).await?;
        replace_themes(&txn, model.id, &input.theme_ids).await?;

        txn.commit().await?;

        Ok(model)
    }

    pub async fn update(
        &self,
        manga: mangas::Model,
        patch: &MangaPatch,
        base_slug: Option<&str>,
    ) -> Result<mangas::Model> {
        let id = manga.id;
        let txn = self.conn.begin().await?;

        let slug = match base_slug {
            Some(base) => Some(
                catalog::unique_slug::<Mangas, _>(&txn, mangas::Column::Slug, base, Some(id)).await?,
            ),
            None => None,
        };

        let mut active: mangas::ActiveModel = manga.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        if let Some(name_jpn) = &patch.name_jpn {
            active.name_jpn = Set(Some(name_jpn.clone()));
        }
        if let Some(image) = &patch.image {
            active.image = Set(Some(image.clone()));
        }
        if let Some(synopsis) = &patch.synopsis {
            active.synopsis = Set(Some(synopsis.clone()));
        }
        if let Some(media_type) = &patch.media_type {
            active.media_type = Set(media_type.clone());
        }
        if let Some(chapters) = patch.chapters {
            active.chapters = Set(Some(chapters));
        }
        if let Some(volumes) = patch.volumes {
            active.volumes = Set(Some(volumes));
        }
        if let Some(status) = &patch.status {
            active.status = Set(status.clone());
        }
        if let Some(published_from) = &patch.published_from {
            active.published_from = Set(Some(published_from.clone()));
        }
        if let Some(published_to) = &patch.published_to {
            active.published_to = Set(Some(published_to.clone()));
        }
        if let Some(author_id) = patch.author_id {
            active.author_id = Set(Some(author_id));
        }
        if let Some(is_recommended) = patch.is_recommended {
            active.is_recommended = Set(is_recommended);
        }
        if let Some(score) = patch.score {
            active.score = Set(Some(score));
        }
        if let Some(ranked) = patch.ranked {
            active.ranked = Set(Some(ranked));
        }
        if let Some(popularity) = patch.popularity {
            active.popularity = Set(popularity);
        }
        if let Some(members) = patch.members {
            active.members = Set(members);
        }
        if let Some(favorites) = patch.favorites {
            active.favorites = Set(favorites);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active.update(&txn).await?;

        if let Some(genre_ids) = &patch.genre_ids {
            replace_genres(&txn, id, genre_ids).await?;
        }
        if let Some(theme_ids) = &patch.theme_ids {
            replace_themes(&txn, id, theme_ids).await?;
        }

        txn.commit().await?;

        Ok(model)
    }

    pub async fn mark_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<Mangas, _>(&self.conn, id).await
    }

    pub async fn restore(&self, id: i32) -> Result<bool> {
        catalog::restore::<Mangas, _>(&self.conn, id).await
    }

    pub async fn genre_ids(&self, id: i32) -> Result<Vec<i32>> {
        let links = MangaGenres::find()
            .filter(manga_genres::Column::MangaId.eq(id))
            .all(&self.conn)
            .await?;

        Ok(links.into_iter().map(|link| link.genre_id).collect())
    }

    pub async fn theme_ids(&self, id: i32) -> Result<Vec<i32>> {
        let links = MangaThemes::find()
            .filter(manga_themes::Column::MangaId.eq(id))
            .all(&self.conn)
            .await?;

        Ok(links.into_iter().map(|link| link.theme_id).collect())
    }

    pub async fn popular(&self, limit: u64) -> Result<Vec<mangas::Model>> {
        ranking::popular::<Mangas, _>(&self.conn, limit).await
    }

    pub async fn top_scored(&self, limit: u64) -> Result<Vec<mangas::Model>> {
        ranking::top_scored::<Mangas, _>(&self.conn, limit).await
    }

    pub async fn recommended(&self) -> Result<Vec<MangaSummary>> {
        ranking::recommended::<Mangas, _>(&self.conn).await
    }

    pub async fn by_genre(&self, genre_id: i32) -> Result<Vec<MangaSummary>> {
        ranking::by_genre::<Mangas, _>(&self.conn, genre_id).await
    }

    pub async fn similar(&self, id: i32) -> Result<Vec<mangas::Model>> {
        let (genre_ids, theme_ids) = futures::try_join!(self.genre_ids(id), self.theme_ids(id))?;
        ranking::similar::<Mangas, _>(&self.conn, id, &genre_ids, &theme_ids).await
    }

    pub async fn by_author(
        &self,
        author_id: i32,
        page: PageRequest,
    ) -> Result<(Vec<mangas::Model>, u64)> {
        let select = available::<Mangas>()
            .filter(mangas::Column::AuthorId.eq(author_id))
            .order_by_asc(mangas::Column::Id);

        catalog::paginate(&self.conn, select, page).await
    }

    pub async fn characters(&self, manga_id: i32) -> Result<Vec<characters::Model>> {
        Ok(available::<Characters>()
            .filter(characters::Column::MangaId.eq(manga_id))
            .order_by_asc(characters::Column::Id)
            .all(&self.conn)
            .await?)
    }
}

async fn replace_genres<C: ConnectionTrait>(conn: &C, manga_id: i32, genre_ids: &[i32]) -> Result<()> {
    MangaGenres::delete_many()
        .filter(manga_genres::Column::MangaId.eq(manga_id))
        .exec(conn)
        .await?;

    if genre_ids.is_empty() {
        return Ok(());
    }

    let links = genre_ids.iter().map(|&genre_id| manga_genres::ActiveModel {
        manga_id: Set(manga_id),
        genre_id: Set(genre_id),
    });

    MangaGenres::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

async fn replace_themes<C: ConnectionTrait>(conn: &C, manga_id: i32, theme_ids: &[i32]) -> Result<()> {
    MangaThemes::delete_many()
        .filter(manga_themes::Column::MangaId.eq(manga_id))
        .exec(conn)
        .await?;

    if theme_ids.is_empty() {
        return Ok(());
    }

    let links = theme_ids.iter().map(|&theme_id| manga_themes::ActiveModel {
        manga_id: Set(manga_id),
        theme_id: Set(theme_id),
    });

    MangaThemes::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
