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
    anime_genres, anime_themes, animes, characters, genres, prelude::*, studios, themes,
};
use crate::models::anime::{AnimeInput, AnimePatch};

/// Fixed projection used by the recommended and by-genre listings.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct AnimeSummary {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub aired_from: Option<String>,
    pub aired_to: Option<String>,
    pub media_type: String,
    pub status: String,
}

impl Ranked for Animes {
    type Summary = AnimeSummary;

    fn popularity_column() -> animes::Column {
        animes::Column::Popularity
    }

    fn score_column() -> animes::Column {
        animes::Column::Score
    }

    fn recommended_column() -> animes::Column {
        animes::Column::IsRecommended
    }

    fn summary_columns() -> Vec<animes::Column> {
        vec![
            animes::Column::Id,
            animes::Column::Name,
            animes::Column::Image,
            animes::Column::AiredFrom,
            animes::Column::AiredTo,
            animes::Column::MediaType,
            animes::Column::Status,
        ]
    }

    fn ids_in_genres(genre_ids: &[i32]) -> SelectStatement {
        Query::select()
            .column(anime_genres::Column::AnimeId)
            .from(AnimeGenres)
            .and_where(anime_genres::Column::GenreId.is_in(genre_ids.iter().copied()))
            .to_owned()
    }

    fn ids_in_themes(theme_ids: &[i32]) -> SelectStatement {
        Query::select()
            .column(anime_themes::Column::AnimeId)
            .from(AnimeThemes)
            .and_where(anime_themes::Column::ThemeId.is_in(theme_ids.iter().copied()))
            .to_owned()
    }
}

#[derive(Debug, Clone)]
pub struct AnimeDetail {
    pub anime: animes::Model,
    pub genres: Vec<genres::Model>,
    pub themes: Vec<themes::Model>,
    pub studio: Option<studios::Model>,
}

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<animes::Model>, u64)> {
        catalog::list_page::<Animes, _>(&self.conn, query).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<animes::Model>> {
        catalog::find_available::<Animes, _>(&self.conn, id).await
    }

    pub async fn get_any(&self, id: i32) -> Result<Option<animes::Model>> {
        catalog::find_any::<Animes, _>(&self.conn, id).await
    }

    /// Loads available genres, themes and the studio alongside the anime.
    pub async fn detail(&self, anime: animes::Model) -> Result<AnimeDetail> {
        let (genres, themes, studio) = futures::try_join!(
            anime
                .find_related(Genres)
                .filter(genres::Column::Available.eq(true))
                .order_by_asc(genres::Column::Name)
                .all(&self.conn)
                .err_into::<anyhow::Error>(),
            anime
                .find_related(Themes)
                .filter(themes::Column::Available.eq(true))
                .order_by_asc(themes::Column::Name)
                .all(&self.conn)
                .err_into::<anyhow::Error>(),
            self.studio_of(anime.studio_id),
        )?;

        Ok(AnimeDetail {
            anime,
            genres,
            themes,
            studio,
        })
    }

    async fn studio_of(&self, studio_id: Option<i32>) -> Result<Option<studios::Model>> {
        match studio_id {
            Some(id) => catalog::find_available::<Studios, _>(&self.conn, id).await,
            None => Ok(None),
        }
    }

    /// Inserts a row. `base_slug` gets a numeric suffix when another row already holds it.
    pub async fn create(&self, input: &AnimeInput, base_slug: &str) -> Result<animes::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;
        let slug =
            catalog::unique_slug::<Animes, _>(&txn, animes::Column::Slug, base_slug, None).await?;

        let model = animes::ActiveModel {
            name: Set(input.name.clone()),
            name_jpn: Set(input.name_jpn.clone()),
            slug: Set(slug),
            image: Set(input.image.clone()),
            synopsis: Set(input.synopsis.clone()),
            season: Set(input.season.clone()),
            year: Set(input.year),
            media_type: Set(input.media_type.clone()),
            episodes: Set(input.episodes),
            status: Set(input.status.clone()),
            aired_from: Set(input.aired_from.clone()),
            aired_to: Set(input.aired_to.clone()),
            studio_id: Set(input.studio_id),
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
        anime: animes::Model,
        patch: &AnimePatch,
        base_slug: Option<&str>,
    ) -> Result<animes::Model> {
        let id = anime.id;
        let txn = self.conn.begin().await?;

        let slug = match base_slug {
            Some(base) => Some(
                catalog::unique_slug::<Animes, _>(&txn, animes::Column::Slug, base, Some(id)).await?,
            ),
            None => None,
        };

        let mut active: animes::ActiveModel = anime.into();
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
        if let Some(season) = &patch.season {
            active.season = Set(Some(season.clone()));
        }
        if let Some(year) = patch.year {
            active.year = Set(Some(year));
        }
        if let Some(media_type) = &patch.media_type {
            active.media_type = Set(media_type.clone());
        }
        if let Some(episodes) = patch.episodes {
            active.episodes = Set(Some(episodes));
        }
        if let Some(status) = &patch.status {
            active.status = Set(status.clone());
        }
        if let Some(aired_from) = &patch.aired_from {
            active.aired_from = Set(Some(aired_from.clone()));
        }
        if let Some(aired_to) = &patch.aired_to {
            active.aired_to = Set(Some(aired_to.clone()));
        }
        if let Some(studio_id) = patch.studio_id {
            active.studio_id = Set(Some(studio_id));
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
        catalog::mark_unavailable::<Animes, _>(&self.conn, id).await
    }

    pub async fn restore(&self, id: i32) -> Result<bool> {
        catalog::restore::<Animes, _>(&self.conn, id).await
    }

    pub async fn genre_ids(&self, id: i32) -> Result<Vec<i32>> {
        let links = AnimeGenres::find()
            .filter(anime_genres::Column::AnimeId.eq(id))
            .all(&self.conn)
            .await?;

        Ok(links.into_iter().map(|link| link.genre_id).collect())
    }

    pub async fn theme_ids(&self, id: i32) -> Result<Vec<i32>> {
        let links = AnimeThemes::find()
            .filter(anime_themes::Column::AnimeId.eq(id))
            .all(&self.conn)
            .await?;

        Ok(links.into_iter().map(|link| link.theme_id).collect())
    }

    pub async fn popular(&self, limit: u64) -> Result<Vec<animes::Model>> {
        ranking::popular::<Animes, _>(&self.conn, limit).await
    }

    pub async fn top_scored(&self, limit: u64) -> Result<Vec<animes::Model>> {
        ranking::top_scored::<Animes, _>(&self.conn, limit).await
    }

    pub async fn recommended(&self) -> Result<Vec<AnimeSummary>> {
        ranking::recommended::<Animes, _>(&self.conn).await
    }

    pub async fn by_genre(&self, genre_id: i32) -> Result<Vec<AnimeSummary>> {
        ranking::by_genre::<Animes, _>(&self.conn, genre_id).await
    }

    pub async fn similar(&self, id: i32) -> Result<Vec<animes::Model>> {
        let (genre_ids, theme_ids) = futures::try_join!(self.genre_ids(id), self.theme_ids(id))?;
        ranking::similar::<Animes, _>(&self.conn, id, &genre_ids, &theme_ids).await
    }

    pub async fn by_studio(
        &self,
        studio_id: i32,
        page: PageRequest,
    ) -> Result<(Vec<animes::Model>, u64)> {
        let select = available::<Animes>()
            .filter(animes::Column::StudioId.eq(studio_id))
            .order_by_asc(animes::Column::Id);

        catalog::paginate(&self.conn, select, page).await
    }

    pub async fn characters(&self, anime_id: i32) -> Result<Vec<characters::Model>> {
        Ok(available::<Characters>()
            .filter(characters::Column::AnimeId.eq(anime_id))
            .order_by_asc(characters::Column::Id)
            .all(&self.conn)
            .await?)
    }
}

async fn replace_genres<C: ConnectionTrait>(conn: &C, anime_id: i32, genre_ids: &[i32]) -> Result<()> {
    AnimeGenres::delete_many()
        .filter(anime_genres::Column::AnimeId.eq(anime_id))
        .exec(conn)
        .await?;

    if genre_ids.is_empty() {
        return Ok(());
    }

    let links = genre_ids.iter().map(|&genre_id| anime_genres::ActiveModel {
        anime_id: Set(anime_id),
        genre_id: Set(genre_id),
    });

    AnimeGenres::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

async fn replace_themes<C: ConnectionTrait>(conn: &C, anime_id: i32, theme_ids: &[i32]) -> Result<()> {
    AnimeThemes::delete_many()
        .filter(anime_themes::Column::AnimeId.eq(anime_id))
        .exec(conn)
        .await?;

    if theme_ids.is_empty() {
        return Ok(());
    }

    let links = theme_ids.iter().map(|&theme_id| anime_themes::ActiveModel {
        anime_id: Set(anime_id),
        theme_id: Set(theme_id),
    });

    AnimeThemes::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
