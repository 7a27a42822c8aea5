//! Popularity, recommendation and similarity queries for anime and manga.

use anyhow::Result;
use sea_orm::sea_query::{NullOrdering, Order, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};

use super::catalog::available;
use crate::domain::HasAvailability;

/// At most this many items come back from [`similar`].
pub const SIMILAR_LIMIT: u64 = 25;

pub trait Ranked: HasAvailability {
    /// Row type produced by the summary projection.
    type Summary: FromQueryResult + Send + Sync;

    fn popularity_column() -> Self::Column;

    fn score_column() -> Self::Column;

    fn recommended_column() -> Self::Column;

    fn summary_columns() -> Vec<Self::Column>;

    /// `SELECT <owner id> FROM <genre link> WHERE genre_id IN (...)`
    fn ids_in_genres(genre_ids: &[i32]) -> SelectStatement;

    fn ids_in_themes(theme_ids: &[i32]) -> SelectStatement;
}

/// Highest popularity first, ties broken by ascending id.
pub async fn popular<E, C>(conn: &C, limit: u64) -> Result<Vec<E::Model>>
where
    E: Ranked,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .order_by_desc(E::popularity_column())
        .order_by_asc(E::id_column())
        .limit(limit)
        .all(conn)
        .await?)
}

pub async fn top_scored<E, C>(conn: &C, limit: u64) -> Result<Vec<E::Model>>
where
    E: Ranked,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .order_by_with_nulls(E::score_column(), Order::Desc, NullOrdering::Last)
        .order_by_asc(E::id_column())
        .limit(limit)
        .all(conn)
        .await?)
}

pub async fn recommended<E, C>(conn: &C) -> Result<Vec<E::Summary>>
where
    E: Ranked,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .filter(E::recommended_column().eq(true))
        .order_by_desc(E::updated_at_column())
        .order_by_asc(E::id_column())
        .select_only()
        .columns(E::summary_columns())
        .into_model::<E::Summary>()
        .all(conn)
        .await?)
}

pub async fn by_genre<E, C>(conn: &C, genre_id: i32) -> Result<Vec<E::Summary>>
where
    E: Ranked,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .filter(E::id_column().in_subquery(E::ids_in_genres(&[genre_id])))
        .order_by_asc(E::id_column())
        .select_only()
        .columns(E::summary_columns())
        .into_model::<E::Summary>()
        .all(conn)
        .await?)
}

/// Items sharing at least one genre or theme with `id`, excluding `id` itself.
///
/// The `IN (subquery)` form keeps each row once even when it shares several
/// genres, so no explicit DISTINCT is needed.
pub async fn similar<E, C>(
    conn: &C,
    id: i32,
    genre_ids: &[i32],
    theme_ids: &[i32],
) -> Result<Vec<E::Model>>
where
    E: Ranked,
    C: ConnectionTrait,
{
    if genre_ids.is_empty() && theme_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut shared = Condition::any();
    if !genre_ids.is_empty() {
        shared = shared.add(E::id_column().in_subquery(E::ids_in_genres(genre_ids)));
    }
    if !theme_ids.is_empty() {
        shared = shared.add(E::id_column().in_subquery(E::ids_in_themes(theme_ids)));
    }

    Ok(available::<E>()
        .filter(E::id_column().ne(id))
        .filter(shared)
        .order_by_asc(E::id_column())
        .limit(SIMILAR_LIMIT)
        .all(conn)
        .await?)
}
