//! Availability-aware queries shared by every soft-deletable table.
//!
//! Nothing outside this module should build a `find()` on a catalog table
//! without going through [`available`] unless it means to see hidden rows,
//! in which case it calls [`find_any`] by name.

use std::collections::HashSet;

use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use crate::domain::{
    HasAvailability, ListOrdering, ListQuery, OrderField, PageRequest, Searchable,
};

/// Base query for the default manager: `available = true`.
#[must_use]
pub fn available<E: HasAvailability>() -> Select<E> {
    E::find().filter(E::available_column().eq(true))
}

/// Every available row, ascending id.
pub async fn list_available<E, C>(conn: &C) -> Result<Vec<E::Model>>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .order_by_asc(E::id_column())
        .all(conn)
        .await?)
}

/// Paginated list with the optional `q` search and `ordering` applied.
pub async fn list_page<E, C>(conn: &C, query: &ListQuery) -> Result<(Vec<E::Model>, u64)>
where
    E: Searchable,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    paginate(conn, search_select::<E>(query), query.page).await
}

/// Available rows matching the `q` term, in the requested order.
#[must_use]
pub fn search_select<E: Searchable>(query: &ListQuery) -> Select<E> {
    let mut select = available::<E>();

    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        select = select.filter(E::search_condition(term));
    }

    apply_ordering::<E>(select, query.ordering)
}

#[must_use]
pub fn apply_ordering<E: Searchable>(select: Select<E>, ordering: ListOrdering) -> Select<E> {
    let order = if ordering.order.is_ascending() {
        Order::Asc
    } else {
        Order::Desc
    };

    match ordering.field {
        OrderField::Id => select.order_by(E::id_column(), order),
        OrderField::Name => select
            .order_by(E::search_column(), order)
            .order_by_asc(E::id_column()),
    }
}

/// Runs `select` through a paginator and returns the page plus the total count.
pub async fn paginate<E, C>(
    conn: &C,
    select: Select<E>,
    page: PageRequest,
) -> Result<(Vec<E::Model>, u64)>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(conn, page.page_size);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;

    Ok((items, total))
}

/// First slug derived from `base` that no other row holds: `base`, then
/// `base-2`, `base-3` and so on. Hidden rows count as taken. `exclude` is the
/// row being renamed, which may keep its own slug.
pub async fn unique_slug<E, C>(
    conn: &C,
    column: E::Column,
    base: &str,
    exclude: Option<i32>,
) -> Result<String>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    let mut select = E::find()
        .select_only()
        .column(column)
        .filter(column.starts_with(base));
    if let Some(id) = exclude {
        select = select.filter(E::id_column().ne(id));
    }

    let taken: HashSet<String> = select
        .into_tuple::<String>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    if !taken.contains(base) {
        return Ok(base.to_string());
    }

    (2u64..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .context("No free slug suffix")
}

pub async fn find_available<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    Ok(available::<E>()
        .filter(E::id_column().eq(id))
        .one(conn)
        .await?)
}

/// Lookup that ignores `available`. Used by restore and the review target resolver.
pub async fn find_any<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    Ok(E::find().filter(E::id_column().eq(id)).one(conn).await?)
}

/// Flips the flag and bumps `updated_at`. Returns `false` only when no row has
/// this id; SQLite counts matched rows, so repeating the call still reports `true`.
pub async fn set_available<E, C>(conn: &C, id: i32, available: bool) -> Result<bool>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().to_rfc3339();

    let result = E::update_many()
        .col_expr(E::available_column(), Expr::value(available))
        .col_expr(E::updated_at_column(), Expr::value(now))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn mark_unavailable<E, C>(conn: &C, id: i32) -> Result<bool>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    set_available::<E, C>(conn, id, false).await
}

pub async fn restore<E, C>(conn: &C, id: i32) -> Result<bool>
where
    E: HasAvailability,
    C: ConnectionTrait,
{
    set_available::<E, C>(conn, id, true).await
}

/// Number of distinct ids in `ids` that exist and are available.
pub async fn count_available_ids<E, C>(conn: &C, ids: &[i32]) -> Result<u64>
where
    E: HasAvailability,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }

    Ok(available::<E>()
        .filter(E::id_column().is_in(ids.iter().copied()))
        .count(conn)
        .await?)
}
