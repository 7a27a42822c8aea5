//! Domain types for the catalog with strong typing.
//!
//! This module provides the closed set of reviewable kinds, the soft-delete
//! capability shared by every catalog table, and small value types (ratings,
//! roles, orderings) that keep raw strings and integers out of service code.

pub mod availability;
pub mod target;

pub use availability::{HasAvailability, Searchable};
pub use target::{CatalogItem, CatalogKind, ReviewTarget, UnknownKind};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A review score in the closed range `1..=10`.
///
/// # Examples
///
/// ```rust
/// use beehive::domain::Rating;
///
/// let rating = Rating::new(8).unwrap();
/// assert_eq!(rating.value(), 8);
/// assert!(Rating::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
pub struct InvalidRating {
    pub value: i32,
}

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    /// # Errors
    ///
    /// Returns [`InvalidRating`] when `value` is outside `1..=10`.
    pub const fn new(value: i32) -> Result<Self, InvalidRating> {
        if value < Self::MIN || value > Self::MAX {
            return Err(InvalidRating { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Sort order enumeration to replace boolean blindness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    Id,
    /// The searchable text column: `name` for most kinds, `title` for news.
    Name,
}

/// Parsed `ordering` query parameter: `id`, `-id`, `name` or `-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOrdering {
    pub field: OrderField,
    pub order: SortOrder,
}

impl FromStr for ListOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (order, field) = s
            .strip_prefix('-')
            .map_or((SortOrder::Ascending, s), |rest| (SortOrder::Descending, rest));

        let field = match field {
            "id" => OrderField::Id,
            "name" | "title" => OrderField::Name,
            other => return Err(format!("Unsupported ordering field: {other}")),
        };

        Ok(Self { field, order })
    }
}

/// Access level attached to every API user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Contributor,
    Staff,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Contributor => "contributor",
            Self::Staff => "staff",
        }
    }

    /// Roles are ordered, so staff satisfies every contributor requirement.
    #[must_use]
    pub fn satisfies(&self, required: Self) -> bool {
        *self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "contributor" => Ok(Self::Contributor),
            "staff" => Ok(Self::Staff),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsTag {
    #[default]
    Pending,
    Anime,
    Manga,
    Industry,
    Event,
    Review,
}

impl NewsTag {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Industry => "industry",
            Self::Event => "event",
            Self::Review => "review",
        }
    }
}

impl FromStr for NewsTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            "industry" => Ok(Self::Industry),
            "event" => Ok(Self::Event),
            "review" => Ok(Self::Review),
            other => Err(format!("Unknown news tag: {other}")),
        }
    }
}

/// 1-based page request, already clamped to the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Largest row offset SQLite accepts.
    const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

    /// Both values are at least 1. `page` is capped so that the row offset
    /// `page * page_size` stays within the database's signed 64-bit range.
    #[must_use]
    pub fn new(page: u64, page_size: u64) -> Self {
        let page_size = page_size.clamp(1, Self::MAX_OFFSET);

        Self {
            page: page.clamp(1, Self::MAX_OFFSET / page_size),
            page_size,
        }
    }

    /// Zero-based page index as used by sea-orm paginators.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 25)
    }
}

/// Filters shared by every catalog list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: PageRequest,
    pub search: Option<String>,
    pub ordering: ListOrdering,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(10).is_ok());
        assert_eq!(Rating::new(0), Err(InvalidRating { value: 0 }));
        assert!(Rating::new(11).is_err());
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Rating>("7").is_ok());
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }

    #[test]
    fn ordering_parses_direction_prefix() {
        let ordering: ListOrdering = "-name".parse().unwrap();
        assert_eq!(ordering.field, OrderField::Name);
        assert!(!ordering.order.is_ascending());

        let ordering: ListOrdering = "id".parse().unwrap();
        assert_eq!(ordering, ListOrdering::default());

        assert!("popularity".parse::<ListOrdering>().is_err());
    }

    #[test]
    fn role_ordering() {
        assert!(Role::Staff.satisfies(Role::Contributor));
        assert!(Role::Contributor.satisfies(Role::Contributor));
        assert!(!Role::Member.satisfies(Role::Contributor));
        assert_eq!("STAFF".parse::<Role>(), Ok(Role::Staff));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn news_tag_round_trip() {
        for tag in [
            NewsTag::Pending,
            NewsTag::Anime,
            NewsTag::Manga,
            NewsTag::Industry,
            NewsTag::Event,
            NewsTag::Review,
        ] {
            assert_eq!(tag.as_str().parse::<NewsTag>(), Ok(tag));
        }
    }

    #[test]
    fn page_request_is_clamped() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.index(), 0);
    }

    #[test]
    fn page_request_offset_fits_in_i64() {
        let page = PageRequest::new(u64::MAX, 100);
        assert!(page.page > 1);
        let offset = page.page.checked_mul(page.page_size).unwrap();
        assert!(offset <= i64::MAX as u64);

        let page = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, i64::MAX as u64);
    }
}
