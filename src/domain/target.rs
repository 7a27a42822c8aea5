//! Reviewable catalog kinds and the (tag, id) pair stored on reviews.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{animes, mangas};

/// Closed set of kinds a review may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Anime,
    Manga,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown catalog type: {0}")]
pub struct UnknownKind(pub String);

impl CatalogKind {
    pub const ALL: [Self; 2] = [Self::Anime, Self::Manga];

    /// Stable tag persisted in `reviews.content_type`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }

    /// Collection segment under `/api/v1`.
    #[must_use]
    pub const fn route_segment(&self) -> &'static str {
        match self {
            Self::Anime => "animes",
            Self::Manga => "mangas",
        }
    }

    /// Checks that every registered kind parses back from its own tag.
    ///
    /// # Errors
    ///
    /// Returns the first tag that does not round-trip.
    pub fn verify_registry() -> Result<(), UnknownKind> {
        for kind in Self::ALL {
            let parsed: Self = kind.tag().parse()?;
            if parsed != kind {
                return Err(UnknownKind(kind.tag().to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CatalogKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewTarget {
    #[serde(rename = "type")]
    pub kind: CatalogKind,
    pub id: i32,
}

impl ReviewTarget {
    #[must_use]
    pub const fn new(kind: CatalogKind, id: i32) -> Self {
        Self { kind, id }
    }

    #[must_use]
    pub const fn anime(id: i32) -> Self {
        Self::new(CatalogKind::Anime, id)
    }

    #[must_use]
    pub const fn manga(id: i32) -> Self {
        Self::new(CatalogKind::Manga, id)
    }

    /// Rebuilds a target from the stored `content_type` / `object_id` pair.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKind`] when the tag is not registered.
    pub fn from_parts(tag: &str, id: i32) -> Result<Self, UnknownKind> {
        Ok(Self::new(tag.parse()?, id))
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A resolved review target.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Anime(animes::Model),
    Manga(mangas::Model),
}

impl CatalogItem {
    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        match self {
            Self::Anime(_) => CatalogKind::Anime,
            Self::Manga(_) => CatalogKind::Manga,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::Anime(anime) => anime.id,
            Self::Manga(manga) => manga.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Anime(anime) => &anime.name,
            Self::Manga(manga) => &manga.name,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self {
            Self::Anime(anime) => anime.available,
            Self::Manga(manga) => manga.available,
        }
    }

    #[must_use]
    pub const fn target(&self) -> ReviewTarget {
        ReviewTarget::new(self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in CatalogKind::ALL {
            assert_eq!(kind.tag().parse::<CatalogKind>().unwrap(), kind);
        }
        assert!(CatalogKind::verify_registry().is_ok());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "podcast".parse::<CatalogKind>().unwrap_err();
        assert_eq!(err, UnknownKind("podcast".to_string()));
        assert!(ReviewTarget::from_parts("Anime", 1).is_err());
    }

    #[test]
    fn target_display_and_json() {
        let target = ReviewTarget::manga(7);
        assert_eq!(target.to_string(), "manga:7");

        let json = serde_json::to_value(target).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "manga", "id": 7 }));
    }
}
