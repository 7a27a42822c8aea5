use serde::Serialize;

use crate::db::{AnimeSummary, MangaSummary, NamedRow, ReviewWithAuthor, User, VoiceCredit};
use crate::domain::{PageRequest, ReviewTarget, Role};
use crate::entities::{
    animes, authors, characters, genres, mangas, news, persons, playlists, studios, themes,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        Self {
            count,
            page: request.page,
            page_size: request.page_size,
            total_pages: count.div_ceil(request.page_size),
            results,
        }
    }

    /// Converts each result while keeping the paging numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Genre, theme, studio or author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<NamedRow> for NamedDto {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

macro_rules! named_dto_from {
    ($($module:ident),+) => {
        $(
            impl From<$module::Model> for NamedDto {
                fn from(model: $module::Model) -> Self {
                    Self {
                        id: model.id,
                        name: model.name,
                        slug: model.slug,
                    }
                }
            }
        )+
    };
}

named_dto_from!(genres, themes, studios, authors);

/// Row shape used by anime listings.
#[derive(Debug, Clone, Serialize)]
pub struct AnimeListDto {
    pub id: i32,
    pub name: String,
    pub name_jpn: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub media_type: String,
    pub episodes: Option<i32>,
    pub status: String,
    pub score: Option<f64>,
    pub popularity: i32,
}

impl From<animes::Model> for AnimeListDto {
    fn from(model: animes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            name_jpn: model.name_jpn,
            slug: model.slug,
            image: model.image,
            season: model.season,
            year: model.year,
            media_type: model.media_type,
            episodes: model.episodes,
            status: model.status,
            score: model.score,
            popularity: model.popularity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimeDto {
    pub id: i32,
    pub name: String,
    pub name_jpn: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub media_type: String,
    pub episodes: Option<i32>,
    pub status: String,
    pub aired_from: Option<String>,
    pub aired_to: Option<String>,
    pub studio: Option<NamedDto>,
    pub genres: Vec<NamedDto>,
    pub themes: Vec<NamedDto>,
    pub is_recommended: bool,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    pub popularity: i32,
    pub members: i32,
    pub favorites: i32,
    pub created_at: String,
    pub updated_at: String,
}

pub type AnimeSummaryDto = AnimeSummary;

/// Row shape used by manga listings.
#[derive(Debug, Clone, Serialize)]
pub struct MangaListDto {
    pub id: i32,
    pub name: String,
    pub name_jpn: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub media_type: String,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub status: String,
    pub score: Option<f64>,
    pub popularity: i32,
}

impl From<mangas::Model> for MangaListDto {
    fn from(model: mangas::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            name_jpn: model.name_jpn,
            slug: model.slug,
            image: model.image,
            media_type: model.media_type,
            chapters: model.chapters,
            volumes: model.volumes,
            status: model.status,
            score: model.score,
            popularity: model.popularity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MangaDto {
    pub id: i32,
    pub name: String,
    pub name_jpn: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub media_type: String,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub status: String,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub author: Option<NamedDto>,
    pub genres: Vec<NamedDto>,
    pub themes: Vec<NamedDto>,
    pub is_recommended: bool,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    pub popularity: i32,
    pub members: i32,
    pub favorites: i32,
    pub created_at: String,
    pub updated_at: String,
}

pub type MangaSummaryDto = MangaSummary;

#[derive(Debug, Clone, Serialize)]
pub struct CharacterDto {
    pub id: i32,
    pub name: String,
    pub name_kanji: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
    pub anime_id: Option<i32>,
    pub manga_id: Option<i32>,
}

impl From<characters::Model> for CharacterDto {
    fn from(model: characters::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            name_kanji: model.name_kanji,
            about: model.about,
            image: model.image,
            anime_id: model.anime_id,
            manga_id: model.manga_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonDto {
    pub id: i32,
    pub name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub birthday: Option<String>,
    pub about: Option<String>,
    pub image: Option<String>,
}

impl From<persons::Model> for PersonDto {
    fn from(model: persons::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            given_name: model.given_name,
            family_name: model.family_name,
            birthday: model.birthday,
            about: model.about,
            image: model.image,
        }
    }
}

/// A person credited as the voice of a character.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceDto {
    pub person: PersonDto,
    pub language: String,
}

impl From<VoiceCredit<persons::Model>> for VoiceDto {
    fn from(credit: VoiceCredit<persons::Model>) -> Self {
        Self {
            person: credit.item.into(),
            language: credit.language,
        }
    }
}

/// A character voiced by a person.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDto {
    pub character: CharacterDto,
    pub language: String,
}

impl From<VoiceCredit<characters::Model>> for RoleDto {
    fn from(credit: VoiceCredit<characters::Model>) -> Self {
        Self {
            character: credit.item.into(),
            language: credit.language,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<AnimeListDto>>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<playlists::Model> for PlaylistDto {
    fn from(model: playlists::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            items: None,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsDto {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: Option<String>,
    pub source: Option<String>,
    pub tag: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<news::Model> for NewsDto {
    fn from(model: news::Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            description: model.description,
            content: model.content,
            image: model.image,
            source: model.source,
            tag: model.tag,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewerDto {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: i32,
    pub user: ReviewerDto,
    pub target: Option<ReviewTarget>,
    pub rating: i32,
    pub comment: String,
    pub is_spoiler: bool,
    pub helpful_count: i32,
    pub reported_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewWithAuthor> for ReviewDto {
    fn from((review, author): ReviewWithAuthor) -> Self {
        let username = author.map_or_else(String::new, |user| user.username);

        Self {
            id: review.id,
            user: ReviewerDto {
                id: review.user_id,
                username,
            },
            target: ReviewTarget::from_parts(&review.content_type, review.object_id).ok(),
            rating: review.rating,
            comment: review.comment,
            is_spoiler: review.is_spoiler,
            helpful_count: review.helpful_count,
            reported_count: review.reported_count,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_counts_partial_last_page() {
        let page = Page::new(vec![1, 2, 3], 53, PageRequest::new(3, 25));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);

        let empty: Page<i32> = Page::new(Vec::new(), 0, PageRequest::default());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn page_map_keeps_paging() {
        let page = Page::new(vec![1, 2], 2, PageRequest::default()).map(|n| n * 10);
        assert_eq!(page.results, vec![10, 20]);
        assert_eq!(page.count, 2);
    }
}
