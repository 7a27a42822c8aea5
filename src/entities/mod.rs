pub mod prelude;

pub mod anime_genres;
pub mod anime_themes;
pub mod animes;
pub mod authors;
pub mod character_voices;
pub mod characters;
pub mod genres;
pub mod manga_genres;
pub mod manga_themes;
pub mod mangas;
pub mod news;
pub mod persons;
pub mod playlist_animes;
pub mod playlists;
pub mod response_cache;
pub mod reviews;
pub mod studios;
pub mod themes;
pub mod users;
