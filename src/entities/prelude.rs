pub use super::anime_genres::Entity as AnimeGenres;
pub use super::anime_themes::Entity as AnimeThemes;
pub use super::animes::Entity as Animes;
pub use super::authors::Entity as Authors;
pub use super::character_voices::Entity as CharacterVoices;
pub use super::characters::Entity as Characters;
pub use super::genres::Entity as Genres;
pub use super::manga_genres::Entity as MangaGenres;
pub use super::manga_themes::Entity as MangaThemes;
pub use super::mangas::Entity as Mangas;
pub use super::news::Entity as News;
pub use super::persons::Entity as Persons;
pub use super::playlist_animes::Entity as PlaylistAnimes;
pub use super::playlists::Entity as Playlists;
pub use super::response_cache::Entity as ResponseCache;
pub use super::reviews::Entity as Reviews;
pub use super::studios::Entity as Studios;
pub use super::themes::Entity as Themes;
pub use super::users::Entity as Users;
