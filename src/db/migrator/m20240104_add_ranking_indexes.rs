use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str)] = &[
    ("idx_animes_popularity", "animes(available, popularity DESC, id)"),
    ("idx_animes_recommended", "animes(available, is_recommended, updated_at DESC)"),
    ("idx_animes_studio", "animes(studio_id)"),
    ("idx_mangas_popularity", "mangas(available, popularity DESC, id)"),
    ("idx_mangas_recommended", "mangas(available, is_recommended, updated_at DESC)"),
    ("idx_mangas_author", "mangas(author_id)"),
    ("idx_anime_genres_genre", "anime_genres(genre_id)"),
    ("idx_manga_genres_genre", "manga_genres(genre_id)"),
    ("idx_characters_anime", "characters(anime_id)"),
    ("idx_characters_manga", "characters(manga_id)"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, target) in INDEXES {
            conn.execute_unprepared(&format!("CREATE INDEX IF NOT EXISTS {name} ON {target}"))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
