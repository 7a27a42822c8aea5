use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Genres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Themes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Studios)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Authors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Animes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Mangas)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(AnimeGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(AnimeThemes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(MangaGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(MangaThemes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Characters)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Persons)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CharacterVoices)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Playlists)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(PlaylistAnimes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(News)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlaylistAnimes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playlists).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CharacterVoices).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Persons).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Characters).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MangaThemes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MangaGenres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeThemes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeGenres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Mangas).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Animes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Studios).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
