use sea_orm::entity::prelude::*;
use sea_orm::Condition;

use crate::domain::availability::{HasAvailability, Searchable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub name_kanji: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub image: Option<String>,
    pub anime_id: Option<i32>,
    pub manga_id: Option<i32>,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animes::Entity",
        from = "Column::AnimeId",
        to = "super::animes::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Anime,
    #[sea_orm(
        belongs_to = "super::mangas::Entity",
        from = "Column::MangaId",
        to = "super::mangas::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Manga,
}

impl Related<super::animes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::mangas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manga.def()
    }
}

impl Related<super::persons::Entity> for Entity {
    fn to() -> RelationDef {
        super::character_voices::Relation::Person.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::character_voices::Relation::Character.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl HasAvailability for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn available_column() -> Column {
        Column::Available
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }
}

impl Searchable for Entity {
    fn search_column() -> Column {
        Column::Name
    }

    fn search_condition(term: &str) -> Condition {
        Condition::any()
            .add(Column::Name.contains(term))
            .add(Column::NameKanji.contains(term))
    }
}
