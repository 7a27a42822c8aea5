use sea_orm::entity::prelude::*;

use crate::domain::availability::{HasAvailability, Searchable};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mangas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub name_jpn: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub media_type: String,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub status: String,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub author_id: Option<i32>,
    pub is_recommended: bool,
    pub score: Option<f64>,
    pub ranked: Option<i32>,
    pub popularity: i32,
    pub members: i32,
    pub favorites: i32,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::authors::Entity",
        from = "Column::AuthorId",
        to = "super::authors::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(has_many = "super::characters::Entity")]
    Characters,
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::characters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Characters.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::manga_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::manga_genres::Relation::Manga.def().rev())
    }
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        super::manga_themes::Relation::Theme.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::manga_themes::Relation::Manga.def().rev())
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
}
