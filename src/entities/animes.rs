use sea_orm::entity::prelude::*;
use sea_orm::Condition;

use crate::domain::availability::{HasAvailability, Searchable};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "animes")]
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
    pub season: Option<String>,
    pub year: Option<i32>,
    pub media_type: String,
    pub episodes: Option<i32>,
    pub status: String,
    pub aired_from: Option<String>,
    pub aired_to: Option<String>,
    pub studio_id: Option<i32>,
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
        belongs_to = "super::studios::Entity",
        from = "Column::StudioId",
        to = "super::studios::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Studio,
    #[sea_orm(has_many = "super::characters::Entity")]
    Characters,
}

impl Related<super::studios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::characters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Characters.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::anime_genres::Relation::Anime.def().rev())
    }
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_themes::Relation::Theme.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::anime_themes::Relation::Anime.def().rev())
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

    /// Name, or the name of an available studio.
    fn search_condition(term: &str) -> Condition {
        let studios = sea_orm::sea_query::Query::select()
            .column(super::studios::Column::Id)
            .from(super::studios::Entity)
            .and_where(super::studios::Column::Name.contains(term))
            .and_where(super::studios::Column::Available.eq(true))
            .to_owned();

        Condition::any()
            .add(Column::Name.contains(term))
            .add(Column::StudioId.in_subquery(studios))
    }
}
