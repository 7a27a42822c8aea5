use sea_orm::entity::prelude::*;

use crate::domain::availability::{HasAvailability, Searchable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub slug: String,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
