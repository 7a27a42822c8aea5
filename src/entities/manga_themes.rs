use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "manga_themes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub manga_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub theme_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mangas::Entity",
        from = "Column::MangaId",
        to = "super::mangas::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Manga,
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Theme,
}

impl ActiveModelBehavior for ActiveModel {}
