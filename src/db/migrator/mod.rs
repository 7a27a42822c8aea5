use sea_orm_migration::prelude::*;

mod m20240101_initial;
mod m20240102_add_reviews;
mod m20240103_add_response_cache;
mod m20240104_add_ranking_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_initial::Migration),
            Box::new(m20240102_add_reviews::Migration),
            Box::new(m20240103_add_response_cache::Migration),
            Box::new(m20240104_add_ranking_indexes::Migration),
        ]
    }
}
