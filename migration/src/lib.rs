pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20240301_000001_combs;
mod m20240301_000002_honey;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_combs::Migration),
            Box::new(m20240301_000002_honey::Migration),
        ]
    }
}
