pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20240105_000001_roster_tables;
mod m20240105_000002_collateral_transactions;
mod m20240212_000001_engagement_indexes;
mod m20240301_000001_campaign_collaterals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240105_000001_roster_tables::Migration),
            Box::new(m20240105_000002_collateral_transactions::Migration),
            Box::new(m20240212_000001_engagement_indexes::Migration),
            Box::new(m20240301_000001_campaign_collaterals::Migration),
        ]
    }
}
