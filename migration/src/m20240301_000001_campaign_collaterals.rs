//! 活动物料分配表
//!
//! campaign_collaterals 记录每个活动投放的 collateral，
//! 明细报表以此为全集，没有事务的物料按 0 展示。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UNIQUE_INDEX: &str = "idx_campaign_collaterals_unique";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampaignCollaterals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignCollaterals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignCollaterals::CampaignId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignCollaterals::CollateralId)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(UNIQUE_INDEX)
                    .table(CampaignCollaterals::Table)
                    .col(CampaignCollaterals::CampaignId)
                    .col(CampaignCollaterals::CollateralId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CampaignCollaterals::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CampaignCollaterals {
    #[sea_orm(iden = "campaign_collaterals")]
    Table,
    Id,
    CampaignId,
    CollateralId,
}
