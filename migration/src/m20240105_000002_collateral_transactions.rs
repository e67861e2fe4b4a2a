//! 物料交互事件表迁移
//!
//! collateral_transactions 每行记录一次分享 / 查看 / 下载事件，
//! 同一 (field_id, doctor_phone, collateral_id) 可以出现多行。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CollateralTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollateralTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::CampaignId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::FieldId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::DoctorPhone)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::CollateralId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::TransactedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::Viewed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::PdfDownload)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::PdfLastPageReached)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::VideoWatchBucket)
                            .small_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollateralTransactions::Comment)
                            .text()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动 + 时间范围是所有报表的基础过滤条件
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_collateral_tx_campaign_time")
                    .table(CollateralTransactions::Table)
                    .col(CollateralTransactions::CampaignId)
                    .col(CollateralTransactions::TransactedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_collateral_tx_campaign_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(CollateralTransactions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CollateralTransactions {
    #[sea_orm(iden = "collateral_transactions")]
    Table,
    Id,
    CampaignId,
    FieldId,
    DoctorPhone,
    CollateralId,
    TransactedAt,
    Viewed,
    PdfDownload,
    PdfLastPageReached,
    VideoWatchBucket,
    Comment,
}
