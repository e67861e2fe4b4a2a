//! 报表查询索引
//!
//! - doctors (campaign_id, phone)：去重计数与重复医生查询
//! - doctors (campaign_id, registered_at)：注册时间窗口
//! - field_reps (campaign_id, field_id)：区域汇总 JOIN
//! - collateral_transactions (campaign_id, doctor_phone, collateral_id)：分层分布 GROUP BY
//! - collateral_transactions (campaign_id, collateral_id)：单物料明细

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[&str] = &[
    "idx_doctors_campaign_phone",
    "idx_doctors_campaign_registered",
    "idx_field_reps_campaign_field",
    "idx_collateral_tx_doctor_collateral",
    "idx_collateral_tx_campaign_collateral",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(INDEXES[0])
                    .table(Doctors::Table)
                    .col(Doctors::CampaignId)
                    .col(Doctors::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(INDEXES[1])
                    .table(Doctors::Table)
                    .col(Doctors::CampaignId)
                    .col(Doctors::RegisteredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(INDEXES[2])
                    .table(FieldReps::Table)
                    .col(FieldReps::CampaignId)
                    .col(FieldReps::FieldId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(INDEXES[3])
                    .table(CollateralTransactions::Table)
                    .col(CollateralTransactions::CampaignId)
                    .col(CollateralTransactions::DoctorPhone)
                    .col(CollateralTransactions::CollateralId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(INDEXES[4])
                    .table(CollateralTransactions::Table)
                    .col(CollateralTransactions::CampaignId)
                    .col(CollateralTransactions::CollateralId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in INDEXES {
            manager
                .drop_index(Index::drop().if_exists().name(*name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Doctors {
    #[sea_orm(iden = "doctors")]
    Table,
    CampaignId,
    Phone,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum FieldReps {
    #[sea_orm(iden = "field_reps")]
    Table,
    CampaignId,
    FieldId,
}

#[derive(DeriveIden)]
enum CollateralTransactions {
    #[sea_orm(iden = "collateral_transactions")]
    Table,
    CampaignId,
    DoctorPhone,
    CollateralId,
}
