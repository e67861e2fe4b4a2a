//! 名册表迁移
//!
//! 创建 campaigns、field_reps、doctors、collaterals 四张表。
//! doctors 不对 (campaign_id, phone) 加唯一约束：同一医生被多个代表重复登记是正常数据。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CampaignId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Campaigns::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Campaigns::StartDate).date().not_null())
                    .col(ColumnDef::new(Campaigns::EndDate).date().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FieldReps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FieldReps::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FieldReps::CampaignId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FieldReps::FieldId).string_len(64).not_null())
                    .col(ColumnDef::new(FieldReps::Name).string_len(255).null())
                    .col(ColumnDef::new(FieldReps::Zone).string_len(100).null())
                    .col(ColumnDef::new(FieldReps::Region).string_len(100).null())
                    .col(ColumnDef::new(FieldReps::Area).string_len(100).null())
                    .col(
                        ColumnDef::new(FieldReps::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doctors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doctors::CampaignId).string_len(32).not_null())
                    .col(ColumnDef::new(Doctors::FieldId).string_len(64).not_null())
                    .col(ColumnDef::new(Doctors::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Doctors::Phone).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Doctors::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collaterals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Collaterals::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collaterals::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Collaterals::Kind).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Collaterals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FieldReps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Campaigns {
    #[sea_orm(iden = "campaigns")]
    Table,
    Id,
    CampaignId,
    Name,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum FieldReps {
    #[sea_orm(iden = "field_reps")]
    Table,
    Id,
    CampaignId,
    FieldId,
    Name,
    Zone,
    Region,
    Area,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum Doctors {
    #[sea_orm(iden = "doctors")]
    Table,
    Id,
    CampaignId,
    FieldId,
    Name,
    Phone,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum Collaterals {
    #[sea_orm(iden = "collaterals")]
    Table,
    Id,
    Title,
    Kind,
}
