//! Collateral transaction entity: one row per share / view / download event

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "collateral_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: String,
    pub field_id: String,
    pub doctor_phone: String,
    pub collateral_id: i64,
    pub transacted_at: DateTimeUtc,
    pub viewed: bool,
    pub pdf_download: Option<bool>,
    pub pdf_last_page_reached: Option<bool>,
    /// 1 = below 50%, 2 = above 50%, 3 = watched to the end
    pub video_watch_bucket: Option<i16>,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::field_rep::Entity",
        from = "(Column::CampaignId, Column::FieldId)",
        to = "(super::field_rep::Column::CampaignId, super::field_rep::Column::FieldId)"
    )]
    FieldRep,
}

impl Related<super::field_rep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FieldRep.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
