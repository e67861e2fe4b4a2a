//! Field representative roster entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "field_reps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: String,
    /// Unique within a campaign, but uploads may repeat it
    pub field_id: String,
    pub name: Option<String>,
    pub zone: Option<String>,
    pub region: Option<String>,
    pub area: Option<String>,
    pub registered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
