//! RosterStore implementation: campaigns, field reps, doctors, collaterals

use std::str::FromStr;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, sea_query::Expr,
};
use tracing::{debug, warn};

use super::SeaOrmStorage;
use super::query::{CountRow, scoped, to_count};
use crate::errors::{InsightsError, Result};
use crate::storage::models::{Campaign, CollateralInfo, CollateralKind, DateWindow, Registration};
use crate::storage::traits::RosterStore;

use migration::entities::{campaign, campaign_collateral, collateral, doctor, field_rep};

impl From<campaign::Model> for Campaign {
    fn from(model: campaign::Model) -> Self {
        Campaign {
            campaign_id: model.campaign_id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

#[async_trait]
impl RosterStore for SeaOrmStorage {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let models = campaign::Entity::find()
            .order_by_asc(campaign::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Campaign::from).collect())
    }

    async fn find_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>> {
        let model = campaign::Entity::find()
            .filter(campaign::Column::CampaignId.eq(campaign_id))
            .one(&self.db)
            .await?;
        Ok(model.map(Campaign::from))
    }

    async fn count_distinct_field_reps(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<u64> {
        let row = field_rep::Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(DISTINCT field_id)"), "count")
            .filter(scoped(
                field_rep::Column::CampaignId,
                campaign_id,
                field_rep::Column::RegisteredAt,
                window,
            ))
            .into_model::<CountRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(|r| to_count(r.count)).unwrap_or(0))
    }

    async fn count_distinct_doctors(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<u64> {
        let row = doctor::Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(DISTINCT phone)"), "count")
            .filter(scoped(
                doctor::Column::CampaignId,
                campaign_id,
                doctor::Column::RegisteredAt,
                window,
            ))
            .into_model::<CountRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(|r| to_count(r.count)).unwrap_or(0))
    }

    async fn scan_registrations<'a>(
        &'a self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<BoxStream<'a, Result<Registration>>> {
        let stream = doctor::Entity::find()
            .filter(scoped(
                doctor::Column::CampaignId,
                campaign_id,
                doctor::Column::RegisteredAt,
                window,
            ))
            .order_by_asc(doctor::Column::Id)
            .stream(&self.db)
            .await?;

        Ok(stream
            .map(|row| row.map(Registration::from).map_err(InsightsError::from))
            .boxed())
    }

    async fn list_repeated_registrations(&self, campaign_id: &str) -> Result<Vec<Registration>> {
        let repeated_phones = doctor::Entity::find()
            .select_only()
            .column(doctor::Column::Phone)
            .filter(doctor::Column::CampaignId.eq(campaign_id))
            .group_by(doctor::Column::Phone)
            .having(Expr::cust("COUNT(*) > 1"))
            .into_query();

        let models = doctor::Entity::find()
            .filter(doctor::Column::CampaignId.eq(campaign_id))
            .filter(doctor::Column::Phone.in_subquery(repeated_phones))
            .order_by_asc(doctor::Column::Phone)
            .order_by_asc(doctor::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Registration::from).collect())
    }

    async fn list_field_rep_ids(&self, campaign_id: &str) -> Result<Vec<String>> {
        field_rep::Entity::find()
            .select_only()
            .column(field_rep::Column::FieldId)
            .filter(field_rep::Column::CampaignId.eq(campaign_id))
            .order_by_asc(field_rep::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn list_collaterals(&self) -> Result<Vec<CollateralInfo>> {
        let models = collateral::Entity::find()
            .order_by_asc(collateral::Column::Id)
            .all(&self.db)
            .await?;

        let total = models.len();
        let items: Vec<CollateralInfo> = models
            .into_iter()
            .filter_map(|m| match CollateralKind::from_str(&m.kind) {
                Ok(kind) => Some(CollateralInfo {
                    id: m.id,
                    title: m.title,
                    kind,
                }),
                Err(_) => {
                    warn!("Skipping collateral {} with unknown kind '{}'", m.id, m.kind);
                    None
                }
            })
            .collect();

        debug!("Loaded {}/{} collaterals", items.len(), total);
        Ok(items)
    }

    async fn list_campaign_collateral_ids(&self, campaign_id: &str) -> Result<Vec<i64>> {
        campaign_collateral::Entity::find()
            .select_only()
            .column(campaign_collateral::Column::CollateralId)
            .filter(campaign_collateral::Column::CampaignId.eq(campaign_id))
            .order_by_asc(campaign_collateral::Column::CollateralId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }
}
