//! Collateral reference catalog (id → title / type)

use std::collections::BTreeMap;

use tracing::info;

use crate::errors::Result;
use crate::storage::{CollateralInfo, CollateralKind, RosterStore};

/// 启动时加载一次，注入聚合器
#[derive(Debug, Clone, Default)]
pub struct CollateralCatalog {
    items: BTreeMap<i64, CollateralInfo>,
}

impl CollateralCatalog {
    pub fn new(items: impl IntoIterator<Item = CollateralInfo>) -> Self {
        Self {
            items: items.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub async fn load(store: &dyn RosterStore) -> Result<Self> {
        let catalog = Self::new(store.list_collaterals().await?);
        info!("Collateral catalog loaded: {} entries", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, id: i64) -> Option<&CollateralInfo> {
        self.items.get(&id)
    }

    /// 未登记的 collateral 使用生成的标题
    pub fn title_for(&self, id: i64) -> String {
        self.get(id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| format!("Collateral {}", id))
    }

    pub fn kind_for(&self, id: i64) -> Option<CollateralKind> {
        self.get(id).map(|c| c.kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
