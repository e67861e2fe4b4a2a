//! 集成测试公共夹具：临时 SQLite 数据库 + ActiveModel 写入

#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tempfile::TempDir;

use collateral_insights::analytics::{CollateralCatalog, EngagementAggregator};
use collateral_insights::config::init_config;
use collateral_insights::storage::{EngagementStore, SeaOrmStorage};

use migration::entities::{
    campaign, campaign_collateral, collateral, collateral_transaction, doctor, field_rep,
};

static INIT: Once = Once::new();

pub fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// 测试数据库；TempDir 必须与存储同生命周期
pub struct TestDb {
    pub storage: Arc<SeaOrmStorage>,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        init_static_config();
        let dir = TempDir::new().expect("创建临时目录失败");
        let db_path = dir.path().join("insights_test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let storage = Arc::new(
            SeaOrmStorage::new(&db_url, "sqlite")
                .await
                .expect("创建存储失败"),
        );
        Self { storage, _dir: dir }
    }

    pub fn db(&self) -> &DatabaseConnection {
        self.storage.get_db()
    }

    /// 以当前目录数据构建聚合器（窗口固定 7 天）
    pub async fn aggregator(&self) -> Arc<EngagementAggregator> {
        let catalog = CollateralCatalog::load(self.storage.as_ref())
            .await
            .expect("加载素材目录失败");
        let store: Arc<dyn EngagementStore> = self.storage.clone();
        Arc::new(EngagementAggregator::new(store, Arc::new(catalog)).with_windows(7, 7))
    }

    pub async fn campaign(&self, campaign_id: &str, start: NaiveDate) {
        campaign::ActiveModel {
            campaign_id: Set(campaign_id.to_string()),
            name: Set(format!("{} launch", campaign_id)),
            start_date: Set(start),
            end_date: Set(None),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("写入 campaign 失败");
    }

    pub async fn field_rep(
        &self,
        campaign_id: &str,
        field_id: &str,
        region: Option<&str>,
        registered_at: DateTime<Utc>,
    ) {
        field_rep::ActiveModel {
            campaign_id: Set(campaign_id.to_string()),
            field_id: Set(field_id.to_string()),
            name: Set(Some(format!("Rep {}", field_id))),
            zone: Set(None),
            region: Set(region.map(str::to_string)),
            area: Set(None),
            registered_at: Set(registered_at),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("写入 field_rep 失败");
    }

    pub async fn doctor(
        &self,
        campaign_id: &str,
        field_id: &str,
        phone: &str,
        registered_at: DateTime<Utc>,
    ) {
        doctor::ActiveModel {
            campaign_id: Set(campaign_id.to_string()),
            field_id: Set(field_id.to_string()),
            name: Set(format!("Dr {}", phone)),
            phone: Set(phone.to_string()),
            registered_at: Set(registered_at),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("写入 doctor 失败");
    }

    pub async fn collateral(&self, id: i64, title: &str, kind: &str) {
        collateral::ActiveModel {
            id: Set(id),
            title: Set(title.to_string()),
            kind: Set(kind.to_string()),
        }
        .insert(self.db())
        .await
        .expect("写入 collateral 失败");
    }

    pub async fn assign_collateral(&self, campaign_id: &str, collateral_id: i64) {
        campaign_collateral::ActiveModel {
            campaign_id: Set(campaign_id.to_string()),
            collateral_id: Set(collateral_id),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("写入 campaign_collateral 失败");
    }

    pub async fn transaction(&self, tx: Tx<'_>) {
        collateral_transaction::ActiveModel {
            campaign_id: Set(tx.campaign_id.to_string()),
            field_id: Set(tx.field_id.to_string()),
            doctor_phone: Set(tx.phone.to_string()),
            collateral_id: Set(tx.collateral_id),
            transacted_at: Set(tx.at),
            viewed: Set(tx.viewed),
            pdf_download: Set(tx.pdf_download),
            pdf_last_page_reached: Set(tx.pdf_last_page),
            video_watch_bucket: Set(tx.video_bucket),
            comment: Set(tx.comment.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("写入 transaction 失败");
    }
}

/// 事务行构造器
#[derive(Debug, Clone, Copy)]
pub struct Tx<'a> {
    pub campaign_id: &'a str,
    pub field_id: &'a str,
    pub phone: &'a str,
    pub collateral_id: i64,
    pub at: DateTime<Utc>,
    pub viewed: bool,
    pub pdf_download: Option<bool>,
    pub pdf_last_page: Option<bool>,
    pub video_bucket: Option<i16>,
    pub comment: &'a str,
}

impl<'a> Tx<'a> {
    /// 分享事件
    pub fn shared(
        campaign_id: &'a str,
        field_id: &'a str,
        phone: &'a str,
        collateral_id: i64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            campaign_id,
            field_id,
            phone,
            collateral_id,
            at,
            viewed: false,
            pdf_download: None,
            pdf_last_page: None,
            video_bucket: None,
            comment: "Collateral Shared",
        }
    }

    /// 查看回执
    pub fn viewed(
        campaign_id: &'a str,
        field_id: &'a str,
        phone: &'a str,
        collateral_id: i64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            viewed: true,
            comment: "collateral viewed",
            ..Self::shared(campaign_id, field_id, phone, collateral_id, at)
        }
    }

    pub fn with_pdf(mut self, downloaded: bool, last_page: bool) -> Self {
        self.pdf_download = Some(downloaded);
        self.pdf_last_page = Some(last_page);
        self
    }

    pub fn with_video(mut self, bucket: i16) -> Self {
        self.video_bucket = Some(bucket);
        self
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
