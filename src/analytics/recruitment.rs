//! First-recruiter attribution over doctor registration rows
//!
//! Rows must be fed in ascending id order. The first row for a phone number
//! attributes that doctor to its field rep; every later row for the same
//! phone under a different field rep counts as one "same doctor" collision
//! for that later rep. Repeats under the attributing rep are ignored.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use super::TS_EXPORT_PATH;
use crate::errors::{InsightsError, Result};
use crate::storage::Registration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RecruitmentRow {
    pub field_id: String,
    pub unique_doctors: u64,
    pub duplicate_doctors: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RecruitmentTable {
    pub rows: Vec<RecruitmentRow>,
    pub total_unique_doctors: u64,
    pub total_duplicate_doctors: u64,
}

#[derive(Debug, Default)]
struct FieldTally {
    unique: u64,
    duplicates: u64,
}

/// 首位招募代表归属统计
#[derive(Debug, Default)]
pub struct RecruitmentTally {
    first_recruiter: HashMap<String, String>,
    per_field: HashMap<String, FieldTally>,
    field_order: Vec<String>,
    last_id: Option<i64>,
}

impl RecruitmentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置名录中的代表，保证零招募的代表也出现在结果里
    pub fn with_roster<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tally = Self::new();
        for field_id in roster {
            tally.ensure_field(field_id.into());
        }
        tally
    }

    fn ensure_field(&mut self, field_id: String) {
        if !self.per_field.contains_key(&field_id) {
            self.field_order.push(field_id.clone());
            self.per_field.insert(field_id, FieldTally::default());
        }
    }

    /// 处理一行注册记录；id 必须严格递增
    pub fn observe(&mut self, row: &Registration) -> Result<()> {
        if let Some(last) = self.last_id
            && row.id <= last
        {
            return Err(InsightsError::query_failed(format!(
                "Registration rows out of order: id {} after {}",
                row.id, last
            )));
        }
        self.last_id = Some(row.id);
        self.ensure_field(row.field_id.clone());

        match self.first_recruiter.get(&row.phone) {
            None => {
                self.first_recruiter
                    .insert(row.phone.clone(), row.field_id.clone());
                if let Some(tally) = self.per_field.get_mut(&row.field_id) {
                    tally.unique += 1;
                }
            }
            Some(first) if first != &row.field_id => {
                if let Some(tally) = self.per_field.get_mut(&row.field_id) {
                    tally.duplicates += 1;
                }
            }
            Some(_) => {}
        }
        Ok(())
    }

    pub fn finish(self) -> RecruitmentTable {
        let mut per_field = self.per_field;
        let rows: Vec<RecruitmentRow> = self
            .field_order
            .into_iter()
            .map(|field_id| {
                let tally = per_field.remove(&field_id).unwrap_or_default();
                RecruitmentRow {
                    unique_doctors: tally.unique,
                    duplicate_doctors: tally.duplicates,
                    field_id,
                }
            })
            .collect();

        RecruitmentTable {
            total_unique_doctors: rows.iter().map(|r| r.unique_doctors).sum(),
            total_duplicate_doctors: rows.iter().map(|r| r.duplicate_doctors).sum(),
            rows,
        }
    }
}
