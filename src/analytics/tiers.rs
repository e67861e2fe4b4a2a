//! Collateral tier bucketing: 1, 2-5, 6-10, 11+

use serde::Serialize;
use ts_rs::TS;

use super::TS_EXPORT_PATH;
use crate::storage::HistogramBucket;

/// 触达档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    One,
    TwoToFive,
    SixToTen,
    ElevenPlus,
}

impl Tier {
    /// 0 个 collateral 不属于任何档位
    pub fn for_count(collateral_count: u64) -> Option<Tier> {
        match collateral_count {
            0 => None,
            1 => Some(Tier::One),
            2..=5 => Some(Tier::TwoToFive),
            6..=10 => Some(Tier::SixToTen),
            _ => Some(Tier::ElevenPlus),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::One => "1",
            Tier::TwoToFive => "2-5",
            Tier::SixToTen => "6-10",
            Tier::ElevenPlus => "11+",
        }
    }
}

/// 各档位的医生数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TierDistribution {
    #[serde(rename = "1")]
    pub one: u64,
    #[serde(rename = "2-5")]
    pub two_to_five: u64,
    #[serde(rename = "6-10")]
    pub six_to_ten: u64,
    #[serde(rename = "11+")]
    pub eleven_plus: u64,
}

impl TierDistribution {
    pub fn from_histogram(buckets: &[HistogramBucket]) -> Self {
        buckets.iter().fold(Self::default(), |mut dist, bucket| {
            dist.add(bucket.collateral_count, bucket.doctors);
            dist
        })
    }

    pub fn add(&mut self, collateral_count: u64, doctors: u64) {
        match Tier::for_count(collateral_count) {
            Some(Tier::One) => self.one += doctors,
            Some(Tier::TwoToFive) => self.two_to_five += doctors,
            Some(Tier::SixToTen) => self.six_to_ten += doctors,
            Some(Tier::ElevenPlus) => self.eleven_plus += doctors,
            None => {}
        }
    }

    pub fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::One => self.one,
            Tier::TwoToFive => self.two_to_five,
            Tier::SixToTen => self.six_to_ten,
            Tier::ElevenPlus => self.eleven_plus,
        }
    }

    /// 至少触达一个 collateral 的医生总数
    pub fn total(&self) -> u64 {
        self.one + self.two_to_five + self.six_to_ten + self.eleven_plus
    }

    pub fn as_array(&self) -> [u64; 4] {
        [self.one, self.two_to_five, self.six_to_ten, self.eleven_plus]
    }
}
