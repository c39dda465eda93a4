use crate::water::PoolType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeChlorineRange {
    pub min: f64,
    pub max: f64,
    /// Minimum free chlorine as a fraction of CYA. Zero disables the check.
    #[serde(default)]
    pub cya_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionalStandard {
    pub free_chlorine: FreeChlorineRange,
    pub ph: Range,
    pub alkalinity: Range,
    pub cya: Range,
    pub calcium: Range,
}

/// Health-code limits for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStandards {
    pub region: String,
    pub pool: RegionalStandard,
    pub spa: RegionalStandard,
}

impl RegionStandards {
    pub fn for_pool_type(&self, pool_type: PoolType) -> &RegionalStandard {
        match pool_type {
            PoolType::Pool => &self.pool,
            PoolType::Spa => &self.spa,
        }
    }
}
