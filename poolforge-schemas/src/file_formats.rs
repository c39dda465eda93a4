use crate::{
    chlorine::ChlorineProduct,
    standards::RegionStandards,
    water::{PoolType, Targets},
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenNumbers {
    pub pool_type: PoolType,
    #[serde(flatten)]
    pub targets: Targets,
}

#[derive(Debug, Deserialize)]
pub struct GoldenNumbersFile {
    pub schema_version: String,
    pub golden_numbers: Vec<GoldenNumbers>,
}

#[derive(Debug, Deserialize)]
pub struct StandardsFile {
    pub schema_version: String,
    pub regions: Vec<RegionStandards>,
}

#[derive(Debug, Deserialize)]
pub struct ChlorineProductFile {
    pub schema_version: String,
    pub chlorine_products: Vec<ChlorineProduct>,
}
