//! Water balance: ordered dosing steps for alkalinity, calcium, CYA and pH.

pub mod builder;
pub mod engine;
pub mod stage;

pub use builder::BalanceBuilder;
pub use engine::BalanceEngine;
pub use stage::{BalanceContext, BalanceStage};

use crate::lsi;
use poolforge_schemas::{
    dosing::WaterBalanceReport,
    lsi::LsiInput,
    water::{Measurements, PoolType, TargetOverrides},
};
use serde::{Deserialize, Serialize};

/// A complete water balance request as a caller would submit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRequest {
    #[serde(default)]
    pub pool_type: PoolType,
    #[serde(default = "default_volume")]
    pub volume_gallons: f64,
    pub current: Measurements,
    #[serde(default)]
    pub targets: TargetOverrides,
}

fn default_volume() -> f64 {
    builder::DEFAULT_VOLUME_GALLONS
}

/// Runs the engine without the builder's volume check, so bad input surfaces as NaN in
/// the output rather than as an error.
pub fn water_balance_steps(request: &BalanceRequest) -> WaterBalanceReport {
    let context = BalanceContext {
        pool_type: request.pool_type,
        volume_gallons: request.volume_gallons,
        current: request.current,
        targets: request.pool_type.golden_numbers().with_overrides(&request.targets),
    };
    let lsi = lsi::advanced_lsi(&LsiInput::from(&request.current));
    BalanceEngine::new(context, lsi).run()
}

pub fn from_request(request: &BalanceRequest) -> BalanceBuilder {
    BalanceBuilder::new()
        .with_pool_type(request.pool_type)
        .with_volume_gallons(request.volume_gallons)
        .with_measurements(request.current)
        .with_overrides(request.targets)
}
