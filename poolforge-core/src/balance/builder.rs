use crate::{
    balance::{engine::BalanceEngine, stage::BalanceContext},
    error::PoolforgeError,
    lsi,
};
use poolforge_schemas::{
    lsi::LsiInput,
    water::{Measurements, PoolType, TargetOverrides, Targets},
};

pub const DEFAULT_VOLUME_GALLONS: f64 = 10_000.0;

/// A fluent builder for constructing a `BalanceEngine`.
///
/// Only the measurements are mandatory. Pool type defaults to `pool`, volume to 10,000
/// gallons, and targets to the pool type's golden numbers.
#[derive(Debug, Default)]
pub struct BalanceBuilder {
    pool_type: PoolType,
    volume_gallons: Option<f64>,
    measurements: Option<Measurements>,
    overrides: TargetOverrides,
    golden_numbers: Option<Targets>,
}

impl BalanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool_type(mut self, pool_type: PoolType) -> Self {
        self.pool_type = pool_type;
        self
    }

    pub fn with_volume_gallons(mut self, gallons: f64) -> Self {
        self.volume_gallons = Some(gallons);
        self
    }

    /// Sets the current water test, including temperature and TDS.
    pub fn with_measurements(mut self, measurements: Measurements) -> Self {
        self.measurements = Some(measurements);
        self
    }

    /// Per-field targets that replace the golden numbers.
    pub fn with_overrides(mut self, overrides: TargetOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replaces the built-in golden numbers, e.g. with ones loaded from a reference table.
    pub fn with_golden_numbers(mut self, targets: Targets) -> Self {
        self.golden_numbers = Some(targets);
        self
    }

    /// Consumes the builder and returns a configured `BalanceEngine`.
    ///
    /// # Errors
    ///
    /// Returns a `PoolforgeError` if no measurements were provided or the volume is not a
    /// positive, finite number of gallons.
    pub fn build(self) -> Result<BalanceEngine, PoolforgeError> {
        let current = self.measurements.ok_or(PoolforgeError::MeasurementsNotDefined)?;

        let volume_gallons = self.volume_gallons.unwrap_or(DEFAULT_VOLUME_GALLONS);
        if !volume_gallons.is_finite() || volume_gallons <= 0.0 {
            return Err(PoolforgeError::InvalidVolume(volume_gallons));
        }

        let targets = self
            .golden_numbers
            .unwrap_or_else(|| self.pool_type.golden_numbers())
            .with_overrides(&self.overrides);

        Ok(BalanceEngine::new(
            BalanceContext {
                pool_type: self.pool_type,
                volume_gallons,
                current,
                targets,
            },
            lsi::advanced_lsi(&LsiInput::from(&current)),
        ))
    }
}
