use anyhow::{ensure, Context, Result};
use poolforge_schemas::water::{Measurements, PoolType, TargetOverrides};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A site visit: what was measured and what the operator wants reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTestRequest {
    #[serde(default)]
    pub pool_type: PoolType,
    pub volume_gallons: f64,
    /// Jurisdiction whose health-code ranges apply.
    pub region: String,
    #[serde(default = "default_chlorine_product")]
    pub chlorine_product_id: String,
    pub readings: Readings,
    #[serde(default)]
    pub targets: TargetOverrides,
    /// Salt generator target; the salt section is skipped without a salt reading.
    #[serde(default = "default_target_salt")]
    pub target_salt: f64,
    /// Step between rows of the chlorine dose table.
    #[serde(default = "default_chlorine_increment")]
    pub chlorine_increment: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Readings {
    pub ph: f64,
    pub alkalinity: f64,
    pub calcium: f64,
    #[serde(default)]
    pub cya: f64,
    #[serde(default = "default_temp_f")]
    pub temp_f: f64,
    #[serde(default = "default_tds")]
    pub tds: f64,
    pub free_chlorine: f64,
    pub total_chlorine: f64,
    #[serde(default)]
    pub salt: Option<f64>,
}

/// Finest step accepted for the chlorine dose table.
pub const MIN_CHLORINE_INCREMENT: f64 = 0.1;

fn default_chlorine_product() -> String {
    "liquid-12.5".to_string()
}

fn default_target_salt() -> f64 {
    3200.0
}

fn default_chlorine_increment() -> f64 {
    0.5
}

fn default_temp_f() -> f64 {
    77.0
}

fn default_tds() -> f64 {
    1000.0
}

impl Readings {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            ph: self.ph,
            alkalinity: self.alkalinity,
            calcium: self.calcium,
            cya: self.cya,
            temp_f: self.temp_f,
            tds: self.tds,
        }
    }
}

impl WaterTestRequest {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let request: Self = serde_yaml::from_str(content).context("Failed to parse request YAML")?;
        request.check()?;
        Ok(request)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid request {:?}", path))
    }

    /// Checks the chlorine readings; water readings are checked by the core validator.
    fn check(&self) -> Result<()> {
        let readings = &self.readings;
        for (field, value) in [
            ("free_chlorine", readings.free_chlorine),
            ("total_chlorine", readings.total_chlorine),
            ("salt", readings.salt.unwrap_or(0.0)),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "Reading '{field}' must be a finite, non-negative number, got {value}"
            );
        }
        ensure!(
            self.chlorine_increment >= MIN_CHLORINE_INCREMENT,
            "chlorine_increment must be at least {MIN_CHLORINE_INCREMENT} ppm, got {}",
            self.chlorine_increment
        );
        Ok(())
    }
}
