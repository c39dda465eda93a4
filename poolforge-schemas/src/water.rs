use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    #[default]
    Pool,
    Spa,
}

impl PoolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolType::Pool => "pool",
            PoolType::Spa => "spa",
        }
    }

    /// Built-in golden numbers, used when no reference table overrides them.
    pub fn golden_numbers(&self) -> Targets {
        match self {
            PoolType::Pool => Targets {
                ph: 7.6,
                alkalinity: 100.0,
                calcium: 300.0,
                cya: 30.0,
            },
            PoolType::Spa => Targets {
                ph: 7.5,
                alkalinity: 80.0,
                calcium: 300.0,
                cya: 0.0,
            },
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single water test. Concentrations are in ppm, temperature in °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub ph: f64,
    pub alkalinity: f64,
    pub calcium: f64,
    #[serde(default)]
    pub cya: f64,
    #[serde(default = "default_temp_f")]
    pub temp_f: f64,
    #[serde(default = "default_tds")]
    pub tds: f64,
}

fn default_temp_f() -> f64 {
    77.0
}

fn default_tds() -> f64 {
    1000.0
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            ph: 7.5,
            alkalinity: 0.0,
            calcium: 0.0,
            cya: 0.0,
            temp_f: default_temp_f(),
            tds: default_tds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub ph: f64,
    pub alkalinity: f64,
    pub calcium: f64,
    pub cya: f64,
}

impl Targets {
    pub fn with_overrides(mut self, overrides: &TargetOverrides) -> Self {
        if let Some(ph) = overrides.ph {
            self.ph = ph;
        }
        if let Some(alkalinity) = overrides.alkalinity {
            self.alkalinity = alkalinity;
        }
        if let Some(calcium) = overrides.calcium {
            self.calcium = calcium;
        }
        if let Some(cya) = overrides.cya {
            self.cya = cya;
        }
        self
    }
}

/// Per-field target overrides ("expert mode").
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alkalinity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cya: Option<f64>,
}

impl TargetOverrides {
    pub fn is_empty(&self) -> bool {
        self.ph.is_none() && self.alkalinity.is_none() && self.calcium.is_none() && self.cya.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_present_fields() {
        let merged = PoolType::Pool.golden_numbers().with_overrides(&TargetOverrides {
            ph: Some(7.4),
            cya: Some(50.0),
            ..Default::default()
        });
        assert_eq!(merged.ph, 7.4);
        assert_eq!(merged.cya, 50.0);
        assert_eq!(merged.alkalinity, 100.0);
        assert_eq!(merged.calcium, 300.0);
    }

    #[test]
    fn pool_type_uses_lowercase_names() {
        let spa: PoolType = serde_json::from_str("\"spa\"").unwrap();
        assert_eq!(spa, PoolType::Spa);
        assert_eq!(serde_json::to_string(&PoolType::Pool).unwrap(), "\"pool\"");
    }

    #[test]
    fn measurements_fill_in_temperature_and_tds() {
        let m: Measurements =
            serde_json::from_str(r#"{"ph": 7.4, "alkalinity": 90, "calcium": 250}"#).unwrap();
        assert_eq!(m.cya, 0.0);
        assert_eq!(m.temp_f, 77.0);
        assert_eq!(m.tds, 1000.0);
    }
}
