use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LsiInput {
    pub ph: f64,
    pub temp_f: f64,
    pub calcium: f64,
    pub alkalinity: f64,
    pub cya: f64,
    pub tds: f64,
}

impl From<&crate::water::Measurements> for LsiInput {
    fn from(m: &crate::water::Measurements) -> Self {
        Self {
            ph: m.ph,
            temp_f: m.temp_f,
            calcium: m.calcium,
            alkalinity: m.alkalinity,
            cya: m.cya,
            tds: m.tds,
        }
    }
}

/// Saturation index together with the factors it was assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LsiReport {
    pub lsi: f64,
    pub ph: f64,
    pub alkalinity: f64,
    pub corrected_alkalinity: f64,
    pub alkalinity_factor: f64,
    pub calcium: f64,
    pub calcium_factor: f64,
    pub temp_f: f64,
    pub temp_factor: f64,
    pub tds: f64,
    pub tds_factor: f64,
    pub cya: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LsiCondition {
    VeryCorrosive,
    Corrosive,
    SlightlyCorrosive,
    Balanced,
    SlightlyScaling,
    Scaling,
    VeryScaling,
}

impl LsiCondition {
    pub fn description(&self) -> &'static str {
        match self {
            LsiCondition::VeryCorrosive => "very corrosive",
            LsiCondition::Corrosive => "corrosive",
            LsiCondition::SlightlyCorrosive => "slightly corrosive",
            LsiCondition::Balanced => "balanced",
            LsiCondition::SlightlyScaling => "slightly scaling",
            LsiCondition::Scaling => "scaling",
            LsiCondition::VeryScaling => "very scaling",
        }
    }
}
