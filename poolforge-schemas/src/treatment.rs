use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltDose {
    pub lbs_needed: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThiosulfateRow {
    pub target_fc: f64,
    pub dose_oz: f64,
    pub target_fc_display: String,
    pub dose_display: String,
}
