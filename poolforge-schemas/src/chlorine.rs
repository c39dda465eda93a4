use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChlorineKind {
    #[serde(rename = "liquid")]
    Liquid,
    #[serde(rename = "cal-hypo")]
    CalHypo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorineProduct {
    pub product_id: String,
    pub name: String,
    pub kind: ChlorineKind,
    /// Available chlorine as a fraction, e.g. 0.125 for 12.5% liquid.
    pub concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointResult {
    pub combined_chlorine: f64,
    pub breakpoint_target: f64,
    pub ppm_needed: f64,
    pub dose_lbs: f64,
    pub dose_text: Option<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorineDoseRow {
    pub target_fc: f64,
    pub dose_lbs: f64,
    pub dose_display: String,
}
