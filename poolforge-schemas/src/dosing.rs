use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    Alkalinity,
    Calcium,
    Cya,
    Ph,
}

impl StepKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::Alkalinity => "alkalinity",
            StepKey::Calcium => "calcium",
            StepKey::Cya => "cya",
            StepKey::Ph => "ph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepKey::Alkalinity => "Total Alkalinity",
            StepKey::Calcium => "Calcium Hardness",
            StepKey::Cya => "Cyanuric Acid",
            StepKey::Ph => "pH",
        }
    }
}

/// One row of a water balance recommendation.
///
/// `dose` is `None` when the parameter needs no movement. The `anticipated_*` fields are
/// only filled by stages that shift pH as a side effect of their primary dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingStep {
    pub key: StepKey,
    pub parameter: String,
    pub current: f64,
    pub target: f64,
    pub dose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipated_ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipated_acid_dose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipated_soda_ash_dose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DosingStep {
    pub fn new(key: StepKey, current: f64, target: f64, dose: Option<String>) -> Self {
        Self {
            key,
            parameter: key.label().to_string(),
            current,
            target,
            dose,
            anticipated_ph: None,
            anticipated_acid_dose: None,
            anticipated_soda_ash_dose: None,
            note: None,
        }
    }

    /// The follow-up dose an operator applies after the primary one disperses, if any.
    pub fn secondary_dose(&self) -> Option<&str> {
        self.anticipated_acid_dose
            .as_deref()
            .or(self.anticipated_soda_ash_dose.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterBalanceReport {
    pub steps: Vec<DosingStep>,
    pub notes: Vec<String>,
}

impl WaterBalanceReport {
    pub fn step(&self, key: StepKey) -> Option<&DosingStep> {
        self.steps.iter().find(|s| s.key == key)
    }

    /// Steps that carry a dose, in application order.
    pub fn actionable_steps(&self) -> impl Iterator<Item = &DosingStep> {
        self.steps.iter().filter(|s| s.dose.is_some())
    }
}
