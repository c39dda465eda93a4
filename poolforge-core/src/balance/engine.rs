use super::stage::{BalanceContext, BalanceStage};
use crate::dose;
use poolforge_schemas::{
    dosing::{DosingStep, StepKey, WaterBalanceReport},
    water::Targets,
};
use tracing::{debug, info};

/// Alkalinity above this is lowered on its own before anything else is adjusted.
pub const SUPER_HIGH_ALKALINITY: f64 = 180.0;
/// Calcium above this forces the lower pH target.
pub const SUPER_HIGH_CALCIUM: f64 = 600.0;
pub const ALKALINITY_REDUCTION_TARGET: f64 = 100.0;
pub const ALKALINITY_REDUCTION_DAYS: u32 = 3;
pub const HIGH_CALCIUM_PH_TARGET: f64 = 7.2;
pub const SCALING_LSI: f64 = 0.5;

const EXTREME_ALKALINITY_NOTE: &str = "Alkalinity is extremely high. Lower alkalinity in stages \
     over 3 days before adjusting other parameters.";
const EXTREME_ALKALINITY_AND_CALCIUM_NOTE: &str = "Both alkalinity and calcium are extremely \
     high. Address alkalinity first, then manage calcium with lower pH target (7.2) in \
     subsequent visits.";
const EXTREME_CALCIUM_NOTE: &str = "Calcium is extremely high (>600 ppm) and alkalinity is \
     manageable. Lower pH target to 7.2 for LSI balance.";
const SCALING_NOTE: &str =
    "LSI is in extreme scaling condition (>0.5). Prioritize lowering alkalinity and pH.";

pub struct BalanceEngine {
    pub(super) context: BalanceContext,
    pub(super) lsi: f64,
}

impl BalanceEngine {
    pub(crate) fn new(context: BalanceContext, lsi: f64) -> Self {
        Self { context, lsi }
    }

    /// Produces the dosing steps and notes for the configured water.
    ///
    /// Pure: repeated calls return identical reports.
    #[tracing::instrument(skip(self), fields(pool_type = %self.context.pool_type, volume = self.context.volume_gallons))]
    pub fn run(&self) -> WaterBalanceReport {
        let current = &self.context.current;

        if current.alkalinity > SUPER_HIGH_ALKALINITY {
            info!(alkalinity = current.alkalinity, "alkalinity overrides all other targets");
            return self.alkalinity_reduction_plan();
        }

        let mut notes = Vec::new();
        let targets = self.effective_targets();
        if current.calcium > SUPER_HIGH_CALCIUM {
            info!(calcium = current.calcium, "lowering pH target for high calcium");
            notes.push(EXTREME_CALCIUM_NOTE.to_string());
        }

        if self.lsi > SCALING_LSI
            && (current.alkalinity > targets.alkalinity || current.ph > targets.ph)
        {
            notes.push(SCALING_NOTE.to_string());
        }

        let context = BalanceContext {
            targets,
            ..self.context
        };
        let (steps, final_ph) = BalanceStage::ORDER.iter().fold(
            (Vec::with_capacity(BalanceStage::ORDER.len()), current.ph),
            |(mut steps, ph), stage| {
                let outcome = stage.apply(&context, ph);
                debug!(stage = ?stage, ph_in = ph, ph_out = outcome.anticipated_ph, dose = ?outcome.step.dose);
                notes.extend(outcome.notes);
                steps.push(outcome.step);
                (steps, outcome.anticipated_ph)
            },
        );
        debug!(final_ph, "water balance complete");

        WaterBalanceReport { steps, notes }
    }

    /// Targets after the high-calcium rule has been applied.
    pub fn effective_targets(&self) -> Targets {
        let mut targets = self.context.targets;
        if !(self.context.current.alkalinity > SUPER_HIGH_ALKALINITY)
            && self.context.current.calcium > SUPER_HIGH_CALCIUM
        {
            targets.ph = HIGH_CALCIUM_PH_TARGET;
        }
        targets
    }

    pub fn context(&self) -> &BalanceContext {
        &self.context
    }

    pub fn lsi(&self) -> f64 {
        self.lsi
    }

    fn alkalinity_reduction_plan(&self) -> WaterBalanceReport {
        let current = &self.context.current;
        let dose = dose::split_acid_dose(
            current.alkalinity,
            ALKALINITY_REDUCTION_TARGET,
            self.context.volume_gallons,
            ALKALINITY_REDUCTION_DAYS,
        );

        let mut step = DosingStep::new(
            StepKey::Alkalinity,
            current.alkalinity,
            ALKALINITY_REDUCTION_TARGET,
            dose,
        );
        step.note = Some(EXTREME_ALKALINITY_NOTE.to_string());

        let mut notes = vec![EXTREME_ALKALINITY_NOTE.to_string()];
        if current.calcium > SUPER_HIGH_CALCIUM {
            notes.push(EXTREME_ALKALINITY_AND_CALCIUM_NOTE.to_string());
        }

        WaterBalanceReport {
            steps: vec![step],
            notes,
        }
    }
}
