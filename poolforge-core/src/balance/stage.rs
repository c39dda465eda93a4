use crate::dose::{self, round_dp, to_fixed};
use poolforge_schemas::{
    dosing::{DosingStep, StepKey},
    water::{Measurements, PoolType, Targets},
};

/// Everything a stage needs to compute its dose. Targets are the effective ones, after any
/// priority rule has adjusted them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceContext {
    pub pool_type: PoolType,
    pub volume_gallons: f64,
    pub current: Measurements,
    pub targets: Targets,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    pub step: DosingStep,
    pub notes: Vec<String>,
    /// pH expected once this stage's chemicals have dispersed.
    pub anticipated_ph: f64,
}

/// One adjustment in the water balance sequence.
///
/// Stages run in [`BalanceStage::ORDER`]; each receives the pH anticipated by the stage
/// before it, so the final pH dose accounts for the bicarb and stabilizer added upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStage {
    Alkalinity,
    Calcium,
    Cya,
    Ph,
}

impl BalanceStage {
    pub const ORDER: [BalanceStage; 4] = [
        BalanceStage::Alkalinity,
        BalanceStage::Calcium,
        BalanceStage::Cya,
        BalanceStage::Ph,
    ];

    pub fn key(&self) -> StepKey {
        match self {
            BalanceStage::Alkalinity => StepKey::Alkalinity,
            BalanceStage::Calcium => StepKey::Calcium,
            BalanceStage::Cya => StepKey::Cya,
            BalanceStage::Ph => StepKey::Ph,
        }
    }

    pub fn apply(&self, ctx: &BalanceContext, ph_in: f64) -> StageOutcome {
        match self {
            BalanceStage::Alkalinity => alkalinity_stage(ctx, ph_in),
            BalanceStage::Calcium => calcium_stage(ctx, ph_in),
            BalanceStage::Cya => cya_stage(ctx, ph_in),
            BalanceStage::Ph => ph_stage(ctx, ph_in),
        }
    }
}

fn alkalinity_stage(ctx: &BalanceContext, ph_in: f64) -> StageOutcome {
    let current = &ctx.current;
    let targets = &ctx.targets;
    let dose = dose::alkalinity_dose(current.alkalinity, targets.alkalinity, ctx.volume_gallons);
    let mut step = DosingStep::new(StepKey::Alkalinity, current.alkalinity, targets.alkalinity, dose);

    if step.dose.is_none() {
        return StageOutcome {
            step,
            notes: Vec::new(),
            anticipated_ph: ph_in,
        };
    }

    let increase = targets.alkalinity - current.alkalinity;
    let ph = round_dp(ph_in + dose::estimate_ph_rise_from_bicarb(increase), 2);
    let expectation = format!(
        "Note: Adding sodium bicarbonate to raise alkalinity by {increase} ppm is expected to \
         raise pH from {ph_in} to approximately {ph}."
    );

    let note = if ph > targets.ph {
        let acid = dose::acid_dose(ph, targets.ph, ctx.volume_gallons, targets.alkalinity);
        let mut note = format!(
            "{expectation} After the bicarb is fully dispersed (wait 10 minutes), test pH and add \
             acid as needed to bring pH down to {}.",
            targets.ph
        );
        if let Some(acid) = &acid {
            note.push_str(&format!(" Recommended acid dose: {acid}."));
        }
        step.anticipated_acid_dose = acid;
        note
    } else {
        expectation
    };

    if ph < targets.ph {
        step.anticipated_soda_ash_dose = dose::soda_ash_dose(ph, targets.ph, ctx.volume_gallons);
    }
    step.anticipated_ph = Some(ph);

    StageOutcome {
        step,
        notes: vec![note],
        anticipated_ph: ph,
    }
}

fn calcium_stage(ctx: &BalanceContext, ph_in: f64) -> StageOutcome {
    let current = ctx.current.calcium;
    let target = ctx.targets.calcium;
    let dose = dose::calcium_dose(current, target, ctx.volume_gallons);
    StageOutcome {
        step: DosingStep::new(StepKey::Calcium, current, target, dose),
        notes: Vec::new(),
        anticipated_ph: ph_in,
    }
}

fn cya_stage(ctx: &BalanceContext, ph_in: f64) -> StageOutcome {
    let current = &ctx.current;
    let targets = &ctx.targets;
    let dose = dose::cya_dose(current.cya, targets.cya, ctx.volume_gallons);
    let mut step = DosingStep::new(StepKey::Cya, current.cya, targets.cya, dose);

    if step.dose.is_none() {
        return StageOutcome {
            step,
            notes: Vec::new(),
            anticipated_ph: ph_in,
        };
    }

    let increase = targets.cya - current.cya;
    let ph = round_dp(ph_in - dose::estimate_ph_drop_from_cya(increase), 2);
    let expectation = format!(
        "Note: Adding cyanuric acid to raise CYA by {increase} ppm is expected to lower pH from \
         {ph_in} to approximately {ph}."
    );

    let note = if ph < targets.ph {
        let soda_ash = dose::soda_ash_dose(ph, targets.ph, ctx.volume_gallons);
        let mut note = format!(
            "{expectation} After the CYA is fully dispersed (wait 30 minutes), test pH and add \
             soda ash as needed to bring pH up to {}.",
            targets.ph
        );
        if let Some(soda_ash) = &soda_ash {
            note.push_str(&format!(" Recommended soda ash dose: {soda_ash}."));
        }
        step.anticipated_soda_ash_dose = soda_ash;
        note
    } else {
        expectation
    };
    step.anticipated_ph = Some(ph);

    StageOutcome {
        step,
        notes: vec![note],
        anticipated_ph: ph,
    }
}

/// Doses from the cascaded pH, while the step still reports the measured pH as `current`.
fn ph_stage(ctx: &BalanceContext, ph_in: f64) -> StageOutcome {
    let targets = &ctx.targets;
    let dose = if ph_in > targets.ph {
        dose::acid_dose(ph_in, targets.ph, ctx.volume_gallons, targets.alkalinity)
    } else if ph_in < targets.ph {
        dose::soda_ash_dose(ph_in, targets.ph, ctx.volume_gallons)
    } else {
        None
    };
    let mut step = DosingStep::new(StepKey::Ph, ctx.current.ph, targets.ph, dose);

    let mut notes = Vec::new();
    let mut anticipated_ph = ph_in;
    if step.dose.is_some() {
        let note = format!(
            "This pH dose is calculated based on an anticipated pH of {} after other adjustments.",
            to_fixed(ph_in, 2)
        );
        notes.push(note.clone());
        step.note = Some(note);
        anticipated_ph = targets.ph;
    }

    StageOutcome {
        step,
        notes,
        anticipated_ph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(current: Measurements) -> BalanceContext {
        BalanceContext {
            pool_type: PoolType::Pool,
            volume_gallons: 10_000.0,
            current,
            targets: PoolType::Pool.golden_numbers(),
        }
    }

    #[test]
    fn alkalinity_stage_above_target_ph_recommends_acid() {
        let ctx = context(Measurements {
            ph: 7.8,
            alkalinity: 80.0,
            ..Default::default()
        });
        // +20 ppm TA -> +0.06 pH; 1.3 * (100 / 100) * (0.26 / 0.1) = 3.38 fl oz
        let outcome = BalanceStage::Alkalinity.apply(&ctx, 7.8);
        assert_eq!(outcome.anticipated_ph, 7.86);
        assert_eq!(outcome.step.anticipated_ph, Some(7.86));
        assert_eq!(
            outcome.step.anticipated_acid_dose.as_deref(),
            Some("3.4 fl oz muriatic acid")
        );
        assert_eq!(outcome.step.anticipated_soda_ash_dose, None);
        assert!(outcome.notes[0].contains("wait 10 minutes"));
        assert!(outcome.notes[0].contains("Recommended acid dose: 3.4 fl oz muriatic acid."));
    }

    #[test]
    fn alkalinity_stage_below_target_ph_anticipates_soda_ash() {
        let ctx = context(Measurements {
            ph: 7.2,
            alkalinity: 80.0,
            ..Default::default()
        });
        // (7.6 - 7.26) / 0.2 * 6 = 10.2 oz
        let outcome = BalanceStage::Alkalinity.apply(&ctx, 7.2);
        assert_eq!(outcome.anticipated_ph, 7.26);
        assert_eq!(
            outcome.step.anticipated_soda_ash_dose.as_deref(),
            Some("10.2 oz soda ash")
        );
        assert_eq!(outcome.step.anticipated_acid_dose, None);
        assert!(outcome.notes[0].contains("from 7.2 to approximately 7.26"));
        assert!(!outcome.notes[0].contains("Recommended acid dose"));
    }

    #[test]
    fn cya_note_omits_a_missing_soda_ash_dose() {
        let ctx = BalanceContext {
            volume_gallons: 0.0,
            ..context(Measurements::default())
        };
        let outcome = BalanceStage::Cya.apply(&ctx, 7.6);
        assert_eq!(outcome.step.dose.as_deref(), Some("0.0 oz stabilizer"));
        assert_eq!(outcome.step.anticipated_soda_ash_dose, None);
        assert!(outcome.notes[0].contains("bring pH up to 7.6."));
        assert!(!outcome.notes[0].contains("Recommended soda ash dose"));
        assert!(!outcome.notes[0].contains("none"));
    }

    #[test]
    fn ph_stage_note_prints_two_decimals() {
        let ctx = context(Measurements {
            ph: 7.8,
            ..Default::default()
        });
        let outcome = BalanceStage::Ph.apply(&ctx, 7.9);
        assert_eq!(
            outcome.step.note.as_deref(),
            Some("This pH dose is calculated based on an anticipated pH of 7.90 after other adjustments.")
        );
    }

    #[test]
    fn calcium_stage_leaves_ph_alone() {
        let ctx = context(Measurements {
            calcium: 200.0,
            ..Default::default()
        });
        let outcome = BalanceStage::Calcium.apply(&ctx, 7.43);
        assert_eq!(outcome.anticipated_ph, 7.43);
        assert_eq!(outcome.step.dose.as_deref(), Some("12.50 lbs calcium chloride"));
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn cya_stage_drops_the_incoming_ph() {
        let ctx = context(Measurements {
            cya: 0.0,
            ..Default::default()
        });
        // 30 ppm CYA -> 0.21 drop from 7.6
        let outcome = BalanceStage::Cya.apply(&ctx, 7.6);
        assert_eq!(outcome.anticipated_ph, 7.39);
        assert_eq!(outcome.step.anticipated_ph, Some(7.39));
        assert!(outcome.step.anticipated_soda_ash_dose.is_some());
        assert!(outcome.notes[0].contains("from 7.6 to approximately 7.39"));
    }

    #[test]
    fn ph_stage_with_no_movement_has_no_note() {
        let ctx = context(Measurements {
            ph: 7.6,
            ..Default::default()
        });
        let outcome = BalanceStage::Ph.apply(&ctx, 7.6);
        assert_eq!(outcome.step.dose, None);
        assert_eq!(outcome.step.note, None);
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn order_matches_report_layout() {
        let keys: Vec<StepKey> = BalanceStage::ORDER.iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec![StepKey::Alkalinity, StepKey::Calcium, StepKey::Cya, StepKey::Ph]
        );
    }
}
