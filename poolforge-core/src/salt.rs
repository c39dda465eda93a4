use crate::{
    chlorine::LBS_PER_PPM_GALLON,
    dose::{round_dp, to_fixed},
};
use poolforge_schemas::treatment::SaltDose;

pub const NO_SALT_NEEDED: &str = "Salt level is at or above target. No salt needed.";

/// Pounds of salt to bring `current` up to `target` ppm.
pub fn salt_dose(current: f64, target: f64, volume_gallons: f64) -> SaltDose {
    let deficit = target - current;
    if deficit <= 0.0 {
        return SaltDose {
            lbs_needed: 0.0,
            display: NO_SALT_NEEDED.to_string(),
        };
    }

    let lbs = deficit * volume_gallons * LBS_PER_PPM_GALLON;
    SaltDose {
        lbs_needed: round_dp(lbs, 1),
        display: format!("Add {} lbs of salt to reach {target} ppm.", to_fixed(lbs, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raises_salt_to_target() {
        let dose = salt_dose(3000.0, 3200.0, 10_000.0);
        assert_eq!(dose.lbs_needed, 16.7);
        assert_eq!(dose.display, "Add 16.7 lbs of salt to reach 3200 ppm.");
    }

    #[test]
    fn display_agrees_with_rounded_pounds() {
        // 150 * 1000 * 8.34e-6 = 1.251, 30 * 2000 * 8.34e-6 = 0.5004
        for (current, volume) in [(3050.0, 1_000.0), (3170.0, 2_000.0)] {
            let dose = salt_dose(current, 3200.0, volume);
            assert_eq!(
                dose.display,
                format!("Add {:.1} lbs of salt to reach 3200 ppm.", dose.lbs_needed)
            );
        }
    }

    #[test]
    fn no_dose_at_or_above_target() {
        for current in [3200.0, 3400.0] {
            let dose = salt_dose(current, 3200.0, 10_000.0);
            assert_eq!(dose.lbs_needed, 0.0);
            assert_eq!(dose.display, NO_SALT_NEEDED);
        }
    }
}
