//! Sodium thiosulfate dosing for lowering free chlorine.

use crate::dose::to_fixed;
use poolforge_schemas::treatment::ThiosulfateRow;

/// Ounces of sodium thiosulfate pentahydrate that remove 1 ppm FC from 10,000 gallons.
pub const OZ_PER_PPM_PER_10K_GALLONS: f64 = 1.3;
/// Above this FC the table steps by 5 ppm; at or below it, by 1 ppm.
const COARSE_STEP_FLOOR: f64 = 10.0;

pub const LOW_PH_WARNING: &str = "Warning: pH is already low. Sodium thiosulfate may lower pH \
     further. Adjust pH before neutralizing chlorine.";
pub const LOW_PH_THRESHOLD: f64 = 7.2;
pub const DOSING_ADVICE: &str = "Sodium thiosulfate can take up to two hours to work. Add half \
     the required dose, wait two hours, and retest. If needed, add the remaining amount.";

pub fn dose_ounces(current_fc: f64, target_fc: f64, volume_gallons: f64) -> f64 {
    let ppm_to_remove = current_fc - target_fc;
    if ppm_to_remove <= 0.0 || volume_gallons <= 0.0 {
        return 0.0;
    }
    ppm_to_remove * (volume_gallons / 10_000.0) * OZ_PER_PPM_PER_10K_GALLONS
}

/// "X.XX oz", with a pound breakdown once the dose reaches a pound.
pub fn format_ounces(oz: f64) -> String {
    if oz < 0.01 {
        return "0 oz".to_string();
    }
    let lbs = (oz / 16.0).floor();
    let remainder = oz % 16.0;
    if lbs > 0.0 {
        let plural = if lbs > 1.0 { "s" } else { "" };
        format!(
            "{} oz ({lbs} lb{plural} {} oz)",
            to_fixed(oz, 2),
            to_fixed(remainder, 2)
        )
    } else {
        format!("{} oz", to_fixed(oz, 2))
    }
}

/// Target FC values below `current_fc`, highest first.
pub fn target_steps(current_fc: f64) -> Vec<f64> {
    if !current_fc.is_finite() {
        return Vec::new();
    }

    let mut steps = Vec::new();
    let mut fc = (current_fc / 5.0).floor() * 5.0;
    while fc > COARSE_STEP_FLOOR {
        if fc < current_fc {
            steps.push(fc);
        }
        fc -= 5.0;
    }
    steps.extend(
        (0..=COARSE_STEP_FLOOR as u32)
            .rev()
            .map(f64::from)
            .filter(|&fc| fc < current_fc),
    );
    steps
}

pub fn dose_table(current_fc: f64, volume_gallons: f64) -> Vec<ThiosulfateRow> {
    target_steps(current_fc)
        .into_iter()
        .filter_map(|target_fc| {
            let dose_oz = dose_ounces(current_fc, target_fc, volume_gallons);
            (dose_oz > 0.0).then(|| ThiosulfateRow {
                target_fc,
                dose_oz,
                target_fc_display: to_fixed(target_fc, 1),
                dose_display: format_ounces(dose_oz),
            })
        })
        .collect()
}

pub fn low_ph_warning(ph: f64) -> Option<&'static str> {
    (ph < LOW_PH_THRESHOLD).then_some(LOW_PH_WARNING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dose_scales_with_volume() {
        assert!((dose_ounces(5.0, 3.0, 10_000.0) - 2.6).abs() < 1e-12);
        assert!((dose_ounces(5.0, 3.0, 20_000.0) - 5.2).abs() < 1e-12);
        assert_eq!(dose_ounces(3.0, 5.0, 10_000.0), 0.0);
        assert_eq!(dose_ounces(5.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn ounces_break_out_pounds() {
        assert_eq!(format_ounces(0.004), "0 oz");
        assert_eq!(format_ounces(2.6), "2.60 oz");
        assert_eq!(format_ounces(0.125), "0.13 oz");
        assert_eq!(format_ounces(16.125), "16.13 oz (1 lb 0.13 oz)");
        assert_eq!(format_ounces(20.0), "20.00 oz (1 lb 4.00 oz)");
        assert_eq!(format_ounces(40.0), "40.00 oz (2 lbs 8.00 oz)");
    }

    #[test]
    fn steps_are_coarse_above_ten() {
        assert_eq!(
            target_steps(22.0),
            vec![20.0, 15.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]
        );
        assert_eq!(target_steps(3.5), vec![3.0, 2.0, 1.0, 0.0]);
        assert_eq!(target_steps(15.0).first(), Some(&10.0));
        assert!(target_steps(0.0).is_empty());
        assert!(target_steps(f64::NAN).is_empty());
    }

    #[test]
    fn table_is_descending_and_below_current() {
        let rows = dose_table(12.0, 10_000.0);
        assert_eq!(rows.first().map(|r| r.target_fc_display.as_str()), Some("10.0"));
        assert_eq!(rows.last().map(|r| r.target_fc_display.as_str()), Some("0.0"));
        assert!(rows.windows(2).all(|w| w[0].target_fc > w[1].target_fc));
        // 12 ppm to 0 in 10k gallons: 15.6 oz
        assert_eq!(rows.last().map(|r| r.dose_display.as_str()), Some("15.60 oz"));
    }

    #[test]
    fn warns_only_below_7_2() {
        assert_eq!(low_ph_warning(7.1), Some(LOW_PH_WARNING));
        assert_eq!(low_ph_warning(7.2), None);
    }
}
