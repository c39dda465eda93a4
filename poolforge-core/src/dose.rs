//! Chemical dose formulas.
//!
//! Every function returns `None` when the target is not on the side of the current value
//! that the chemical can move it towards. Volumes are in gallons and all rates are quoted
//! per 10,000 gallons.

const REFERENCE_GALLONS: f64 = 10_000.0;
const FL_OZ_PER_GALLON: f64 = 128.0;
const OZ_PER_LB: f64 = 16.0;

/// Rounds to `decimals` places, the way a value looks after being printed and re-read.
pub(crate) fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Fixed-point text with halves rounded away from zero, so 0.125 prints as "0.13".
pub fn to_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, round_dp(value, decimals as i32))
}

fn volume_ratio(gallons: f64) -> f64 {
    gallons / REFERENCE_GALLONS
}

/// ~0.03 pH units per 10 ppm of alkalinity added as sodium bicarbonate.
pub fn estimate_ph_rise_from_bicarb(alkalinity_increase: f64) -> f64 {
    (alkalinity_increase / 10.0) * 0.03
}

/// ~0.07 pH units per 10 ppm of cyanuric acid added.
pub fn estimate_ph_drop_from_cya(cya_increase: f64) -> f64 {
    (cya_increase / 10.0) * 0.07
}

/// 1.5 lbs sodium bicarbonate raises TA by 10 ppm.
pub fn alkalinity_dose(current: f64, target: f64, gallons: f64) -> Option<String> {
    if target <= current {
        return None;
    }
    let lbs = ((target - current) / 10.0) * 1.5 * volume_ratio(gallons);
    (lbs > 0.0).then(|| format!("{} lbs sodium bicarbonate", to_fixed(lbs, 2)))
}

/// 1.25 lbs calcium chloride raises calcium hardness by 10 ppm.
pub fn calcium_dose(current: f64, target: f64, gallons: f64) -> Option<String> {
    if target <= current {
        return None;
    }
    let lbs = ((target - current) / 10.0) * 1.25 * volume_ratio(gallons);
    (lbs > 0.0).then(|| format!("{} lbs calcium chloride", to_fixed(lbs, 2)))
}

/// 13 oz stabilizer raises CYA by 10 ppm.
pub fn cya_dose(current: f64, target: f64, gallons: f64) -> Option<String> {
    if target <= current {
        return None;
    }
    let oz = ((target - current) / 10.0) * 13.0 * volume_ratio(gallons);
    Some(ounces_or_pounds(oz, "stabilizer"))
}

/// 1.3 fl oz muriatic acid per 0.1 pH drop at 100 ppm alkalinity.
///
/// `alkalinity` is the buffering level the caller designates, usually the target.
pub fn acid_dose(current_ph: f64, target_ph: f64, gallons: f64, alkalinity: f64) -> Option<String> {
    if current_ph <= target_ph {
        return None;
    }
    let ph_drop = current_ph - target_ph;
    let fl_oz = 1.3 * (alkalinity / 100.0) * (ph_drop / 0.1) * volume_ratio(gallons);
    if fl_oz <= 0.0 {
        return None;
    }
    Some(if fl_oz < FL_OZ_PER_GALLON {
        format!("{} fl oz muriatic acid", to_fixed(fl_oz, 1))
    } else {
        format!(
            "{} gal ({} fl oz) muriatic acid",
            to_fixed(fl_oz / FL_OZ_PER_GALLON, 2),
            to_fixed(fl_oz, 1)
        )
    })
}

/// 6 oz soda ash per 0.2 pH rise.
pub fn soda_ash_dose(current_ph: f64, target_ph: f64, gallons: f64) -> Option<String> {
    if current_ph >= target_ph {
        return None;
    }
    let oz = ((target_ph - current_ph) / 0.2) * 6.0 * volume_ratio(gallons);
    if oz <= 0.0 {
        return None;
    }
    Some(ounces_or_pounds(oz, "soda ash"))
}

/// Gallons of 31.45% muriatic acid to drop alkalinity, 0.2 gal per 10 ppm.
///
/// Amounts under 0.01 gal are not worth dosing and yield `None`.
pub fn acid_gallons_for_alkalinity(current_alk: f64, target_alk: f64, gallons: f64) -> Option<f64> {
    if current_alk <= target_alk {
        return None;
    }
    let acid_gallons = ((current_alk - target_alk) / 10.0) * 0.2 * volume_ratio(gallons);
    if acid_gallons < 0.01 {
        return None;
    }
    Some(acid_gallons)
}

pub fn acid_dose_for_alkalinity(current_alk: f64, target_alk: f64, gallons: f64) -> Option<String> {
    let acid_gallons = acid_gallons_for_alkalinity(current_alk, target_alk, gallons)?;
    Some(if acid_gallons < 1.0 {
        format!("{} fl oz muriatic acid", to_fixed(acid_gallons * FL_OZ_PER_GALLON, 1))
    } else {
        format!("{} gal muriatic acid", to_fixed(acid_gallons, 2))
    })
}

/// Spreads the alkalinity acid dose evenly over `days` and phrases it as a daily instruction.
pub fn split_acid_dose(current_alk: f64, target_alk: f64, gallons: f64, days: u32) -> Option<String> {
    let acid_gallons = acid_gallons_for_alkalinity(current_alk, target_alk, gallons)?;
    let days_f = f64::from(days.max(1));

    if acid_gallons < 1.0 {
        let daily_fl_oz = round_dp(acid_gallons * FL_OZ_PER_GALLON, 1) / days_f;
        return Some(format!(
            "Add {} fl oz muriatic acid per day for {days} days",
            to_fixed(daily_fl_oz, 2)
        ));
    }

    let daily_gallons = to_fixed(round_dp(acid_gallons, 2) / days_f, 2);
    Some(format!(
        "Since alkalinity is above 180 ppm, we must lower this before attempting to adjust other \
         parameters. To lower alkalinity, add {daily_gallons} gal of muriatic acid directly to \
         the pool every day for {days} straight days to lower alkalinity from {current_alk} ppm to \
         {target_alk} ppm. Retest alkalinity each day to confirm progress. Only add acid at night \
         after the pool closes."
    ))
}

fn ounces_or_pounds(oz: f64, chemical: &str) -> String {
    if oz > OZ_PER_LB {
        format!(
            "{} lbs ({} oz) {chemical}",
            to_fixed(oz / OZ_PER_LB, 2),
            to_fixed(oz, 1)
        )
    } else {
        format!("{} oz {chemical}", to_fixed(oz, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alkalinity_needs_a_higher_target() {
        assert_eq!(alkalinity_dose(100.0, 100.0, 10_000.0), None);
        assert_eq!(alkalinity_dose(120.0, 100.0, 10_000.0), None);
        assert_eq!(
            alkalinity_dose(80.0, 100.0, 10_000.0).as_deref(),
            Some("3.00 lbs sodium bicarbonate")
        );
    }

    #[test]
    fn calcium_scales_with_volume() {
        assert_eq!(
            calcium_dose(200.0, 300.0, 10_000.0).as_deref(),
            Some("12.50 lbs calcium chloride")
        );
        assert_eq!(
            calcium_dose(200.0, 300.0, 20_000.0).as_deref(),
            Some("25.00 lbs calcium chloride")
        );
        assert_eq!(calcium_dose(200.0, 300.0, 0.0), None);
    }

    #[test]
    fn cya_switches_to_pounds_over_a_pound() {
        assert_eq!(cya_dose(20.0, 30.0, 10_000.0).as_deref(), Some("13.0 oz stabilizer"));
        assert_eq!(
            cya_dose(0.0, 30.0, 10_000.0).as_deref(),
            Some("2.44 lbs (39.0 oz) stabilizer")
        );
        assert_eq!(cya_dose(40.0, 30.0, 10_000.0), None);
    }

    #[test]
    fn acid_switches_to_gallons_at_128_fl_oz() {
        // 1.3 * 1.0 * 5 * 1 = 6.5 fl oz
        assert_eq!(
            acid_dose(8.0, 7.5, 10_000.0, 100.0).as_deref(),
            Some("6.5 fl oz muriatic acid")
        );
        // 1.3 * 1.0 * 10 * 10 = 130 fl oz
        assert_eq!(
            acid_dose(8.2, 7.2, 100_000.0, 100.0).as_deref(),
            Some("1.02 gal (130.0 fl oz) muriatic acid")
        );
        assert_eq!(acid_dose(7.2, 7.5, 10_000.0, 100.0), None);
    }

    #[test]
    fn acid_uses_designated_buffer() {
        // Twice the alkalinity needs twice the acid.
        assert_eq!(
            acid_dose(8.0, 7.5, 10_000.0, 200.0).as_deref(),
            Some("13.0 fl oz muriatic acid")
        );
    }

    #[test]
    fn soda_ash_needs_a_higher_target() {
        assert_eq!(soda_ash_dose(7.2, 7.6, 10_000.0).as_deref(), Some("12.0 oz soda ash"));
        assert_eq!(
            soda_ash_dose(7.0, 7.6, 10_000.0).as_deref(),
            Some("1.13 lbs (18.0 oz) soda ash")
        );
        assert_eq!(soda_ash_dose(7.6, 7.6, 10_000.0), None);
    }

    #[test]
    fn alkalinity_acid_units() {
        assert_eq!(
            acid_dose_for_alkalinity(250.0, 100.0, 10_000.0).as_deref(),
            Some("3.00 gal muriatic acid")
        );
        // 0.2 * 4 * 0.5 = 0.4 gal -> 51.2 fl oz
        assert_eq!(
            acid_dose_for_alkalinity(140.0, 100.0, 5_000.0).as_deref(),
            Some("51.2 fl oz muriatic acid")
        );
        assert_eq!(acid_dose_for_alkalinity(100.5, 100.0, 1_000.0), None);
        assert_eq!(acid_dose_for_alkalinity(90.0, 100.0, 10_000.0), None);
    }

    #[test]
    fn split_dose_in_gallons_mentions_range() {
        let text = split_acid_dose(250.0, 100.0, 10_000.0, 3).unwrap();
        assert!(text.contains("add 1.00 gal of muriatic acid"));
        assert!(text.contains("for 3 straight days"));
        assert!(text.contains("from 250 ppm to 100 ppm"));
    }

    #[test]
    fn split_dose_in_fluid_ounces() {
        // 0.4 gal -> 51.2 fl oz -> 17.07 per day
        assert_eq!(
            split_acid_dose(140.0, 100.0, 5_000.0, 3).as_deref(),
            Some("Add 17.07 fl oz muriatic acid per day for 3 days")
        );
    }

    #[test]
    fn halves_round_up_like_fixed_point_text() {
        // (10 / 10) * 1.25 * 0.1 is exactly 0.125
        assert_eq!(
            calcium_dose(290.0, 300.0, 1_000.0).as_deref(),
            Some("0.13 lbs calcium chloride")
        );
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.25, 1), "2.3");
        assert_eq!(to_fixed(3.0, 2), "3.00");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn ph_drift_estimates() {
        assert!((estimate_ph_rise_from_bicarb(20.0) - 0.06).abs() < 1e-12);
        assert!((estimate_ph_drop_from_cya(30.0) - 0.21).abs() < 1e-12);
    }

    #[test]
    fn nan_input_leaks_into_text() {
        let dose = acid_dose(f64::NAN, 7.5, 10_000.0, 100.0).unwrap();
        assert!(dose.contains("NaN"));
    }
}
