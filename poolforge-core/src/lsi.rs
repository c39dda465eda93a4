//! Langelier Saturation Index from table-driven factors.

use poolforge_schemas::lsi::{LsiCondition, LsiInput, LsiReport};

/// One entry of an ascending factor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub threshold: f64,
    pub factor: f64,
}

const fn bp(threshold: f64, factor: f64) -> Breakpoint {
    Breakpoint { threshold, factor }
}

/// Alkalinity (ppm, CYA-corrected) to factor.
pub const ALKALINITY_FACTORS: [Breakpoint; 13] = [
    bp(5.0, 0.7),
    bp(25.0, 1.4),
    bp(50.0, 1.7),
    bp(75.0, 1.9),
    bp(100.0, 2.0),
    bp(125.0, 2.1),
    bp(150.0, 2.2),
    bp(200.0, 2.3),
    bp(250.0, 2.4),
    bp(300.0, 2.5),
    bp(400.0, 2.6),
    bp(800.0, 2.9),
    bp(1000.0, 3.0),
];

/// Calcium hardness (ppm) to factor.
pub const CALCIUM_FACTORS: [Breakpoint; 13] = [
    bp(5.0, 0.3),
    bp(25.0, 1.0),
    bp(50.0, 1.3),
    bp(75.0, 1.5),
    bp(100.0, 1.6),
    bp(125.0, 1.7),
    bp(150.0, 1.8),
    bp(200.0, 1.9),
    bp(250.0, 2.0),
    bp(300.0, 2.1),
    bp(400.0, 2.2),
    bp(800.0, 2.5),
    bp(1000.0, 2.6),
];

/// Water temperature (°F) to factor.
pub const TEMP_FACTORS: [Breakpoint; 11] = [
    bp(32.0, 0.1),
    bp(37.0, 0.1),
    bp(46.0, 0.2),
    bp(53.0, 0.3),
    bp(60.0, 0.4),
    bp(66.0, 0.5),
    bp(76.0, 0.6),
    bp(84.0, 0.7),
    bp(94.0, 0.8),
    bp(104.0, 0.9),
    bp(128.0, 1.0),
];

/// Total dissolved solids (ppm) to the subtracted constant.
pub const TDS_FACTORS: [Breakpoint; 5] = [
    bp(800.0, 12.1),
    bp(1500.0, 12.2),
    bp(2900.0, 12.3),
    bp(5500.0, 12.4),
    bp(f64::INFINITY, 12.5),
];

/// Returns the factor of the first breakpoint at or above `value`.
///
/// Values past the end of the table, and NaN (which compares false against every
/// threshold), take the last factor.
pub fn ceiling_factor(value: f64, table: &[Breakpoint]) -> f64 {
    table
        .iter()
        .find(|b| value <= b.threshold)
        .or_else(|| table.last())
        .map_or(f64::NAN, |b| b.factor)
}

pub fn tds_factor(tds: f64) -> f64 {
    ceiling_factor(tds, &TDS_FACTORS)
}

/// Alkalinity minus the cyanurate share (CYA/3), floored at zero. NaN passes through.
pub fn corrected_alkalinity(alkalinity: f64, cya: f64) -> f64 {
    let corrected = alkalinity - cya / 3.0;
    if corrected < 0.0 {
        0.0
    } else {
        corrected
    }
}

pub fn advanced_lsi(input: &LsiInput) -> f64 {
    lsi_factors(input).lsi
}

pub fn lsi_factors(input: &LsiInput) -> LsiReport {
    let corrected_alkalinity = corrected_alkalinity(input.alkalinity, input.cya);
    let alkalinity_factor = ceiling_factor(corrected_alkalinity, &ALKALINITY_FACTORS);
    let calcium_factor = ceiling_factor(input.calcium, &CALCIUM_FACTORS);
    let temp_factor = ceiling_factor(input.temp_f, &TEMP_FACTORS);
    let tds_factor = tds_factor(input.tds);

    let lsi = input.ph + calcium_factor + alkalinity_factor + temp_factor - tds_factor;

    LsiReport {
        lsi,
        ph: input.ph,
        alkalinity: input.alkalinity,
        corrected_alkalinity,
        alkalinity_factor,
        calcium: input.calcium,
        calcium_factor,
        temp_f: input.temp_f,
        temp_factor,
        tds: input.tds,
        tds_factor,
        cya: input.cya,
    }
}

/// Operator-facing band for an LSI value. `None` for NaN.
pub fn classify(lsi: f64) -> Option<LsiCondition> {
    if lsi.is_nan() {
        return None;
    }
    Some(if lsi < -1.0 {
        LsiCondition::VeryCorrosive
    } else if lsi <= -0.5 {
        LsiCondition::Corrosive
    } else if lsi < -0.3 {
        LsiCondition::SlightlyCorrosive
    } else if lsi <= 0.3 {
        LsiCondition::Balanced
    } else if lsi < 0.5 {
        LsiCondition::SlightlyScaling
    } else if lsi <= 1.0 {
        LsiCondition::Scaling
    } else {
        LsiCondition::VeryScaling
    })
}

pub const SCALE_MIN: f64 = -0.6;
pub const SCALE_MAX: f64 = 0.6;

/// Position of `lsi` on the -0.6..=0.6 display scale, as a clamped percentage.
pub fn scale_position(lsi: f64) -> f64 {
    (((lsi - SCALE_MIN) / (SCALE_MAX - SCALE_MIN)) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(ph: f64, temp_f: f64, calcium: f64, alkalinity: f64, cya: f64, tds: f64) -> LsiInput {
        LsiInput {
            ph,
            temp_f,
            calcium,
            alkalinity,
            cya,
            tds,
        }
    }

    #[test]
    fn threshold_value_takes_its_own_factor() {
        assert_eq!(ceiling_factor(100.0, &ALKALINITY_FACTORS), 2.0);
        assert_eq!(ceiling_factor(100.5, &ALKALINITY_FACTORS), 2.1);
        assert_eq!(ceiling_factor(25.0, &CALCIUM_FACTORS), 1.0);
        assert_eq!(ceiling_factor(76.0, &TEMP_FACTORS), 0.6);
    }

    #[test]
    fn values_past_the_table_take_the_last_factor() {
        assert_eq!(ceiling_factor(5000.0, &CALCIUM_FACTORS), 2.6);
        assert_eq!(ceiling_factor(140.0, &TEMP_FACTORS), 1.0);
        assert_eq!(ceiling_factor(f64::NAN, &ALKALINITY_FACTORS), 3.0);
    }

    #[test]
    fn empty_table_yields_nan() {
        assert!(ceiling_factor(10.0, &[]).is_nan());
    }

    #[test]
    fn tds_bands() {
        assert_eq!(tds_factor(800.0), 12.1);
        assert_eq!(tds_factor(1000.0), 12.2);
        assert_eq!(tds_factor(2900.0), 12.3);
        assert_eq!(tds_factor(5000.0), 12.4);
        assert_eq!(tds_factor(6000.0), 12.5);
    }

    #[test]
    fn corrected_alkalinity_floors_at_zero() {
        assert_eq!(corrected_alkalinity(90.0, 30.0), 80.0);
        assert_eq!(corrected_alkalinity(20.0, 90.0), 0.0);
        assert!(corrected_alkalinity(f64::NAN, 30.0).is_nan());
    }

    #[test]
    fn typical_pool_lsi() {
        // corrected alk 90 -> 2.0, calcium 300 -> 2.1, 80°F -> 0.7, tds 1000 -> 12.2
        let report = lsi_factors(&input(7.5, 80.0, 300.0, 100.0, 30.0, 1000.0));
        assert_eq!(report.corrected_alkalinity, 90.0);
        assert_eq!(report.alkalinity_factor, 2.0);
        assert_eq!(report.calcium_factor, 2.1);
        assert_eq!(report.temp_factor, 0.7);
        assert_eq!(report.tds_factor, 12.2);
        assert!((report.lsi - 0.1).abs() < 1e-9);
    }

    #[test]
    fn nan_ph_contaminates_lsi() {
        assert!(advanced_lsi(&input(f64::NAN, 80.0, 300.0, 100.0, 30.0, 1000.0)).is_nan());
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify(-1.2), Some(LsiCondition::VeryCorrosive));
        assert_eq!(classify(-0.5), Some(LsiCondition::Corrosive));
        assert_eq!(classify(-0.4), Some(LsiCondition::SlightlyCorrosive));
        assert_eq!(classify(0.0), Some(LsiCondition::Balanced));
        assert_eq!(classify(0.3), Some(LsiCondition::Balanced));
        assert_eq!(classify(0.4), Some(LsiCondition::SlightlyScaling));
        assert_eq!(classify(0.5), Some(LsiCondition::Scaling));
        assert_eq!(classify(1.5), Some(LsiCondition::VeryScaling));
        assert_eq!(classify(f64::NAN), None);
    }

    #[test]
    fn scale_position_is_clamped() {
        assert_eq!(scale_position(0.0), 50.0);
        assert_eq!(scale_position(-2.0), 0.0);
        assert_eq!(scale_position(2.0), 100.0);
    }
}
