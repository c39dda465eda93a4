//! Regional health-code ranges and input validation.

use crate::{
    dose::{round_dp, to_fixed},
    error::PoolforgeError,
};
use poolforge_schemas::{
    standards::{RegionStandards, RegionalStandard},
    water::Measurements,
};

/// Rejects readings that cannot come from a water test.
pub fn validate_measurements(measurements: &Measurements) -> Result<(), PoolforgeError> {
    let fields = [
        ("ph", measurements.ph),
        ("alkalinity", measurements.alkalinity),
        ("calcium", measurements.calcium),
        ("cya", measurements.cya),
        ("temp_f", measurements.temp_f),
        ("tds", measurements.tds),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(PoolforgeError::InvalidMeasurement { field, value });
        }
    }
    Ok(())
}

pub fn find_region<'a>(
    regions: &'a [RegionStandards],
    region: &str,
) -> Result<&'a RegionStandards, PoolforgeError> {
    regions
        .iter()
        .find(|r| r.region.eq_ignore_ascii_case(region))
        .ok_or_else(|| PoolforgeError::UnknownRegion(region.to_string()))
}

/// Human-readable warnings for every reading outside the regional limits.
///
/// A calcium bound of zero means the region does not regulate that side.
pub fn range_warnings(
    free_chlorine: f64,
    measurements: &Measurements,
    standard: &RegionalStandard,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let fc = &standard.free_chlorine;

    if free_chlorine < fc.min {
        warnings.push(format!("Free Chlorine is below minimum ({} ppm).", fc.min));
    }
    if free_chlorine > fc.max {
        warnings.push(format!("Free Chlorine is above maximum ({} ppm).", fc.max));
    }
    if fc.cya_ratio > 0.0 {
        let required = measurements.cya * fc.cya_ratio;
        if free_chlorine < required {
            warnings.push(format!(
                "Free Chlorine is below {}% of CYA (min required: {} ppm).",
                round_dp(fc.cya_ratio * 100.0, 2),
                to_fixed(required, 2)
            ));
        }
    }
    if !standard.ph.contains(measurements.ph) {
        warnings.push(format!(
            "pH is out of range ({} - {}).",
            standard.ph.min, standard.ph.max
        ));
    }
    if !standard.alkalinity.contains(measurements.alkalinity) {
        warnings.push(format!(
            "Alkalinity is out of range ({} - {} ppm).",
            standard.alkalinity.min, standard.alkalinity.max
        ));
    }
    if measurements.cya < standard.cya.min {
        warnings.push(format!("Cyanuric Acid is below minimum ({} ppm).", standard.cya.min));
    }
    if measurements.cya > standard.cya.max {
        warnings.push(format!("Cyanuric Acid is above maximum ({} ppm).", standard.cya.max));
    }
    if standard.calcium.min > 0.0 && measurements.calcium < standard.calcium.min {
        warnings.push(format!(
            "Calcium Hardness is below minimum ({} ppm).",
            standard.calcium.min
        ));
    }
    if standard.calcium.max > 0.0 && measurements.calcium > standard.calcium.max {
        warnings.push(format!(
            "Calcium Hardness is above maximum ({} ppm).",
            standard.calcium.max
        ));
    }
    warnings
}
