//! Chlorine dosing: breakpoint (shock) and the manual addition table.

use crate::{dose::to_fixed, error::PoolforgeError};
use poolforge_schemas::{
    chlorine::{BreakpointResult, ChlorineDoseRow, ChlorineKind, ChlorineProduct},
    standards::FreeChlorineRange,
    water::PoolType,
};

/// Pounds of pure chlorine to raise one gallon of water by 1 ppm.
pub const LBS_PER_PPM_GALLON: f64 = 0.00000834;
/// Breakpoint target as a multiple of combined chlorine.
pub const BREAKPOINT_MULTIPLIER: f64 = 10.0;
/// Approximate weight of a gallon of liquid sodium hypochlorite.
pub const LIQUID_CHLORINE_LBS_PER_GALLON: f64 = 10.0;
/// Doses below this are shown as "-".
pub const MIN_DISPLAYED_DOSE_LBS: f64 = 0.001;
/// Upper bound on dose table rows; finer increments are truncated at this many rows.
pub const MAX_DOSE_TABLE_ROWS: usize = 200;

/// Total minus free chlorine, floored at zero.
pub fn combined_chlorine(free_chlorine: f64, total_chlorine: f64) -> f64 {
    let combined = total_chlorine - free_chlorine;
    if combined < 0.0 {
        0.0
    } else {
        combined
    }
}

/// Pounds of product needed to raise `volume_gallons` by `ppm`.
pub fn product_lbs(ppm: f64, volume_gallons: f64, concentration: f64) -> f64 {
    ppm * volume_gallons * LBS_PER_PPM_GALLON / concentration
}

pub fn breakpoint(
    free_chlorine: f64,
    total_chlorine: f64,
    volume_gallons: f64,
    product: &ChlorineProduct,
    pool_type: PoolType,
) -> BreakpointResult {
    let combined = combined_chlorine(free_chlorine, total_chlorine);
    let target = combined * BREAKPOINT_MULTIPLIER;
    let shortfall = target - free_chlorine;
    let ppm_needed = if shortfall > 0.0 { shortfall } else { 0.0 };
    let dose_lbs = product_lbs(ppm_needed, volume_gallons, product.concentration);

    let dose_text = (dose_lbs > MIN_DISPLAYED_DOSE_LBS)
        .then(|| format_chlorine_dose(dose_lbs, pool_type, product.kind));

    let recommendation = if combined <= 0.0 {
        "No combined chlorine detected. Breakpoint chlorination is not needed.".to_string()
    } else if ppm_needed > 0.0 {
        format!(
            "Raise free chlorine by {} ppm to {} ppm to break down {} ppm of combined chlorine.",
            to_fixed(ppm_needed, 2),
            to_fixed(target, 2),
            to_fixed(combined, 2)
        )
    } else {
        format!(
            "Free chlorine is already at or above the breakpoint target of {} ppm.",
            to_fixed(target, 2)
        )
    };

    BreakpointResult {
        combined_chlorine: combined,
        breakpoint_target: target,
        ppm_needed,
        dose_lbs,
        dose_text,
        recommendation,
    }
}

/// Renders a product weight the way an operator measures it.
///
/// Liquid chlorine is poured, so it is given by volume; cal-hypo is weighed. Spa doses are
/// always given in ounces.
pub fn format_chlorine_dose(lbs: f64, pool_type: PoolType, kind: ChlorineKind) -> String {
    let small = pool_type == PoolType::Spa;
    match kind {
        ChlorineKind::Liquid => {
            let gallons = lbs / LIQUID_CHLORINE_LBS_PER_GALLON;
            let fl_oz = gallons * 128.0;
            if small || gallons < 1.0 {
                format!("{} fl oz", to_fixed(fl_oz, 1))
            } else {
                format!("{} gal ({} fl oz)", to_fixed(gallons, 2), to_fixed(fl_oz, 1))
            }
        }
        ChlorineKind::CalHypo => {
            let oz = lbs * 16.0;
            if small || lbs < 1.0 {
                format!("{} oz", to_fixed(oz, 1))
            } else {
                format!("{} lbs ({} oz)", to_fixed(lbs, 2), to_fixed(oz, 1))
            }
        }
    }
}

/// The regional minimum, raised to `cya * cya_ratio` when stabilizer demands more.
pub fn minimum_free_chlorine(range: &FreeChlorineRange, cya: f64) -> f64 {
    if range.cya_ratio > 0.0 && cya > 0.0 {
        range.min.max(cya * range.cya_ratio)
    } else {
        range.min
    }
}

/// One row per target FC from `min_fc` to `max_fc` inclusive, at most
/// [`MAX_DOSE_TABLE_ROWS`] rows.
pub fn chlorine_dose_table(
    current_fc: f64,
    volume_gallons: f64,
    product: &ChlorineProduct,
    pool_type: PoolType,
    min_fc: f64,
    max_fc: f64,
    increment: f64,
) -> Vec<ChlorineDoseRow> {
    if !(increment > 0.0) {
        return Vec::new();
    }
    let intervals = ((max_fc - min_fc) / increment + 1e-9).floor();
    if !(intervals >= 0.0) || !intervals.is_finite() {
        return Vec::new();
    }

    let rows = (intervals as usize).min(MAX_DOSE_TABLE_ROWS - 1) + 1;
    (0..rows)
        .map(|i| {
            let target_fc = min_fc + i as f64 * increment;
            let dose_lbs = if target_fc > current_fc {
                product_lbs(target_fc - current_fc, volume_gallons, product.concentration)
            } else {
                0.0
            };
            let dose_display = if dose_lbs > MIN_DISPLAYED_DOSE_LBS {
                format_chlorine_dose(dose_lbs, pool_type, product.kind)
            } else {
                "-".to_string()
            };
            ChlorineDoseRow {
                target_fc,
                dose_lbs,
                dose_display,
            }
        })
        .collect()
}

pub fn find_product<'a>(
    products: &'a [ChlorineProduct],
    product_id: &str,
) -> Result<&'a ChlorineProduct, PoolforgeError> {
    products
        .iter()
        .find(|p| p.product_id == product_id)
        .ok_or_else(|| PoolforgeError::UnknownChlorineProduct(product_id.to_string()))
}
