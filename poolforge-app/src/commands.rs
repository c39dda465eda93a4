//! Single-calculation subcommands and the console renderers they share with `report`.

use crate::cli::{
    BalanceArgs, BreakpointArgs, HistoryArgs, LsiArgs, SaltArgs, ThiosulfateArgs,
};
use crate::config::ReferenceTables;
use anyhow::{ensure, Context, Result};
use poolforge_core::{
    balance::BalanceBuilder,
    chlorine,
    dose::to_fixed,
    logger, lsi, salt, standards, thiosulfate,
};
use poolforge_schemas::{
    chlorine::{BreakpointResult, ChlorineDoseRow},
    dosing::WaterBalanceReport,
    lsi::{LsiInput, LsiReport},
    treatment::ThiosulfateRow,
    water::PoolType,
};
use tracing::{info, warn};

pub fn lsi(args: LsiArgs) -> Result<()> {
    let water = args.water.measurements();
    standards::validate_measurements(&water)?;
    print_lsi(&lsi::lsi_factors(&LsiInput::from(&water)));
    Ok(())
}

pub fn balance(args: BalanceArgs) -> Result<()> {
    let water = args.water.measurements();
    standards::validate_measurements(&water)?;
    let pool_type = PoolType::from(args.pool.pool_type);

    let golden_numbers = if args.reference.is_dir() {
        ReferenceTables::load(&args.reference)?.golden_numbers(pool_type)
    } else {
        warn!(path = %args.reference.display(), "reference directory not found, using built-in golden numbers");
        pool_type.golden_numbers()
    };

    let engine = BalanceBuilder::new()
        .with_pool_type(pool_type)
        .with_volume_gallons(args.pool.volume_gallons)
        .with_measurements(water)
        .with_golden_numbers(golden_numbers)
        .with_overrides(args.overrides())
        .build()?;
    let report = engine.run();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_lsi(&lsi::lsi_factors(&LsiInput::from(&water)));
        print_balance(&report);
    }
    Ok(())
}

pub fn breakpoint(args: BreakpointArgs) -> Result<()> {
    ensure_reading("free_chlorine", args.free_chlorine)?;
    ensure_reading("total_chlorine", args.total_chlorine)?;
    ensure_volume(args.pool.volume_gallons)?;

    let tables = ReferenceTables::load(&args.reference)?;
    let product = tables.chlorine_product(&args.product)?;
    let result = chlorine::breakpoint(
        args.free_chlorine,
        args.total_chlorine,
        args.pool.volume_gallons,
        product,
        args.pool.pool_type.into(),
    );
    println!("--- Breakpoint Chlorination ({}) ---", product.name);
    print_breakpoint(&result);
    Ok(())
}

pub fn salt(args: SaltArgs) -> Result<()> {
    ensure_reading("current", args.current)?;
    ensure_volume(args.volume_gallons)?;
    let dose = salt::salt_dose(args.current, args.target, args.volume_gallons);
    println!("{}", dose.display);
    Ok(())
}

pub fn thiosulfate(args: ThiosulfateArgs) -> Result<()> {
    ensure_reading("free_chlorine", args.free_chlorine)?;
    ensure_volume(args.volume_gallons)?;
    let warning = args.ph.and_then(thiosulfate::low_ph_warning);
    let rows = thiosulfate::dose_table(args.free_chlorine, args.volume_gallons);
    print_thiosulfate(&rows, warning);
    Ok(())
}

pub fn history(args: HistoryArgs) -> Result<()> {
    let path = args
        .log
        .to_str()
        .with_context(|| format!("Log path {:?} is not valid UTF-8", args.log))?;
    let entries = logger::read_log(path)?;
    info!(rows = entries.len(), "read dosing log");

    println!("{:<26} {:<5} {:<18} {:>8} {:>8}  Dose", "Timestamp", "Type", "Parameter", "Current", "Target");
    for entry in &entries {
        println!(
            "{:<26} {:<5} {:<18} {:>8} {:>8}  {}",
            entry.timestamp,
            entry.pool_type,
            entry.parameter,
            entry.current,
            entry.target,
            entry.dose.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn ensure_reading(field: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "'{field}' must be a finite, non-negative number, got {value}"
    );
    Ok(())
}

fn ensure_volume(gallons: f64) -> Result<()> {
    ensure!(
        gallons.is_finite() && gallons > 0.0,
        "Volume must be a positive number of gallons, got {gallons}"
    );
    Ok(())
}

pub fn print_lsi(report: &LsiReport) {
    let condition = lsi::classify(report.lsi).map_or("unknown", |c| c.description());
    println!("--- Langelier Saturation Index ---");
    println!(
        "LSI {} ({condition}), {}% along the -0.6 to +0.6 scale",
        to_fixed(report.lsi, 2),
        to_fixed(lsi::scale_position(report.lsi), 0)
    );
    println!("  pH           {:>8}", to_fixed(report.ph, 2));
    println!(
        "  Alkalinity   {:>8} ppm  corrected {}  factor {}",
        report.alkalinity,
        to_fixed(report.corrected_alkalinity, 1),
        to_fixed(report.alkalinity_factor, 1)
    );
    println!(
        "  Calcium      {:>8} ppm  factor {}",
        report.calcium,
        to_fixed(report.calcium_factor, 1)
    );
    println!(
        "  Temperature  {:>8} °F   factor {}",
        report.temp_f,
        to_fixed(report.temp_factor, 1)
    );
    println!(
        "  TDS          {:>8} ppm  constant {}",
        report.tds,
        to_fixed(report.tds_factor, 1)
    );
}

pub fn print_balance(report: &WaterBalanceReport) {
    println!("\n--- Water Balance ---");
    for (i, step) in report.steps.iter().enumerate() {
        println!(
            "{}. {:<17} current {:<7} target {:<7} {}",
            i + 1,
            step.parameter,
            step.current,
            step.target,
            step.dose.as_deref().unwrap_or("no dose needed")
        );
        if let Some(secondary) = step.secondary_dose() {
            println!("   then, after dispersal: {secondary}");
        }
    }
    if !report.notes.is_empty() {
        println!("\nNotes:");
        for note in &report.notes {
            println!("  - {note}");
        }
    }
}

pub fn print_chlorine_table(rows: &[ChlorineDoseRow]) {
    println!("{:>10}  Dose", "Target FC");
    for row in rows {
        println!("{:>10}  {}", to_fixed(row.target_fc, 1), row.dose_display);
    }
}

pub fn print_breakpoint(result: &BreakpointResult) {
    println!("Combined chlorine: {} ppm", to_fixed(result.combined_chlorine, 2));
    println!("Breakpoint target: {} ppm", to_fixed(result.breakpoint_target, 2));
    if let Some(dose) = &result.dose_text {
        println!("Dose: {dose}");
    }
    println!("{}", result.recommendation);
}

pub fn print_thiosulfate(rows: &[ThiosulfateRow], warning: Option<&str>) {
    if let Some(warning) = warning {
        println!("{warning}");
    }
    if rows.is_empty() {
        println!("Free chlorine is already at zero. No thiosulfate needed.");
        return;
    }
    println!("{:>10}  Sodium thiosulfate", "Target FC");
    for row in rows {
        println!("{:>10}  {}", row.target_fc_display, row.dose_display);
    }
    println!("{}", thiosulfate::DOSING_ADVICE);
}
