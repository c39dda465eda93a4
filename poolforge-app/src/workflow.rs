use crate::cli::ReportArgs;
use crate::commands::{
    print_balance, print_breakpoint, print_chlorine_table, print_lsi, print_thiosulfate,
};
use crate::config::ReferenceTables;
use crate::plotting;
use crate::request::WaterTestRequest;
use anyhow::{Context, Result};
use poolforge_core::{
    balance::{BalanceBuilder, BalanceContext},
    chlorine,
    logger::DosingLogger,
    lsi, salt, standards, thiosulfate,
};
use poolforge_schemas::{
    chlorine::{BreakpointResult, ChlorineDoseRow, ChlorineProduct},
    dosing::WaterBalanceReport,
    lsi::{LsiCondition, LsiInput, LsiReport},
    treatment::{SaltDose, ThiosulfateRow},
    water::Targets,
};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::{info, instrument};

/// Everything an operator needs from one water test.
#[derive(Debug, Serialize)]
pub struct OperatorReport {
    pub generated_at: String,
    pub request: WaterTestRequest,
    pub warnings: Vec<String>,
    pub lsi: LsiReport,
    pub lsi_condition: Option<LsiCondition>,
    pub targets: Targets,
    pub water_balance: WaterBalanceReport,
    pub chlorine: ChlorineSection,
    pub salt: Option<SaltDose>,
    pub thiosulfate: Option<ThiosulfateSection>,
    #[serde(skip)]
    pub context: BalanceContext,
}

#[derive(Debug, Serialize)]
pub struct ChlorineSection {
    pub product: ChlorineProduct,
    pub minimum_fc: f64,
    pub maximum_fc: f64,
    pub dose_table: Vec<ChlorineDoseRow>,
    pub breakpoint: BreakpointResult,
}

/// Present only when free chlorine is above the regional maximum.
#[derive(Debug, Serialize)]
pub struct ThiosulfateSection {
    pub rows: Vec<ThiosulfateRow>,
    pub warning: Option<String>,
    pub advice: String,
}

/// Loads the request and reference tables, builds the report and writes the run directory.
pub fn run(args: ReportArgs) -> Result<()> {
    let request = WaterTestRequest::load(&args.request)?;
    let tables = ReferenceTables::load(&args.reference)?;

    let now = chrono::Utc::now();
    let report = build_report(&request, &tables, now.to_rfc3339())?;

    let output_dir = args.output.join(format!(
        "{}_{}",
        request.pool_type,
        now.format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    // Keep the request next to its results for traceability
    fs::copy(&args.request, output_dir.join("request.yaml"))
        .with_context(|| format!("Failed to copy {:?}", args.request))?;

    write_outputs(&report, &output_dir)?;
    plotting::generate_all_plots(&output_dir, &report)?;
    print_summary(&report);

    println!("\nReport complete. Results are in '{}'", output_dir.display());
    Ok(())
}

#[instrument(skip_all, fields(region = %request.region, pool_type = %request.pool_type))]
pub fn build_report(
    request: &WaterTestRequest,
    tables: &ReferenceTables,
    generated_at: String,
) -> Result<OperatorReport> {
    let readings = &request.readings;
    let water = readings.measurements();
    standards::validate_measurements(&water).context("Invalid water readings")?;

    let standard = tables.region(&request.region)?.for_pool_type(request.pool_type);
    let warnings = standards::range_warnings(readings.free_chlorine, &water, standard);
    info!(warnings = warnings.len(), "checked regional ranges");

    let lsi = lsi::lsi_factors(&LsiInput::from(&water));

    let engine = BalanceBuilder::new()
        .with_pool_type(request.pool_type)
        .with_volume_gallons(request.volume_gallons)
        .with_measurements(water)
        .with_golden_numbers(tables.golden_numbers(request.pool_type))
        .with_overrides(request.targets)
        .build()?;
    let water_balance = engine.run();

    let product = tables.chlorine_product(&request.chlorine_product_id)?.clone();
    let minimum_fc = chlorine::minimum_free_chlorine(&standard.free_chlorine, water.cya);
    // High CYA can push the minimum past the regional maximum; show at least one row
    let maximum_fc = standard.free_chlorine.max.max(minimum_fc);
    let dose_table = chlorine::chlorine_dose_table(
        readings.free_chlorine,
        request.volume_gallons,
        &product,
        request.pool_type,
        minimum_fc,
        maximum_fc,
        request.chlorine_increment,
    );
    let breakpoint = chlorine::breakpoint(
        readings.free_chlorine,
        readings.total_chlorine,
        request.volume_gallons,
        &product,
        request.pool_type,
    );

    let salt = readings
        .salt
        .map(|current| salt::salt_dose(current, request.target_salt, request.volume_gallons));

    let thiosulfate = (readings.free_chlorine > standard.free_chlorine.max).then(|| {
        ThiosulfateSection {
            rows: thiosulfate::dose_table(readings.free_chlorine, request.volume_gallons),
            warning: thiosulfate::low_ph_warning(water.ph).map(str::to_string),
            advice: thiosulfate::DOSING_ADVICE.to_string(),
        }
    });

    Ok(OperatorReport {
        generated_at,
        request: request.clone(),
        warnings,
        lsi,
        lsi_condition: lsi::classify(lsi.lsi),
        targets: engine.effective_targets(),
        water_balance,
        chlorine: ChlorineSection {
            product,
            minimum_fc,
            maximum_fc,
            dose_table,
            breakpoint,
        },
        salt,
        thiosulfate,
        context: *engine.context(),
    })
}

/// Writes `report.json` and `dosing_log.csv` into `output_dir`.
pub fn write_outputs(report: &OperatorReport, output_dir: &Path) -> Result<()> {
    let json_path = output_dir.join("report.json");
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(&json_path, json).with_context(|| format!("Failed to write {:?}", json_path))?;

    let log_path = output_dir.join("dosing_log.csv");
    let log_path = log_path
        .to_str()
        .with_context(|| format!("Log path {:?} is not valid UTF-8", log_path))?;
    let mut logger = DosingLogger::new(log_path)?;
    let rows = logger.log_report(&report.generated_at, &report.context, &report.water_balance)?;
    info!(rows, path = log_path, "wrote dosing log");
    Ok(())
}

fn print_summary(report: &OperatorReport) {
    let request = &report.request;
    println!(
        "--- Water Test: {} {} ({} gal) ---",
        request.region, request.pool_type, request.volume_gallons
    );

    if report.warnings.is_empty() {
        println!("All readings are within regional limits.");
    } else {
        println!("Out of range:");
        for warning in &report.warnings {
            println!("  ! {warning}");
        }
    }
    println!();

    print_lsi(&report.lsi);
    print_balance(&report.water_balance);

    let section = &report.chlorine;
    println!(
        "\n--- Free Chlorine with {} (FC {}) ---",
        section.product.name, request.readings.free_chlorine
    );
    print_chlorine_table(&section.dose_table);
    println!("\n--- Breakpoint Chlorination ---");
    print_breakpoint(&section.breakpoint);

    if let Some(salt) = &report.salt {
        println!("\n--- Salt ---");
        println!("{}", salt.display);
    }

    if let Some(section) = &report.thiosulfate {
        println!("\n--- Chlorine Neutralizer ---");
        print_thiosulfate(&section.rows, section.warning.as_deref());
    }
}
