use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use poolforge_schemas::water::{Measurements, PoolType, TargetOverrides};

/// Pool and spa water chemistry: LSI, water balance and chemical doses.
#[derive(Parser)]
#[command(name = "poolforge", version, about = "Pool and spa water chemistry calculator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Langelier Saturation Index and its factors.
    Lsi(LsiArgs),
    /// Ordered dosing steps to bring the water to its targets.
    Balance(BalanceArgs),
    /// Breakpoint (shock) chlorination dose.
    Breakpoint(BreakpointArgs),
    /// Salt needed for a chlorine generator.
    Salt(SaltArgs),
    /// Sodium thiosulfate needed to lower free chlorine.
    Thiosulfate(ThiosulfateArgs),
    /// Full operator report from a water test request file.
    Report(ReportArgs),
    /// Print the steps recorded in a dosing log.
    History(HistoryArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PoolTypeArg {
    Pool,
    Spa,
}

impl From<PoolTypeArg> for PoolType {
    fn from(arg: PoolTypeArg) -> Self {
        match arg {
            PoolTypeArg::Pool => PoolType::Pool,
            PoolTypeArg::Spa => PoolType::Spa,
        }
    }
}

/// A water test. pH, alkalinity and calcium are required.
#[derive(Args)]
pub struct WaterArgs {
    #[arg(long)]
    pub ph: f64,

    /// Total alkalinity (ppm).
    #[arg(long)]
    pub alkalinity: f64,

    /// Calcium hardness (ppm).
    #[arg(long)]
    pub calcium: f64,

    /// Cyanuric acid (ppm).
    #[arg(long, default_value_t = 0.0)]
    pub cya: f64,

    /// Water temperature (°F).
    #[arg(long = "temp-f", default_value_t = 77.0)]
    pub temp_f: f64,

    /// Total dissolved solids (ppm).
    #[arg(long, default_value_t = 1000.0)]
    pub tds: f64,
}

impl WaterArgs {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            ph: self.ph,
            alkalinity: self.alkalinity,
            calcium: self.calcium,
            cya: self.cya,
            temp_f: self.temp_f,
            tds: self.tds,
        }
    }
}

#[derive(Args)]
pub struct PoolArgs {
    #[arg(long = "pool-type", value_enum, default_value = "pool")]
    pub pool_type: PoolTypeArg,

    /// Water volume in gallons.
    #[arg(long = "volume", default_value_t = 10_000.0)]
    pub volume_gallons: f64,
}

#[derive(Args)]
pub struct LsiArgs {
    #[command(flatten)]
    pub water: WaterArgs,
}

#[derive(Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub water: WaterArgs,

    #[command(flatten)]
    pub pool: PoolArgs,

    #[arg(long = "target-ph")]
    pub target_ph: Option<f64>,

    #[arg(long = "target-alkalinity")]
    pub target_alkalinity: Option<f64>,

    #[arg(long = "target-calcium")]
    pub target_calcium: Option<f64>,

    #[arg(long = "target-cya")]
    pub target_cya: Option<f64>,

    /// Directory holding the reference YAML tables. Built-in golden numbers are used
    /// when it has none for the pool type.
    #[arg(long, default_value = "data/reference")]
    pub reference: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl BalanceArgs {
    pub fn overrides(&self) -> TargetOverrides {
        TargetOverrides {
            ph: self.target_ph,
            alkalinity: self.target_alkalinity,
            calcium: self.target_calcium,
            cya: self.target_cya,
        }
    }
}

#[derive(Args)]
pub struct BreakpointArgs {
    /// Free chlorine (ppm).
    #[arg(long = "free-chlorine")]
    pub free_chlorine: f64,

    /// Total chlorine (ppm).
    #[arg(long = "total-chlorine")]
    pub total_chlorine: f64,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Chlorine product id from the reference tables.
    #[arg(long, default_value = "liquid-12.5")]
    pub product: String,

    #[arg(long, default_value = "data/reference")]
    pub reference: PathBuf,
}

#[derive(Args)]
pub struct SaltArgs {
    /// Current salt level (ppm).
    #[arg(long)]
    pub current: f64,

    /// Target salt level (ppm).
    #[arg(long, default_value_t = 3200.0)]
    pub target: f64,

    /// Water volume in gallons.
    #[arg(long = "volume", default_value_t = 10_000.0)]
    pub volume_gallons: f64,
}

#[derive(Args)]
pub struct ThiosulfateArgs {
    /// Free chlorine (ppm).
    #[arg(long = "free-chlorine")]
    pub free_chlorine: f64,

    /// Water volume in gallons.
    #[arg(long = "volume", default_value_t = 10_000.0)]
    pub volume_gallons: f64,

    /// Current pH, checked before neutralizing.
    #[arg(long)]
    pub ph: Option<f64>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Path to the water test request YAML.
    #[arg(short, long, default_value = "demos/request.yaml")]
    pub request: PathBuf,

    #[arg(long, default_value = "data/reference")]
    pub reference: PathBuf,

    /// Parent directory for timestamped run directories.
    #[arg(short, long, default_value = "data/runs")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Path to a dosing_log.csv written by `report`.
    #[arg(short, long)]
    pub log: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_defaults() {
        let cli = Cli::parse_from([
            "poolforge", "balance", "--ph", "7.4", "--alkalinity", "80", "--calcium", "250",
        ]);
        let Command::Balance(args) = cli.command else {
            panic!("expected balance");
        };
        let water = args.water.measurements();
        assert_eq!(water.cya, 0.0);
        assert_eq!(water.temp_f, 77.0);
        assert_eq!(water.tds, 1000.0);
        assert_eq!(args.pool.volume_gallons, 10_000.0);
        assert!(matches!(args.pool.pool_type, PoolTypeArg::Pool));
        assert!(args.overrides().is_empty());
        assert!(!args.json);
    }

    #[test]
    fn verbosity_counts_and_is_global() {
        let cli = Cli::parse_from([
            "poolforge", "salt", "--current", "2800", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn spa_and_overrides_parse() {
        let cli = Cli::parse_from([
            "poolforge", "balance", "--ph", "7.4", "--alkalinity", "80", "--calcium", "250",
            "--pool-type", "spa", "--volume", "400", "--target-ph", "7.4", "--json",
        ]);
        let Command::Balance(args) = cli.command else {
            panic!("expected balance");
        };
        assert_eq!(PoolType::from(args.pool.pool_type), PoolType::Spa);
        assert_eq!(args.overrides().ph, Some(7.4));
        assert!(args.json);
    }
}
