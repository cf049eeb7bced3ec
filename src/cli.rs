use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "volt")]
#[command(version, about = "Slab-based electricity bill calculator and forecaster")]
pub struct Cli {
    /// Use a tariff file instead of ~/.config/volt/tariff.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print current tariff
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize tariff file with the reference table
    #[arg(long = "init")]
    pub init: bool,

    /// Check tariff
    #[arg(long = "check")]
    pub check: bool,

    /// Units consumed this period (kWh)
    #[arg(short = 'u', long = "units", value_name = "KWH")]
    pub units: Option<f64>,

    /// Previous meter reading
    #[arg(long, value_name = "READING", requires = "current", conflicts_with = "units")]
    pub previous: Option<f64>,

    /// Current meter reading
    #[arg(long, value_name = "READING", requires = "previous")]
    pub current: Option<f64>,

    /// Reject a current reading lower than the previous one instead of reporting zero usage
    #[arg(long)]
    pub strict: bool,

    /// Project the consumption onto the whole billing period
    #[arg(short = 'f', long = "forecast")]
    pub forecast: bool,

    /// Days elapsed in the period (default: today's day of month)
    #[arg(long, value_name = "DAYS", requires = "forecast")]
    pub elapsed_days: Option<u32>,

    /// Days in the period (default: length of the current month)
    #[arg(long, value_name = "DAYS", requires = "forecast")]
    pub period_days: Option<u32>,

    /// Units used in the reference period
    #[arg(long, value_name = "KWH", requires = "reference_cost", requires = "forecast")]
    pub reference_usage: Option<f64>,

    /// Total bill of the reference period
    #[arg(long, value_name = "AMOUNT", requires = "reference_usage", requires = "forecast")]
    pub reference_cost: Option<f64>,

    /// Monthly budget to measure the bill against
    #[arg(short = 'b', long, value_name = "AMOUNT")]
    pub budget: Option<f64>,

    /// Emit JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
