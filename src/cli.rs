use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Assigns marina slips to club members by priority and boat size.
#[derive(Debug, Parser)]
#[command(name = "slipway", version, long_about = None)]
pub struct Args {
    /// CSV roster of slips: slip_id,max_length_ft,max_length_in,max_width_ft,max_width_in
    #[arg(long, value_name = "FILE")]
    pub slips: PathBuf,

    /// CSV roster of members: member_id,boat_length_ft,boat_length_in,boat_width_ft,boat_width_in,current_slip,dock_status
    #[arg(long, value_name = "FILE")]
    pub members: PathBuf,

    /// Write assignments to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// JSONC config file; defaults to ./slipway.jsonc when present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print phases, passes and summary statistics
    #[arg(long)]
    pub verbose: bool,

    /// Only check width when fitting boats; length differences are noted in comments
    #[arg(long)]
    pub ignore_length: bool,

    /// Price per square foot of the larger of boat and slip
    #[arg(long, value_name = "AMOUNT", value_parser = parse_rate)]
    pub price_per_sqft: Option<f64>,

    /// Explain unassigned members whose boat outgrew their previous slip
    #[arg(long)]
    pub legacy_fit_recheck: bool,
}

impl Args {
    /// Flags only ever switch settings on; the rate replaces the configured one.
    pub fn apply_overrides(&self, config: &mut Config) {
        let allocation = &mut config.allocation;
        allocation.verbose |= self.verbose;
        allocation.ignore_length |= self.ignore_length;
        allocation.legacy_fit_recheck |= self.legacy_fit_recheck;
        if let Some(rate) = self.price_per_sqft {
            allocation.price_per_sqft = rate;
        }
    }
}

fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("'{raw}' must be a non-negative amount"));
    }
    Ok(rate)
}
