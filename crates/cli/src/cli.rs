use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Shift cron expressions by minute and hour offsets.
///
/// Offsets are applied to the expression itself, so the shifted expression
/// fires exactly the given amount of time after the unshifted one would.
#[derive(Parser, Debug)]
#[command(name = "cronmath", version, about = "Shift cron expressions by minute and hour offsets")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/cronmath/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format: text or json (overrides CRONMATH_OUTPUT and config file)
    #[arg(long, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply offsets to one expression and print the result
    Calc(CalcArgs),
    /// Load a directory of YAML schedule definitions and print each outcome
    Schedules(SchedulesArgs),
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Five-field cron expression, e.g. "0 9 * * 1-5"
    pub expr: String,

    /// Operation as TYPE:VALUE:UNIT, e.g. add:30:minutes (repeatable)
    #[arg(long = "op", value_name = "TYPE:VALUE:UNIT", allow_hyphen_values = true)]
    pub ops: Vec<String>,

    /// Shift later by a compact duration, e.g. 30m or 2h (repeatable)
    #[arg(long, value_name = "DURATION", allow_hyphen_values = true)]
    pub add: Vec<String>,

    /// Shift earlier by a compact duration, e.g. 15min or 1h (repeatable)
    #[arg(long, value_name = "DURATION", allow_hyphen_values = true)]
    pub sub: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SchedulesArgs {
    /// Schedules directory (overrides CRONMATH_SCHEDULES_DIR and config file)
    pub dir: Option<PathBuf>,
}
