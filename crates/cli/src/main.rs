mod cli;
mod config;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cronmath_schedule::{
    parse_duration, Calculation, CalculationResult, Operation, OperationKind, ScheduleLoader,
};

use crate::cli::{CalcArgs, CliArgs, Command, SchedulesArgs};
use crate::config::CliConfig;
use crate::output::Printer;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    // Load config
    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(config.resolve_log_filter())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new(config.resolve_output(args.output)?);

    match args.command {
        Command::Calc(calc) => {
            let result = run_calc(&calc)?;
            printer.print_calculation(&result)
        }
        Command::Schedules(schedules) => run_schedules(&config, schedules, &printer),
    }
}

/// Collect `--op`, then `--add`, then `--sub` operations and calculate.
fn run_calc(args: &CalcArgs) -> Result<CalculationResult> {
    let mut operations = args
        .ops
        .iter()
        .map(|s| s.parse::<Operation>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --op")?;

    for (kind, values, flag) in [
        (OperationKind::Add, &args.add, "--add"),
        (OperationKind::Sub, &args.sub, "--sub"),
    ] {
        for value in values {
            let duration =
                parse_duration(value).with_context(|| format!("invalid {flag} '{value}'"))?;
            operations.push(Operation::from_duration(kind, duration));
        }
    }

    debug!(expr = %args.expr, operations = operations.len(), "calculating");
    Calculation::new(&args.expr, operations)
        .calculate()
        .with_context(|| format!("failed to shift '{}'", args.expr))
}

fn run_schedules(config: &CliConfig, args: SchedulesArgs, printer: &Printer) -> Result<()> {
    let Some(dir) = config.resolve_schedules_dir(args.dir) else {
        bail!("no schedules directory: pass DIR, set CRONMATH_SCHEDULES_DIR or schedules_dir in the config file");
    };

    let loader = ScheduleLoader::new(dir);
    let results = loader
        .load_all()
        .with_context(|| format!("failed to load schedules from {}", loader.schedules_dir().display()))?;
    printer.print_load_results(loader.schedules_dir(), &results)?;

    let failed = results.iter().filter(|r| r.status.is_failed()).count();
    info!(total = results.len(), loaded = loader.schedules().len(), failed, "schedules loaded");
    if failed > 0 {
        bail!("{failed} schedule file(s) failed to load");
    }
    Ok(())
}
