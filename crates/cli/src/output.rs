use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde::Serialize;

use cronmath_schedule::{CalculationResult, LoadResult, LoadStatus};

use crate::config::OutputFormat;

/// Color scheme for text output.
struct Colors;

impl Colors {
    const RESULT: Color = Color::Cyan;
    const LOADED: Color = Color::Green;
    const SKIPPED: Color = Color::DarkGrey;
    const FAILED: Color = Color::Red;
    const HEADER: Color = Color::Magenta;
}

/// Writes command results to stdout in the selected format.
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let mut stdout = io::stdout();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        stdout.flush()?;
        Ok(())
    }

    /// Print a calculation: the bare expression in text mode.
    pub fn print_calculation(&self, result: &CalculationResult) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.print_json(result);
        }
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::RESULT),
            Print(format!("{}\n", result.result)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print one row per load result, paths relative to `root`.
    pub fn print_load_results(&self, root: &Path, results: &[LoadResult]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.print_json(results);
        }

        let mut stdout = io::stdout();
        if results.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::SKIPPED),
                Print(format!("No schedule files found in {}.\n", root.display())),
                ResetColor,
            )?;
            return Ok(());
        }

        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("{:<36} {:<8} {}\n", "FILE", "STATUS", "DETAIL")),
            Print(format!("{}\n", "-".repeat(80))),
            ResetColor,
        )?;

        for r in results {
            let file = r.path.strip_prefix(root).unwrap_or(&r.path).display().to_string();
            let (color, label, detail) = match &r.status {
                LoadStatus::Loaded { id, final_cron } => {
                    (Colors::LOADED, "loaded", format!("{id}  {final_cron}"))
                }
                LoadStatus::Skipped { reason } => (Colors::SKIPPED, "skipped", reason.clone()),
                LoadStatus::Failed { error } => (Colors::FAILED, "failed", error.clone()),
            };
            execute!(
                stdout,
                Print(format!("{:<36} ", file)),
                SetForegroundColor(color),
                Print(format!("{:<8}", label)),
                ResetColor,
                Print(format!(" {}\n", detail)),
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
