use std::io::Write;

use owo_colors::OwoColorize;
use verdict_core::{CheckReport, Record};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print matched records without validating them (dry-run listing).
pub fn print_records(
    w: &mut dyn Write,
    file_name: &str,
    records: &[Record],
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} records matched)\n",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            records.len()
        )?;
    } else {
        writeln!(
            w,
            "DRY RUN: {} ({} records matched)\n",
            file_name,
            records.len()
        )?;
    }

    for (i, record) in records.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "{}", format!("[{}]", i + 1).bold().yellow())?;
        } else {
            writeln!(w, "[{}]", i + 1)?;
        }
        writeln!(w, "  Test:    {}", record.test_id)?;
        writeln!(w, "  Date:    {}", record.date)?;
        writeln!(w, "  Result:  {}", record.result)?;
        writeln!(w)?;
    }

    writeln!(w, "Total: {} records", records.len())?;
    Ok(())
}

/// Print the scan summary after matching.
pub fn print_scan_summary(
    w: &mut dyn Write,
    file_name: &str,
    matched: usize,
) -> std::io::Result<()> {
    writeln!(w, "Scanning {}...", file_name)?;
    writeln!(w, "Found {} records to check", matched)?;
    writeln!(w)?;
    Ok(())
}

/// Print per-record outcomes followed by the final summary.
pub fn print_check_report(
    w: &mut dyn Write,
    matched: usize,
    report: &CheckReport,
    color: ColorMode,
) -> std::io::Result<()> {
    for outcome in &report.outcomes {
        let idx = outcome.index + 1;
        let record = &outcome.record;
        let line = format!("{} {} {}", record.test_id, record.date, record.result);
        match &outcome.violation {
            None => {
                if color.enabled() {
                    writeln!(w, "[{}/{}] {} -> {}", idx, matched, line, "VALID".green())?;
                } else {
                    writeln!(w, "[{}/{}] {} -> VALID", idx, matched, line)?;
                }
            }
            Some(violation) => {
                if color.enabled() {
                    writeln!(
                        w,
                        "[{}/{}] {} -> {} ({})",
                        idx,
                        matched,
                        line,
                        "INVALID".red(),
                        violation
                    )?;
                } else {
                    writeln!(w, "[{}/{}] {} -> INVALID ({})", idx, matched, line, violation)?;
                }
            }
        }
    }

    if report.stats.total < matched {
        writeln!(w)?;
        writeln!(
            w,
            "Stopped after the first invalid record ({} of {} checked).",
            report.stats.total, matched
        )?;
    }

    print_summary(w, report, color)?;
    Ok(())
}

/// Print the final summary.
pub fn print_summary(
    w: &mut dyn Write,
    report: &CheckReport,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "SUMMARY".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Records checked: {}", report.stats.total)?;
    if color.enabled() {
        writeln!(w, "  {} {}", "Valid:".green(), report.stats.valid)?;
    } else {
        writeln!(w, "  Valid: {}", report.stats.valid)?;
    }
    if report.stats.invalid > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Invalid:".red(), report.stats.invalid)?;
        } else {
            writeln!(w, "  Invalid: {}", report.stats.invalid)?;
        }
    }
    writeln!(w)?;
    Ok(())
}
