//! Output formatting for lint results.

use anyhow::Result;
use import_graph_core::{FileReport, LintResult, ViolationRecord, RULE_NAME};
use std::io::{self, Write};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(&mut io::stdout().lock(), result)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => {
            for line in compact_lines(result) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    for (report, violation) in result.violations() {
        writeln!(
            out,
            "{} {} at {}",
            violation.rule_id,
            RULE_NAME,
            location(report, violation)
        )?;
        writeln!(out, "  \x1b[31merror\x1b[0m: {}", violation.message)?;
        writeln!(out, "  = module: {}", report.module)?;
        writeln!(out)?;
    }

    let count = result.violation_count();
    let color = if count > 0 { "\x1b[31m" } else { "\x1b[32m" };
    writeln!(
        out,
        "{color}Found {count} denied import(s) in {} file(s)\x1b[0m",
        result.files_checked
    )
}

/// `path:line:col: message`, one per violation, with a 1-based column.
fn compact_lines(result: &LintResult) -> Vec<String> {
    result
        .violations()
        .map(|(report, violation)| {
            format!("{}: {}", location(report, violation), violation.message)
        })
        .collect()
}

fn location(report: &FileReport, violation: &ViolationRecord) -> String {
    format!(
        "{}:{}:{}",
        report.file.display(),
        violation.line,
        violation.column + 1
    )
}
