//! Subcommand implementations.
//!
//! Every command writes to a caller-supplied writer and reports whether all
//! formulas succeeded, so the binary can map failures to its exit code.

use anyhow::Context;
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stoich_formula::{analyze, analyze_batch, BatchSummary, MassTable};

use crate::export::{write_records, ExportFormat, ExportRecord};
use crate::report::{write_batch_line, write_error, write_report};

/// Full report per formula.
pub fn run_analyze<W: Write>(out: &mut W, formulas: &[String], table: &MassTable) -> anyhow::Result<bool> {
    let mut all_ok = true;
    for formula in formulas {
        match analyze(formula, table) {
            Ok(analysis) => write_report(out, &analysis)?,
            Err(e) => {
                tracing::warn!(formula = %formula, error = %e, "Failed to analyze formula");
                write_error(out, formula, &e)?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

/// One summary line per formula.
pub fn run_batch<W: Write>(out: &mut W, formulas: &[String], table: &MassTable) -> anyhow::Result<bool> {
    let items = analyze_batch(formulas, table);
    writeln!(out, "Analyzed {} formulas", items.len())?;
    writeln!(out, "{}", "-".repeat(60))?;
    for item in &items {
        write_batch_line(out, item)?;
    }
    let summary = BatchSummary::of(&items);
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "{} succeeded, {} failed", summary.succeeded, summary.failed)?;
    Ok(summary.failed == 0)
}

/// Analyzes `formulas` and writes the successful ones as export records.
pub fn export_to<W: Write>(
    out: W,
    format: ExportFormat,
    formulas: &[String],
    table: &MassTable,
) -> anyhow::Result<BatchSummary> {
    let items = analyze_batch(formulas, table);
    let analyzed_at = Utc::now();
    let records: Vec<ExportRecord> = items
        .iter()
        .filter_map(|item| item.analysis())
        .map(|analysis| ExportRecord::new(analysis, analyzed_at))
        .collect();
    write_records(format, out, &records)?;
    Ok(BatchSummary::of(&items))
}

/// Export to `output`, `-` meaning stdout.
pub fn run_export(
    format: ExportFormat,
    output: &Path,
    formulas: &[String],
    table: &MassTable,
) -> anyhow::Result<bool> {
    let summary = if output == Path::new("-") {
        export_to(std::io::stdout().lock(), format, formulas, table)?
    } else {
        let file = File::create(output)
            .with_context(|| format!("Failed to create export file {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        let summary = export_to(&mut writer, format, formulas, table)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write export file {}", output.display()))?;
        tracing::info!(
            path = %output.display(),
            records = summary.succeeded,
            "Results exported"
        );
        summary
    };

    if summary.failed > 0 {
        tracing::warn!(
            skipped = summary.failed,
            "Some formulas could not be analyzed and were left out of the export"
        );
    }
    Ok(summary.failed == 0)
}
