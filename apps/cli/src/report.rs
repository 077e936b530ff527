//! Human-readable reports.

use std::io::{self, Write};
use stoich_formula::{format_percentage, Analysis, BatchItem, ElementCount};

/// `C: 6, H: 12, O: 6` in Hill order.
pub fn format_composition(counts: &ElementCount) -> String {
    counts
        .hill_order()
        .into_iter()
        .map(|(symbol, count)| format!("{symbol}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_percentages(analysis: &Analysis) -> String {
    let Some(percentages) = &analysis.mass_percentages else {
        return "n/a (no known mass)".into();
    };
    analysis
        .composition
        .hill_order()
        .into_iter()
        .map(|(symbol, _)| {
            let p = percentages.get(symbol).copied().unwrap_or(0.0);
            format!("{symbol}: {}", format_percentage(p))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full multi-line report for one formula.
pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "Formula: {}", analysis.formula)?;
    writeln!(out, "  Compound Type: {}", analysis.compound_class)?;
    writeln!(out, "  Elemental Composition: {}", format_composition(&analysis.composition))?;
    writeln!(out, "  Molecular Weight: {:.3} g/mol", analysis.molar_mass)?;
    writeln!(out, "  Total Atoms: {}", analysis.total_atoms)?;
    writeln!(out, "  Unique Elements: {}", analysis.distinct_elements)?;
    if let Some(degree) = analysis.unsaturation.degree() {
        writeln!(out, "  Degree of Unsaturation: {degree}")?;
    }
    writeln!(out, "  Mass Percentages: {}", format_percentages(analysis))?;
    if !analysis.unknown_symbols.is_empty() {
        writeln!(
            out,
            "  Unknown Symbols (counted as zero mass): {}",
            analysis.unknown_symbols.join(", ")
        )?;
    }
    if !analysis.custom_symbols.is_empty() {
        writeln!(out, "  Custom Elements: {}", analysis.custom_symbols.join(", "))?;
    }
    writeln!(out, "{}", "-".repeat(50))
}

pub fn write_error<W: Write>(out: &mut W, formula: &str, error: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "Error analyzing {formula}: {error}")?;
    writeln!(out, "{}", "-".repeat(50))
}

/// One table row per batch item.
pub fn write_batch_line<W: Write>(out: &mut W, item: &BatchItem) -> io::Result<()> {
    match &item.outcome {
        Ok(analysis) => writeln!(
            out,
            "ok    {:12} | MW: {:9.2} g/mol | Elements: {}",
            item.formula,
            analysis.molar_mass,
            format_composition(&analysis.composition)
        ),
        Err(error) => writeln!(out, "error {:12} | {error}", item.formula),
    }
}
