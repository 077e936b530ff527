//! JSON and CSV export of analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use stoich_formula::{format_percentage, Analysis, ElementCount};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn default_output(self) -> PathBuf {
        match self {
            ExportFormat::Json => PathBuf::from("chemical_analysis.json"),
            ExportFormat::Csv => PathBuf::from("chemical_analysis.csv"),
        }
    }
}

/// One exported formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub formula: String,
    pub composition: ElementCount,
    /// g/mol, rounded to three decimals
    pub molecular_weight: f64,
    pub mass_percentages: BTreeMap<String, String>,
    pub analysis_date: String,
}

impl ExportRecord {
    pub fn new(analysis: &Analysis, analyzed_at: DateTime<Utc>) -> Self {
        let mass_percentages = analysis
            .mass_percentages
            .iter()
            .flatten()
            .map(|(symbol, p)| (symbol.clone(), format_percentage(*p)))
            .collect();
        Self {
            formula: analysis.formula.clone(),
            composition: analysis.composition.clone(),
            molecular_weight: (analysis.molar_mass * 1000.0).round() / 1000.0,
            mass_percentages,
            analysis_date: analyzed_at.to_rfc3339(),
        }
    }
}

pub fn write_json<W: Write>(mut out: W, records: &[ExportRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    Ok(())
}

/// Composition and percentages are embedded as JSON objects in their cells.
pub fn write_csv<W: Write>(out: W, records: &[ExportRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "Formula",
        "Molecular Weight (g/mol)",
        "Composition",
        "Mass Percentages",
        "Analysis Date",
    ])?;
    for record in records {
        writer.write_record([
            record.formula.clone(),
            record.molecular_weight.to_string(),
            serde_json::to_string(&record.composition)?,
            serde_json::to_string(&record.mass_percentages)?,
            record.analysis_date.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_records<W: Write>(
    format: ExportFormat,
    out: W,
    records: &[ExportRecord],
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Json => write_json(out, records),
        ExportFormat::Csv => write_csv(out, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stoich_formula::{analyze, MassTable};

    fn records(formulas: &[&str]) -> Vec<ExportRecord> {
        let table = MassTable::standard();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        formulas
            .iter()
            .map(|f| ExportRecord::new(&analyze(f, &table).unwrap(), at))
            .collect()
    }

    #[test]
    fn record_rounds_weight_and_formats_percentages() {
        let r = &records(&["H2O"])[0];
        assert_eq!(r.molecular_weight, 18.015);
        assert_eq!(r.mass_percentages["H"], "11.19%");
        assert_eq!(r.mass_percentages["O"], "88.81%");
        assert_eq!(r.analysis_date, "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn json_export_is_an_array_of_records() {
        let mut buf = Vec::new();
        write_records(ExportFormat::Json, &mut buf, &records(&["H2O", "NaCl"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["formula"], "H2O");
        assert_eq!(items[0]["composition"], serde_json::json!({"H": 2, "O": 1}));
        assert_eq!(items[1]["mass_percentages"]["Na"], "39.34%");
    }

    #[test]
    fn csv_export_has_header_and_quoted_objects() {
        let mut buf = Vec::new();
        write_records(ExportFormat::Csv, &mut buf, &records(&["CO2"])).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Formula,Molecular Weight (g/mol),Composition,Mass Percentages,Analysis Date"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("CO2,44.009,"));
        assert!(row.contains(r#""{""C"":1,""O"":2}""#));
        assert!(lines.next().is_none());
    }

    #[test]
    fn default_output_names() {
        assert_eq!(
            ExportFormat::Csv.default_output(),
            PathBuf::from("chemical_analysis.csv")
        );
        assert_eq!(
            ExportFormat::Json.default_output(),
            PathBuf::from("chemical_analysis.json")
        );
    }
}
