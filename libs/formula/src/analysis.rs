//! Full analysis of a formula and batch processing with per-item isolation.

use crate::counts::ElementCount;
use crate::error::{Error, Result};
use crate::masses::AtomicMasses;
use crate::parser::parse;
use crate::properties::{
    classify, custom_symbols, degree_of_unsaturation, mass_percentages, molar_mass,
    unknown_symbols, CompoundClass, Unsaturation,
};
use std::collections::BTreeMap;

/// Everything derived from a single formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Analysis {
    pub formula: String,
    pub composition: ElementCount,
    /// g/mol
    pub molar_mass: f64,
    /// `None` when the composition has no known mass.
    pub mass_percentages: Option<BTreeMap<String, f64>>,
    pub unsaturation: Unsaturation,
    pub total_atoms: u64,
    pub distinct_elements: usize,
    pub compound_class: CompoundClass,
    /// Symbols the mass table had no entry for; they weigh nothing.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub unknown_symbols: Vec<String>,
    /// Symbols whose mass came from a caller-supplied entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub custom_symbols: Vec<String>,
}

/// Parses `formula` and computes every property against `masses`.
pub fn analyze<M: AtomicMasses + ?Sized>(formula: &str, masses: &M) -> Result<Analysis> {
    let composition = parse(formula)?;
    Ok(analyze_counts(formula, composition, masses))
}

/// Computes every property of an already parsed composition.
pub fn analyze_counts<M: AtomicMasses + ?Sized>(
    formula: &str,
    composition: ElementCount,
    masses: &M,
) -> Analysis {
    let unknown = unknown_symbols(&composition, masses);
    if !unknown.is_empty() {
        tracing::warn!(
            formula,
            symbols = ?unknown,
            "Formula contains symbols without a known atomic mass"
        );
    }

    let mass_percentages = match mass_percentages(&composition, masses) {
        Ok(p) => Some(p),
        Err(_) => None,
    };

    Analysis {
        formula: formula.to_string(),
        molar_mass: molar_mass(&composition, masses),
        mass_percentages,
        unsaturation: degree_of_unsaturation(&composition),
        total_atoms: composition.total_atoms(),
        distinct_elements: composition.len(),
        compound_class: classify(&composition),
        unknown_symbols: unknown,
        custom_symbols: custom_symbols(&composition, masses),
        composition,
    }
}

/// Outcome for one formula of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchItem {
    pub formula: String,
    pub outcome: Result<Analysis>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }
}

/// Analyzes every formula in input order. A malformed formula yields an `Err`
/// item and never stops the rest of the batch.
pub fn analyze_batch<I, S, M>(formulas: I, masses: &M) -> Vec<BatchItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    M: AtomicMasses + ?Sized,
{
    let items: Vec<BatchItem> = formulas
        .into_iter()
        .map(|formula| {
            let formula = formula.as_ref();
            let outcome = analyze(formula, masses);
            if let Err(error) = &outcome {
                tracing::warn!(formula, error = %error, "Failed to analyze formula");
            }
            BatchItem {
                formula: formula.to_string(),
                outcome,
            }
        })
        .collect();

    let summary = BatchSummary::of(&items);
    tracing::debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch analysis finished"
    );
    items
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(items: &[BatchItem]) -> Self {
        let succeeded = items.iter().filter(|i| i.is_ok()).count();
        Self {
            succeeded,
            failed: items.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedReason;
    use crate::masses::MassTable;

    #[test]
    fn analyzes_glucose() {
        let table = MassTable::standard();
        let a = analyze("C6H12O6", &table).unwrap();
        assert_eq!(a.total_atoms, 24);
        assert_eq!(a.distinct_elements, 3);
        assert_eq!(a.unsaturation, Unsaturation::Degree(1));
        assert_eq!(a.compound_class, CompoundClass::Organic);
        assert!(a.unknown_symbols.is_empty());
        assert!((a.molar_mass - 180.156).abs() < 1e-9);
        assert!(a.mass_percentages.is_some());
    }

    #[test]
    fn empty_composition_has_no_percentages() {
        let table = MassTable::standard();
        let a = analyze("", &table).unwrap();
        assert_eq!(a.molar_mass, 0.0);
        assert_eq!(a.mass_percentages, None);
        assert_eq!(a.compound_class, CompoundClass::Inorganic);
    }

    #[test]
    fn records_custom_masses_used() {
        let table = MassTable::standard().with_mass("D", 2.014).unwrap();
        let heavy = analyze("D2O", &table).unwrap();
        assert_eq!(heavy.custom_symbols, vec!["D".to_string()]);
        assert!(heavy.unknown_symbols.is_empty());

        let plain = analyze("H2O", &table).unwrap();
        assert!(plain.custom_symbols.is_empty());
    }

    #[test]
    fn batch_isolates_failures_and_keeps_order() {
        let table = MassTable::standard();
        let items = analyze_batch(["H2O", "H2O)", "NaCl", "2H"], &table);
        let formulas: Vec<&str> = items.iter().map(|i| i.formula.as_str()).collect();
        assert_eq!(formulas, ["H2O", "H2O)", "NaCl", "2H"]);

        assert!(items[0].is_ok());
        assert_eq!(
            items[1].error().and_then(Error::reason),
            Some(&MalformedReason::UnmatchedClosingDelimiter)
        );
        assert!(items[2].is_ok());
        assert_eq!(
            items[3].error().and_then(Error::reason),
            Some(&MalformedReason::CountWithoutElement)
        );

        let summary = BatchSummary::of(&items);
        assert_eq!(summary, BatchSummary { succeeded: 2, failed: 2 });
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn batch_accepts_owned_strings() {
        let table = MassTable::standard();
        let formulas = vec!["CO2".to_string(), "CH4".to_string()];
        let items = analyze_batch(&formulas, &table);
        assert!(items.iter().all(BatchItem::is_ok));
    }
}
