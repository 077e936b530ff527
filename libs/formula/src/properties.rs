//! Molecular properties derived from an [`ElementCount`].

use crate::counts::ElementCount;
use crate::error::{Error, Result};
use crate::masses::AtomicMasses;
use std::collections::BTreeMap;
use std::fmt;

const HALOGENS: [&str; 4] = ["F", "Cl", "Br", "I"];

const COMMON_METALS: [&str; 9] = ["Na", "K", "Ca", "Mg", "Fe", "Cu", "Zn", "Ag", "Au"];

/// Molar mass in g/mol. Symbols missing from `masses` contribute zero.
pub fn molar_mass<M: AtomicMasses + ?Sized>(counts: &ElementCount, masses: &M) -> f64 {
    counts
        .iter()
        .map(|(symbol, count)| masses.atomic_mass(symbol).unwrap_or(0.0) * f64::from(count))
        .sum()
}

/// Symbols of `counts` that `masses` has no entry for.
pub fn unknown_symbols<M: AtomicMasses + ?Sized>(counts: &ElementCount, masses: &M) -> Vec<String> {
    counts
        .symbols()
        .filter(|s| masses.atomic_mass(s).is_none())
        .map(str::to_string)
        .collect()
}

/// Symbols of `counts` whose mass comes from a caller-supplied entry.
pub fn custom_symbols<M: AtomicMasses + ?Sized>(counts: &ElementCount, masses: &M) -> Vec<String> {
    counts
        .symbols()
        .filter(|s| masses.is_custom(s))
        .map(str::to_string)
        .collect()
}

/// Mass share of each element in percent.
///
/// Fails with [`Error::ZeroMass`] when the composition has no known mass
/// (empty formula, or only unknown symbols) or the total is not finite.
pub fn mass_percentages<M: AtomicMasses + ?Sized>(
    counts: &ElementCount,
    masses: &M,
) -> Result<BTreeMap<String, f64>> {
    let total = molar_mass(counts, masses);
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::ZeroMass);
    }
    Ok(counts
        .iter()
        .map(|(symbol, count)| {
            let share = masses.atomic_mass(symbol).unwrap_or(0.0) * f64::from(count) * 100.0;
            (symbol.to_string(), share / total)
        })
        .collect())
}

/// `"11.19%"` style rendering with two decimals.
pub fn format_percentage(percent: f64) -> String {
    format!("{percent:.2}%")
}

/// Degree of unsaturation (rings plus pi bonds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unsaturation {
    Degree(i64),
    /// The formula has no carbon.
    NotApplicable,
}

impl Unsaturation {
    pub fn degree(self) -> Option<i64> {
        match self {
            Unsaturation::Degree(d) => Some(d),
            Unsaturation::NotApplicable => None,
        }
    }
}

impl fmt::Display for Unsaturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsaturation::Degree(d) => write!(f, "{d}"),
            Unsaturation::NotApplicable => f.write_str("not an organic compound"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Unsaturation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Unsaturation::Degree(d) => serializer.serialize_i64(*d),
            Unsaturation::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// `DU = floor((2C + 2 + N - H - X) / 2)` where X counts F, Cl, Br and I.
pub fn degree_of_unsaturation(counts: &ElementCount) -> Unsaturation {
    if !counts.contains("C") {
        return Unsaturation::NotApplicable;
    }
    let n = |s: &str| i64::from(counts.get(s));
    let halogens: i64 = HALOGENS.iter().map(|&s| n(s)).sum();
    let numerator = 2 * n("C") + 2 + n("N") - n("H") - halogens;
    Unsaturation::Degree(numerator.div_euclid(2))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CompoundClass {
    Organic,
    Organometallic,
    InorganicCarbon,
    Inorganic,
}

impl fmt::Display for CompoundClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompoundClass::Organic => "Organic Compound",
            CompoundClass::Organometallic => "Organometallic Compound",
            CompoundClass::InorganicCarbon => "Inorganic Carbon Compound",
            CompoundClass::Inorganic => "Inorganic Compound",
        })
    }
}

/// Coarse classification by presence of carbon, hydrogen and common metals.
pub fn classify(counts: &ElementCount) -> CompoundClass {
    if !counts.contains("C") {
        return CompoundClass::Inorganic;
    }
    if COMMON_METALS.iter().any(|m| counts.contains(m)) {
        CompoundClass::Organometallic
    } else if counts.contains("H") {
        CompoundClass::Organic
    } else {
        CompoundClass::InorganicCarbon
    }
}
