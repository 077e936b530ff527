//! Element-count mapping produced by the parser.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A count, merge or multiplier result did not fit in `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("element count overflow")]
pub struct CountOverflow;

/// Mapping from element symbol to a positive atom count.
///
/// Zero counts are never stored: adding zero is a no-op and multiplying by zero
/// empties the mapping. Iteration is ordered by symbol, which only serves to
/// keep reports deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")
)]
pub struct ElementCount {
    counts: BTreeMap<String, u32>,
}

impl ElementCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Count for `symbol`, zero when absent.
    pub fn get(&self, symbol: &str) -> u32 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Sum of all counts.
    pub fn total_atoms(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Adds `count` atoms of `symbol`.
    pub fn add(&mut self, symbol: &str, count: u32) -> Result<(), CountOverflow> {
        if count == 0 {
            return Ok(());
        }
        match self.counts.get_mut(symbol) {
            Some(existing) => {
                *existing = existing.checked_add(count).ok_or(CountOverflow)?;
            }
            None => {
                self.counts.insert(symbol.to_string(), count);
            }
        }
        Ok(())
    }

    /// Key-wise sum of `other` into `self`. Leaves `self` untouched on overflow.
    pub fn merge(&mut self, other: &ElementCount) -> Result<(), CountOverflow> {
        for (symbol, &count) in &other.counts {
            self.get(symbol).checked_add(count).ok_or(CountOverflow)?;
        }
        for (symbol, &count) in &other.counts {
            *self.counts.entry(symbol.clone()).or_insert(0) += count;
        }
        Ok(())
    }

    /// Scales every count by `factor`. Leaves `self` untouched on overflow.
    pub fn multiply(&mut self, factor: u32) -> Result<(), CountOverflow> {
        match factor {
            0 => {
                self.counts.clear();
                Ok(())
            }
            1 => Ok(()),
            _ => {
                if self.counts.values().any(|c| c.checked_mul(factor).is_none()) {
                    return Err(CountOverflow);
                }
                for count in self.counts.values_mut() {
                    *count *= factor;
                }
                Ok(())
            }
        }
    }

    /// Symbols in Hill order: carbon, hydrogen, then alphabetical. Without carbon
    /// every symbol is alphabetical.
    pub fn hill_order(&self) -> Vec<(&str, u32)> {
        let mut out = Vec::with_capacity(self.counts.len());
        let has_carbon = self.contains("C");
        if has_carbon {
            out.push(("C", self.get("C")));
            if let Some(&h) = self.counts.get("H") {
                out.push(("H", h));
            }
        }
        out.extend(
            self.iter()
                .filter(|(s, _)| !has_carbon || (*s != "C" && *s != "H")),
        );
        out
    }
}

impl fmt::Display for ElementCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.hill_order() {
            f.write_str(symbol)?;
            if count != 1 {
                write!(f, "{count}")?;
            }
        }
        Ok(())
    }
}

impl From<BTreeMap<String, u32>> for ElementCount {
    fn from(mut counts: BTreeMap<String, u32>) -> Self {
        counts.retain(|_, c| *c > 0);
        Self { counts }
    }
}

impl From<ElementCount> for BTreeMap<String, u32> {
    fn from(value: ElementCount) -> Self {
        value.counts
    }
}

/// Collects pairs, summing repeated symbols and saturating at `u32::MAX`.
impl<S: Into<String>> FromIterator<(S, u32)> for ElementCount {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for (symbol, count) in iter {
            if count == 0 {
                continue;
            }
            let slot = counts.entry(symbol.into()).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        Self { counts }
    }
}

impl IntoIterator for ElementCount {
    type Item = (String, u32);
    type IntoIter = btree_map::IntoIter<String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementCount {
    type Item = (&'a String, &'a u32);
    type IntoIter = btree_map::Iter<'a, String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
