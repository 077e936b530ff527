//! Atomic mass lookup.
//!
//! The standard table is a compile-time perfect hash map. Custom entries
//! (isotopes, corrected values) live in a per-table override map, so no
//! process-wide state is ever mutated.

use crate::error::{Error, Result};
use phf::phf_map;
use std::collections::HashMap;

/// Standard atomic masses in g/mol.
static STANDARD_MASSES: phf::Map<&'static str, f64> = phf_map! {
    "H" => 1.008, "He" => 4.0026, "Li" => 6.94, "Be" => 9.0122, "B" => 10.81,
    "C" => 12.011, "N" => 14.007, "O" => 15.999, "F" => 18.998, "Ne" => 20.180,
    "Na" => 22.990, "Mg" => 24.305, "Al" => 26.982, "Si" => 28.085, "P" => 30.974,
    "S" => 32.06, "Cl" => 35.45, "Ar" => 39.948, "K" => 39.098, "Ca" => 40.078,
    "Sc" => 44.956, "Ti" => 47.867, "V" => 50.942, "Cr" => 51.996, "Mn" => 54.938,
    "Fe" => 55.845, "Co" => 58.933, "Ni" => 58.693, "Cu" => 63.546, "Zn" => 65.38,
    "Ga" => 69.723, "Ge" => 72.630, "As" => 74.922, "Se" => 78.971, "Br" => 79.904,
    "Kr" => 83.798, "Rb" => 85.468, "Sr" => 87.62, "Y" => 88.906, "Zr" => 91.224,
    "Nb" => 92.906, "Mo" => 95.95, "Tc" => 98.0, "Ru" => 101.07, "Rh" => 102.91,
    "Pd" => 106.42, "Ag" => 107.87, "Cd" => 112.41, "In" => 114.82, "Sn" => 118.71,
    "Sb" => 121.76, "Te" => 127.60, "I" => 126.90, "Xe" => 131.29, "Cs" => 132.91,
    "Ba" => 137.33, "La" => 138.91, "Ce" => 140.12, "Pr" => 140.91, "Nd" => 144.24,
    "Pm" => 145.0, "Sm" => 150.36, "Eu" => 151.96, "Gd" => 157.25, "Tb" => 158.93,
    "Dy" => 162.50, "Ho" => 164.93, "Er" => 167.26, "Tm" => 168.93, "Yb" => 173.05,
    "Lu" => 174.97, "Hf" => 178.49, "Ta" => 180.95, "W" => 183.84, "Re" => 186.21,
    "Os" => 190.23, "Ir" => 192.22, "Pt" => 195.08, "Au" => 196.97, "Hg" => 200.59,
    "Tl" => 204.38, "Pb" => 207.2, "Bi" => 208.98, "Po" => 209.0, "At" => 210.0,
    "Rn" => 222.0, "Fr" => 223.0, "Ra" => 226.0, "Ac" => 227.0, "Th" => 232.04,
    "Pa" => 231.04, "U" => 238.03, "Np" => 237.0, "Pu" => 244.0, "Am" => 243.0,
    "Cm" => 247.0, "Bk" => 247.0, "Cf" => 251.0, "Es" => 252.0, "Fm" => 257.0,
    "Md" => 258.0, "No" => 259.0, "Lr" => 266.0, "Rf" => 267.0, "Db" => 268.0,
    "Sg" => 269.0, "Bh" => 270.0, "Hs" => 277.0, "Mt" => 278.0, "Ds" => 281.0,
    "Rg" => 282.0, "Cn" => 285.0, "Nh" => 286.0, "Fl" => 289.0, "Mc" => 289.0,
    "Lv" => 293.0, "Ts" => 294.0, "Og" => 294.0,
};

/// Source of atomic masses for property calculations.
pub trait AtomicMasses {
    /// Mass of one atom of `symbol` in g/mol, `None` when unknown.
    fn atomic_mass(&self, symbol: &str) -> Option<f64>;

    /// Whether the mass of `symbol` was supplied by the caller rather than
    /// taken from the standard table.
    fn is_custom(&self, _symbol: &str) -> bool {
        false
    }
}

/// Standard table plus caller-supplied overrides.
#[derive(Clone, Debug)]
pub struct MassTable {
    base: Option<&'static phf::Map<&'static str, f64>>,
    overrides: HashMap<String, f64>,
}

impl Default for MassTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MassTable {
    /// The 118 standard elements, no overrides.
    pub fn standard() -> Self {
        Self {
            base: Some(&STANDARD_MASSES),
            overrides: HashMap::new(),
        }
    }

    /// A table containing only what is inserted into it.
    pub fn empty() -> Self {
        Self {
            base: None,
            overrides: HashMap::new(),
        }
    }

    /// Builder form of [`MassTable::insert`].
    pub fn with_mass(mut self, symbol: impl Into<String>, mass: f64) -> Result<Self> {
        self.insert(symbol, mass)?;
        Ok(self)
    }

    /// Adds or overrides the mass of `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, mass: f64) -> Result<()> {
        let symbol = symbol.into();
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidMass { symbol, mass });
        }
        self.overrides.insert(symbol, mass);
        Ok(())
    }

    /// Inserts every entry, stopping at the first invalid mass.
    pub fn extend_from<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (symbol, mass) in entries {
            self.insert(symbol, mass)?;
        }
        Ok(())
    }

    pub fn lookup(&self, symbol: &str) -> Option<f64> {
        self.overrides
            .get(symbol)
            .copied()
            .or_else(|| self.base.and_then(|b| b.get(symbol).copied()))
    }

    /// Whether `symbol` resolves through an override rather than the standard table.
    pub fn is_custom(&self, symbol: &str) -> bool {
        self.overrides.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        let base = self.base.map_or(0, |b| {
            b.keys().filter(|k| !self.overrides.contains_key(**k)).count()
        });
        base + self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AtomicMasses for MassTable {
    fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        self.lookup(symbol)
    }

    fn is_custom(&self, symbol: &str) -> bool {
        MassTable::is_custom(self, symbol)
    }
}

impl AtomicMasses for HashMap<String, f64> {
    fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}

impl<T: AtomicMasses + ?Sized> AtomicMasses for &T {
    fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        (**self).atomic_mass(symbol)
    }

    fn is_custom(&self, symbol: &str) -> bool {
        (**self).is_custom(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_all_elements() {
        let table = MassTable::standard();
        assert_eq!(table.len(), 118);
        assert_eq!(table.lookup("C"), Some(12.011));
        assert_eq!(table.lookup("Og"), Some(294.0));
        assert_eq!(table.lookup("D"), None);
        assert_eq!(table.lookup("c"), None);
    }

    #[test]
    fn overrides_win_and_do_not_leak() {
        let custom = MassTable::standard()
            .with_mass("D", 2.014)
            .unwrap()
            .with_mass("Ac", 227.5)
            .unwrap();
        assert_eq!(custom.lookup("D"), Some(2.014));
        assert_eq!(custom.lookup("Ac"), Some(227.5));
        assert!(custom.is_custom("Ac"));
        assert!(!custom.is_custom("H"));
        assert_eq!(custom.len(), 119);

        let fresh = MassTable::standard();
        assert_eq!(fresh.lookup("D"), None);
        assert_eq!(fresh.lookup("Ac"), Some(227.0));
    }

    #[test]
    fn rejects_non_positive_or_non_finite_masses() {
        let mut table = MassTable::empty();
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                table.insert("X", mass),
                Err(Error::InvalidMass { .. })
            ));
        }
        assert!(table.is_empty());
    }

    #[test]
    fn extend_from_stops_at_first_invalid_entry() {
        let mut table = MassTable::empty();
        let err = table
            .extend_from([("T", 3.016), ("Bad", -2.0), ("U235", 235.0439)])
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidMass {
                symbol: "Bad".into(),
                mass: -2.0
            }
        );
        assert_eq!(table.lookup("T"), Some(3.016));
        assert_eq!(table.lookup("U235"), None);
    }

    #[test]
    fn hash_map_is_a_mass_source() {
        let map: HashMap<String, f64> = [("X".to_string(), 10.0)].into_iter().collect();
        assert_eq!(map.atomic_mass("X"), Some(10.0));
        assert_eq!(map.atomic_mass("H"), None);
    }
}
