//! Chemical formula parsing and molecular properties.
//!
//! ```text
//! formula string --parse--> ElementCount --(MassTable)--> molar mass, percentages,
//!                                                        unsaturation, class
//! ```
//!
//! The parser is a pure function of its input. Atomic masses are always passed
//! in as a value implementing [`AtomicMasses`], usually a [`MassTable`].

#![forbid(unsafe_code)]

pub mod analysis;
mod counts;
mod error;
mod masses;
mod parser;
pub mod properties;

pub use analysis::{analyze, analyze_batch, Analysis, BatchItem, BatchSummary};
pub use counts::{CountOverflow, ElementCount};
pub use error::{Error, MalformedReason, Result};
pub use masses::{AtomicMasses, MassTable};
pub use parser::{parse, validate};
pub use properties::{
    classify, custom_symbols, degree_of_unsaturation, format_percentage, mass_percentages,
    molar_mass, unknown_symbols, CompoundClass, Unsaturation,
};
