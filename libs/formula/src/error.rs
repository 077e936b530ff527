use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("malformed formula at byte {pos}: {reason}")]
    MalformedFormula { pos: usize, reason: MalformedReason },

    #[error("invalid atomic mass {mass} for '{symbol}': must be finite and positive")]
    InvalidMass { symbol: String, mass: f64 },

    #[error("total mass is zero, mass percentages are undefined")]
    ZeroMass,
}

impl Error {
    pub(crate) fn malformed(pos: usize, reason: MalformedReason) -> Self {
        Error::MalformedFormula { pos, reason }
    }

    /// The grammar violation behind a `MalformedFormula` error.
    pub fn reason(&self) -> Option<&MalformedReason> {
        match self {
            Error::MalformedFormula { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("closing delimiter without a matching opening delimiter")]
    UnmatchedClosingDelimiter,

    #[error("opening delimiter is never closed")]
    UnmatchedOpeningDelimiter,

    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("count does not follow an element or group")]
    CountWithoutElement,

    #[error("count exceeds the supported range")]
    CountOverflow,

    #[error("isotope tag must be '{{digits}}' directly after an element symbol")]
    InvalidIsotopeTag,
}
