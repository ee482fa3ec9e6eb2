//! BTC/USD quote as seen by the purchase flow.

use rust_decimal::Decimal;
use std::fmt;

/// Value stored and sent on the wire when no live quote could be obtained.
pub const UNAVAILABLE_RATE: Decimal = Decimal::NEGATIVE_ONE;

/// Outcome of a rate lookup that did not fail hard.
///
/// Transient upstream problems (network, bad status, unknown schema) collapse
/// into [`RateQuote::Unavailable`] so pricing always has a value to work with.
/// Persistence and the HTTP layer see it as the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateQuote {
    Live(Decimal),
    Unavailable,
}

impl RateQuote {
    /// Returns the decimal representation, `-1` for an unavailable quote.
    pub fn as_decimal(&self) -> Decimal {
        match self {
            RateQuote::Live(v) => *v,
            RateQuote::Unavailable => UNAVAILABLE_RATE,
        }
    }

    /// Interprets a stored decimal. The sentinel maps back to `Unavailable`.
    pub fn from_decimal(value: Decimal) -> Self {
        if value == UNAVAILABLE_RATE {
            RateQuote::Unavailable
        } else {
            RateQuote::Live(value)
        }
    }

    /// Returns the live value, if any.
    pub fn live(&self) -> Option<Decimal> {
        match self {
            RateQuote::Live(v) => Some(*v),
            RateQuote::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RateQuote::Live(_))
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateQuote::Live(v) => write!(f, "{}", v),
            RateQuote::Unavailable => f.write_str("unavailable"),
        }
    }
}
