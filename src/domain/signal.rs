//! Trade signals.

use chrono::NaiveDate;
use std::fmt;

/// Per-bar trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
        }
    }
}

/// One point of a signal series. A signal series has the same length and
/// date alignment as the bar series it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Signal,
}
