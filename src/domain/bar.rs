//! Price bar representation.

use chrono::NaiveDate;

/// One sample of a price series. The engine only reads `close`; the other
/// OHLCV fields are carried for loaders and reporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// A close price the engine can work with: finite and strictly positive.
    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn valid_close() {
        assert!(sample_bar().has_valid_close());
    }

    #[test]
    fn zero_close_is_invalid() {
        let bar = Bar {
            close: 0.0,
            ..sample_bar()
        };
        assert!(!bar.has_valid_close());
    }

    #[test]
    fn negative_close_is_invalid() {
        let bar = Bar {
            close: -5.0,
            ..sample_bar()
        };
        assert!(!bar.has_valid_close());
    }

    #[test]
    fn nan_close_is_invalid() {
        let bar = Bar {
            close: f64::NAN,
            ..sample_bar()
        };
        assert!(!bar.has_valid_close());
    }

    #[test]
    fn infinite_close_is_invalid() {
        let bar = Bar {
            close: f64::INFINITY,
            ..sample_bar()
        };
        assert!(!bar.has_valid_close());
    }
}
