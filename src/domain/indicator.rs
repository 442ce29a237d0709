//! Derived per-bar series: trailing simple moving averages and stop levels.
//!
//! SMA is an O(n) sliding-window implementation. Warmup: the first
//! (period - 1) points are invalid.

use crate::domain::bar::Bar;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    StopLevel,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(period) => write!(f, "SMA({})", period),
            IndicatorKind::StopLevel => write!(f, "STOP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<IndicatorPoint>,
}

/// Trailing simple mean of close over the most recent `period` bars.
pub fn calc_sma(bars: &[Bar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind: IndicatorKind::Sma(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut window_sum: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.close;
        if i >= period {
            window_sum -= bars[i - period].close;
        }

        let valid = i >= period - 1;
        let sma = if valid { window_sum / period as f64 } else { 0.0 };

        values.push(IndicatorPoint {
            date: bar.date,
            valid,
            value: sma,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Sma(period),
        values,
    }
}

/// Per-bar stop level: close * (1 - fraction). Valid at every bar.
pub fn calc_stop_levels(bars: &[Bar], fraction: f64) -> IndicatorSeries {
    let values = bars
        .iter()
        .map(|bar| IndicatorPoint {
            date: bar.date,
            valid: true,
            value: bar.close * (1.0 - fraction),
        })
        .collect();

    IndicatorSeries {
        kind: IndicatorKind::StopLevel,
        values,
    }
}
