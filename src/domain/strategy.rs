//! Strategy configuration and signal generation.
//!
//! Strategies are a closed set of tagged variants; `generate` dispatches with
//! an exhaustive match. Unrecognized strategy names are rejected where config
//! strings are parsed (see `cli::build_strategy_config`), before a
//! `StrategyConfig` can exist.

use crate::domain::bar::Bar;
use crate::domain::error::QuickbtError;
use crate::domain::indicator::{calc_sma, calc_stop_levels, IndicatorSeries};
use crate::domain::signal::{Signal, SignalPoint};

pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 20;
pub const DEFAULT_STOP_LOSS_FRACTION: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrategyConfig {
    MaCrossover {
        short_window: usize,
        long_window: usize,
    },
    StopLoss {
        fraction: f64,
    },
}

impl StrategyConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::MaCrossover { .. } => "moving_average_crossover",
            StrategyConfig::StopLoss { .. } => "stop_loss",
        }
    }

    /// Check parameter invariants. Out-of-range values are rejected, never
    /// clamped.
    pub fn validate(&self) -> Result<(), QuickbtError> {
        match *self {
            StrategyConfig::MaCrossover {
                short_window,
                long_window,
            } => {
                if short_window == 0 || long_window == 0 {
                    return Err(QuickbtError::InvalidConfig {
                        reason: "window lengths must be positive".into(),
                    });
                }
                if short_window >= long_window {
                    return Err(QuickbtError::InvalidConfig {
                        reason: format!(
                            "short_window ({}) must be less than long_window ({})",
                            short_window, long_window
                        ),
                    });
                }
                Ok(())
            }
            StrategyConfig::StopLoss { fraction } => {
                if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
                    return Err(QuickbtError::InvalidConfig {
                        reason: format!(
                            "stop_loss fraction ({}) must be between 0 and 1 exclusive",
                            fraction
                        ),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Signals plus the derived series reporters plot alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutput {
    pub signals: Vec<SignalPoint>,
    pub indicators: Vec<IndicatorSeries>,
}

/// Derive a signal series from a bar series.
///
/// The signal at index i depends only on bars at indices <= i; mutating later
/// bars never changes it.
pub fn generate(bars: &[Bar], config: &StrategyConfig) -> Result<StrategyOutput, QuickbtError> {
    if bars.is_empty() {
        return Err(QuickbtError::InvalidInput {
            reason: "empty price series".into(),
        });
    }
    if let Some(bad) = bars.iter().find(|b| !b.has_valid_close()) {
        return Err(QuickbtError::InvalidInput {
            reason: format!("bar at {} has no usable close price", bad.date),
        });
    }
    config.validate()?;

    match *config {
        StrategyConfig::MaCrossover {
            short_window,
            long_window,
        } => {
            let short_ma = calc_sma(bars, short_window);
            let long_ma = calc_sma(bars, long_window);

            let signals = bars
                .iter()
                .enumerate()
                .map(|(i, bar)| {
                    let short = &short_ma.values[i];
                    let long = &long_ma.values[i];
                    let signal = if !short.valid || !long.valid {
                        Signal::Hold
                    } else if short.value > long.value {
                        Signal::Buy
                    } else if short.value < long.value {
                        Signal::Sell
                    } else {
                        Signal::Hold
                    };
                    SignalPoint {
                        date: bar.date,
                        signal,
                    }
                })
                .collect();

            Ok(StrategyOutput {
                signals,
                indicators: vec![short_ma, long_ma],
            })
        }
        StrategyConfig::StopLoss { fraction } => {
            // Computes stop levels but never trades: every bar is Hold, so
            // backtesting this strategy alone yields zero trades.
            let stops = calc_stop_levels(bars, fraction);
            let signals = bars
                .iter()
                .map(|bar| SignalPoint {
                    date: bar.date,
                    signal: Signal::Hold,
                })
                .collect();

            Ok(StrategyOutput {
                signals,
                indicators: vec![stops],
            })
        }
    }
}
