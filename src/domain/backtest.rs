//! Single-position simulation over a signal series.

use crate::domain::bar::Bar;
use crate::domain::error::QuickbtError;
use crate::domain::signal::{Signal, SignalPoint};
use chrono::NaiveDate;

/// Simulation state. Exists only for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Flat,
    Open {
        entry_price: f64,
        entry_date: NaiveDate,
    },
}

/// One completed Buy -> Sell round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Aggregate outcome of a simulation run. Immutable once built.
///
/// Zero-pnl closes are breakeven: neither winning nor losing.
/// `winning_trades + losing_trades + breakeven_trades == trades` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub total_profit: f64,
    pub trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub closed_trades: Vec<ClosedTrade>,
}

/// Run the single-position state machine over aligned bars and signals.
///
/// Processing starts at index 1; a Buy at the first bar never opens a
/// position. A position still open after the last bar is not closed out and
/// contributes nothing to realized profit.
pub fn run_backtest(bars: &[Bar], signals: &[SignalPoint]) -> Result<BacktestResult, QuickbtError> {
    if signals.is_empty() && !bars.is_empty() {
        return Err(QuickbtError::MissingSignals);
    }
    if bars.len() != signals.len() {
        return Err(QuickbtError::MisalignedInput {
            bars: bars.len(),
            signals: signals.len(),
        });
    }

    let mut position = Position::Flat;
    let mut closed_trades: Vec<ClosedTrade> = Vec::new();

    for i in 1..bars.len() {
        match (position, signals[i].signal) {
            (Position::Flat, Signal::Buy) => {
                position = Position::Open {
                    entry_price: bars[i].close,
                    entry_date: bars[i].date,
                };
            }
            (
                Position::Open {
                    entry_price,
                    entry_date,
                },
                Signal::Sell,
            ) => {
                let exit_price = bars[i].close;
                closed_trades.push(ClosedTrade {
                    entry_date,
                    exit_date: bars[i].date,
                    entry_price,
                    exit_price,
                    pnl: exit_price - entry_price,
                });
                position = Position::Flat;
            }
            // Hold, Buy-while-Open and Sell-while-Flat leave the state as is.
            _ => {}
        }
    }

    let total_profit = closed_trades.iter().map(|t| t.pnl).sum();
    let winning_trades = closed_trades.iter().filter(|t| t.pnl > 0.0).count();
    let losing_trades = closed_trades.iter().filter(|t| t.pnl < 0.0).count();
    let trades = closed_trades.len();

    Ok(BacktestResult {
        total_profit,
        trades,
        winning_trades,
        losing_trades,
        breakeven_trades: trades - winning_trades - losing_trades,
        closed_trades,
    })
}
