//! Plain-text report adapter implementing ReportPort.
//!
//! Writes a summary of the run plus the per-trade ledger and the derived
//! signal/indicator series, one line per bar.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::strategy::StrategyConfig;
use crate::domain::error::QuickbtError;
use crate::ports::report_port::{ReportPort, RunSummary};

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn render(summary: &RunSummary<'_>) -> String {
        let mut out = String::new();
        let result = summary.result;

        let _ = writeln!(out, "quickbt backtest report");
        let _ = writeln!(out, "=======================");
        let _ = writeln!(out, "symbol:    {}", summary.symbol);
        let _ = writeln!(out, "strategy:  {}", describe(summary.strategy));
        let _ = writeln!(out);
        let _ = writeln!(out, "total profit:    {:.4}", result.total_profit);
        let _ = writeln!(out, "trades:          {}", result.trades);
        let _ = writeln!(out, "winning trades:  {}", result.winning_trades);
        let _ = writeln!(out, "losing trades:   {}", result.losing_trades);
        let _ = writeln!(out, "breakeven:       {}", result.breakeven_trades);

        if !result.closed_trades.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "closed trades:");
            for trade in &result.closed_trades {
                let _ = writeln!(
                    out,
                    "  {} -> {}  entry {:.4}  exit {:.4}  pnl {:+.4}",
                    trade.entry_date, trade.exit_date, trade.entry_price, trade.exit_price,
                    trade.pnl
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "signals:");
        for point in &summary.output.signals {
            let _ = writeln!(out, "  {}  {}", point.date, point.signal);
        }

        for series in &summary.output.indicators {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}:", series.kind);
            for point in &series.values {
                if point.valid {
                    let _ = writeln!(out, "  {}  {:.4}", point.date, point.value);
                } else {
                    let _ = writeln!(out, "  {}  -", point.date);
                }
            }
        }

        out
    }
}

fn describe(strategy: &StrategyConfig) -> String {
    match *strategy {
        StrategyConfig::MaCrossover {
            short_window,
            long_window,
        } => format!(
            "{} (short={}, long={})",
            strategy.name(),
            short_window,
            long_window
        ),
        StrategyConfig::StopLoss { fraction } => {
            format!("{} (fraction={})", strategy.name(), fraction)
        }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, summary: &RunSummary<'_>, output_path: &Path) -> Result<(), QuickbtError> {
        fs::write(output_path, Self::render(summary))?;
        Ok(())
    }
}
