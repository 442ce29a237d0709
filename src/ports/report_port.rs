//! Result reporting port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::QuickbtError;
use crate::domain::strategy::{StrategyConfig, StrategyOutput};
use std::path::Path;

/// Everything a reporter needs: the aggregate result plus the per-bar
/// signal and indicator series for visualization. All borrowed, read-only.
pub struct RunSummary<'a> {
    pub symbol: &'a str,
    pub strategy: &'a StrategyConfig,
    pub result: &'a BacktestResult,
    pub output: &'a StrategyOutput,
}

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(&self, summary: &RunSummary<'_>, output_path: &Path) -> Result<(), QuickbtError>;
}
