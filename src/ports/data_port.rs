//! Price series source port trait.
//!
//! Implementations must return bars sorted by date ascending with no
//! duplicate dates; the engine assumes this and does not re-check it.

use crate::domain::bar::Bar;
use crate::domain::error::QuickbtError;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, QuickbtError>;

    fn list_symbols(&self) -> Result<Vec<String>, QuickbtError>;

    fn data_range(&self, symbol: &str)
        -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuickbtError>;
}
