//! CSV file data adapter.
//!
//! One file per symbol (`<SYMBOL>.csv`) with header
//! `date,open,high,low,close,volume`. Rows are sorted ascending by date on
//! load; duplicate dates are rejected.

use crate::domain::bar::Bar;
use crate::domain::error::QuickbtError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<Bar>, QuickbtError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| QuickbtError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuickbtError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuickbtError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuickbtError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(Bar {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: record
                    .get(5)
                    .ok_or_else(|| QuickbtError::Data {
                        reason: "missing volume column".into(),
                    })?
                    .parse()
                    .map_err(|e| QuickbtError::Data {
                        reason: format!("invalid volume value: {}", e),
                    })?,
            });
        }

        bars.sort_by_key(|b| b.date);

        if let Some(dup) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(QuickbtError::Data {
                reason: format!("duplicate date {} in {}", dup[0].date, path.display()),
            });
        }

        Ok(bars)
    }
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, QuickbtError> {
    record
        .get(index)
        .ok_or_else(|| QuickbtError::Data {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| QuickbtError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, QuickbtError> {
        let bars = self.read_all(symbol)?;
        Ok(bars
            .into_iter()
            .filter(|b| start_date.is_none_or(|s| b.date >= s))
            .filter(|b| end_date.is_none_or(|e| b.date <= e))
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuickbtError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuickbtError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| QuickbtError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuickbtError> {
        let bars = self.read_all(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
