//! Configuration validation.
//!
//! Validates the `[data]` and `[strategy]` sections before the pipeline runs.

use crate::domain::error::QuickbtError;
use crate::domain::strategy::{
    DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW, DEFAULT_STOP_LOSS_FRACTION,
};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const KNOWN_STRATEGIES: [&str; 2] = ["moving_average_crossover", "stop_loss"];

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    validate_csv_dir(config)?;
    validate_symbol(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    let name = config.get_string("strategy", "name").ok_or_else(|| {
        QuickbtError::ConfigMissing {
            section: "strategy".to_string(),
            key: "name".to_string(),
        }
    })?;

    match name.as_str() {
        "moving_average_crossover" => validate_windows(config),
        "stop_loss" => validate_stop_loss(config),
        _ => Err(QuickbtError::UnknownStrategy { name }),
    }
}

fn validate_csv_dir(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    match config.get_string("data", "csv_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuickbtError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        }),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    match config.get_string("data", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuickbtError::ConfigMissing {
            section: "data".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(QuickbtError::ConfigInvalid {
                section: "data".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must be before end_date".to_string(),
            });
        }
    }
    Ok(())
}

/// Parse an optional `[data]` date key. Shared with the CLI pipeline.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, QuickbtError> {
    match config.get_string("data", key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| QuickbtError::ConfigInvalid {
                section: "data".to_string(),
                key: key.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", key),
            }),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    let short = config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64);
    let long = config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64);

    if short <= 0 || long <= 0 {
        return Err(QuickbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "window lengths must be positive".to_string(),
        });
    }
    if short >= long {
        return Err(QuickbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be less than long_window".to_string(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), QuickbtError> {
    let fraction = config.get_double("strategy", "stop_loss", DEFAULT_STOP_LOSS_FRACTION);
    if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
        return Err(QuickbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stop_loss".to_string(),
            reason: "stop_loss must be between 0 and 1 exclusive".to_string(),
        });
    }
    Ok(())
}
