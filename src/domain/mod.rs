//! Core engine types and logic.

pub mod bar;
pub mod signal;
pub mod indicator;
pub mod strategy;
pub mod backtest;
pub mod config_validation;
pub mod error;
