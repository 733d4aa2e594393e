//! Core domain types and logic.

pub mod series;
pub mod returns;
pub mod strategy;
pub mod metrics;
pub mod universe;
pub mod backtest;
pub mod config_validation;
pub mod error;
