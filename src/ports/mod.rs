//! Port traits for external collaborators.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
