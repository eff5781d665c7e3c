//! Core domain types and logic.

pub mod sample;
pub mod series;
pub mod aggregate;
pub mod regression;
pub mod chain;
pub mod analysis;
pub mod view;
pub mod config_validation;
pub mod error;
