//! climtrend: yearly temperature trends and pollutant regressions.
//!
//! Hexagonal architecture: the statistics core and analysis pipeline in
//! [`domain`], port traits in [`ports`], file-backed implementations in
//! [`adapters`], and the command-line entry point in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
