//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod export;
mod migrate;
mod summary;

pub use config_gen::config_generate;
pub use export::export_report;
pub use migrate::run_migrations;
pub use summary::print_summary;
