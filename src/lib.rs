//! Collateral Insights - campaign engagement reporting service
//!
//! Turns field-rep sharing and doctor viewing events into campaign rollups:
//! unique counts, collateral tier distributions, recruitment tables,
//! per-collateral and per-region detail, and week-over-week trends.
//!
//! # Architecture
//! - `storage`: read-only adapters over the transaction log and roster
//! - `analytics`: the engagement aggregator and its pure helpers
//! - `api`: HTTP services and middleware
//! - `interfaces`: one-shot CLI report commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup
//! - `utils`: CSV rendering

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
