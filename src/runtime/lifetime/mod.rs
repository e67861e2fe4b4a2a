//! Startup and shutdown sequencing

pub mod shutdown;
pub mod startup;
