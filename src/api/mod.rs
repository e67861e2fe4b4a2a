//! HTTP surface: report endpoints, health check and middleware

pub mod middleware;
pub mod services;
