//! REST API handlers

pub mod configs;
pub mod health;
pub mod metrics;
