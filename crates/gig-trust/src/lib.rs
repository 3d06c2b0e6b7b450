//! Registration and explainable Digital Trust Scores for gig and informal workers.

pub mod config;
pub mod error;
pub mod import;
pub mod telemetry;
pub mod workers;
