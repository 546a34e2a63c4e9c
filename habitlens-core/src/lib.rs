//! # habitlens-core
//!
//! Core library for habitlens - a report generator for personal daily-habit logs.
//!
//! This library provides:
//! - Domain types for habit records and datasets
//! - CSV ingestion with per-cell parsing and derived features
//! - Aggregate statistics, rule-based advice and mood insights
//! - Plain-text report rendering
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Pipeline
//!
//! Data flows through three stages:
//! - **Ingest:** CSV bytes become a [`Dataset`] of typed, optional fields
//!   plus derived wake-up hour, weekday and liters of water
//! - **Analyze:** means, Pearson correlations and weekday groupings, then
//!   threshold rules and correlation notes on top of them
//! - **Report:** the analysis rendered as text (or JSON)
//!
//! ## Example
//!
//! ```rust,no_run
//! use habitlens_core::{analytics, ingest, report, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let dataset = ingest::load_path("habits.csv".as_ref()).expect("failed to load log");
//!
//! let analysis = analytics::analyze(&dataset, &config.rules);
//! println!("{}", report::render(&analysis));
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use session::AnalysisSession;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod report;
pub mod sample;
pub mod session;
pub mod types;
