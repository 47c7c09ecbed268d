//! Heterogeneity Charts
//!
//! Declarative Vega-Lite chart generation for the
//! "Collapse of Heterogeneity in Silicon Philosophers" study.
//!
//! The pipeline: data source → wide-to-long reshaping and per-group
//! statistics → chart description → renderer.
//!
//! ## Getting Started
//!
//! ```bash
//! hetviz build --assets assets --output charts --page
//! hetviz questions --assets assets
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod controller;
pub mod output;
pub mod parser;
pub mod utils;
