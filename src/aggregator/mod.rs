//! Aggregation of raw samples into per-group statistics.
//!
//! This module turns response samples into:
//! - Population mean, variance and standard deviation per group
//! - A display order driven by an explicit priority list

pub mod groups;
pub mod stats;

// Re-export main types and functions
pub use groups::{aggregate_groups, display_order, GroupStatistic, GroupedSamples};
pub use stats::{aggregate, valid_sample, Statistic};
