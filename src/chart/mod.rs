//! Declarative chart descriptions built from normalized records.
//!
//! The renderer is an external collaborator: it only ever receives a
//! finished [`ChartDescription`] (a Vega-Lite document).

pub mod builder;
pub mod config;
pub mod description;
pub mod highlight;
pub mod ordering;

// Re-export main types
pub use builder::{build_bar_comparison, build_distribution, build_heatmap};
pub use config::{BarOptions, ChartConfig, DistributionOptions, HeatmapOptions, TieBreak, TooltipColumn};
pub use description::{ChartDescription, ChartKind};
pub use highlight::Highlight;
pub use ordering::rows_by_ascending_mean;
