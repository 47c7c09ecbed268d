//! Configuration and constants for the library and CLI.

use std::time::Duration;

/// Default timeout for data source fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Vega-Lite schema every chart description declares
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Canonical display order of compared sources
pub const DEFAULT_MODEL_ORDER: &[&str] = &[
    "Human",
    "Claude Sonnet 4.5",
    "GPT-4o",
    "GPT-5.1",
    "Llama 3.1 8B",
    "Llama 3.1 8B (FT)",
    "Mistral 7B",
    "Qwen 3 4B",
];

/// Baseline source drawn in the highlight color
pub const DEFAULT_HIGHLIGHT: &str = "Human";

// Colors
pub const HIGHLIGHT_COLOR: &str = "#dc2626";
pub const BASE_COLOR: &str = "#2563eb";
pub const MEAN_MARKER_COLOR: &str = "gold";

// Fixed numeric domains so repeated renders stay comparable
pub const RESPONSE_DOMAIN: [f64; 2] = [0.0, 1.0];
pub const PER_QUESTION_VARIANCE_DOMAIN: [f64; 2] = [0.0, 0.07];
pub const DOMAIN_VARIANCE_DOMAIN: [f64; 2] = [0.0, 0.1];

/// Color scheme for the heatmap
pub const HEATMAP_SCHEME: &str = "viridis";

// Default input files (relative to the assets location)
pub const QUESTIONS_FILE: &str = "questions_data.json";
pub const VARIANCE_FILE: &str = "figure1_stats_bc.csv";
pub const DOMAIN_FILE: &str = "domain_heterogeneity_comparison.csv";

// Mount points of the three visualizations
pub const QUESTION_MOUNT: &str = "per-question-viz";
pub const VARIANCE_MOUNT: &str = "variance-viz";
pub const DOMAIN_MOUNT: &str = "domain-viz";

/// Column plotted by the bar comparison
pub const VARIANCE_MEASURE: &str = "Per-Q Var";

/// Extra bar comparison columns shown only in tooltips
pub const VARIANCE_TOOLTIP_COLUMNS: &[(&str, &str, &str)] = &[("Var Ratio", "Ratio to Human", ".2f")];

/// Text shown in the selection control when loading fails
pub const LOAD_ERROR_LABEL: &str = "Error loading questions";
