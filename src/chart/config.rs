//! Chart configuration.
//!
//! Everything a renderer would otherwise pick by default (domains, colors,
//! tie-breaking, clamping) is declared here so repeated renders look the same.

use super::highlight::Highlight;
use crate::utils::config::{
    BASE_COLOR, DEFAULT_HIGHLIGHT, DEFAULT_MODEL_ORDER, DOMAIN_VARIANCE_DOMAIN, HEATMAP_SCHEME,
    HIGHLIGHT_COLOR, MEAN_MARKER_COLOR, PER_QUESTION_VARIANCE_DOMAIN, RESPONSE_DOMAIN,
    VARIANCE_MEASURE, VARIANCE_TOOLTIP_COLUMNS,
};

/// How categories with equal sort keys are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Lexicographic by label
    #[default]
    LabelAscending,
    /// Reverse lexicographic by label
    LabelDescending,
    /// First-seen order in the input
    SourceOrder,
}

/// An extra field shown in a tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipColumn {
    pub field: String,
    pub title: String,
    pub format: Option<String>,
}

impl TooltipColumn {
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Options specific to the per-question distribution chart
#[derive(Debug, Clone)]
pub struct DistributionOptions {
    pub height: u32,
    pub x_title: String,
    pub y_title: String,
    pub y_domain: [f64; 2],
    pub box_size: u32,
    pub mean_color: String,
    pub mean_size: u32,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            height: 400,
            x_title: "Source".to_string(),
            y_title: "Response Score".to_string(),
            y_domain: RESPONSE_DOMAIN,
            box_size: 60,
            mean_color: MEAN_MARKER_COLOR.to_string(),
            mean_size: 150,
        }
    }
}

/// Options specific to the bar comparison chart
#[derive(Debug, Clone)]
pub struct BarOptions {
    pub title: String,
    pub height: u32,
    /// Field holding the row key (the table's first header cell)
    pub row_field: String,
    /// Column plotted as bar height; `None` draws one grouped bar per column
    pub measure: Option<String>,
    pub measure_title: String,
    pub y_title: String,
    pub y_domain: [f64; 2],
    /// Field name of the series in grouped mode
    pub series_field: String,
    /// Field name of the value in grouped mode
    pub value_field: String,
    pub tooltip_columns: Vec<TooltipColumn>,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            title: "Per-Question Variance: Human vs. LLMs".to_string(),
            height: 400,
            row_field: "Model".to_string(),
            measure: Some(VARIANCE_MEASURE.to_string()),
            measure_title: "Variance".to_string(),
            y_title: "Per-Question Variance".to_string(),
            y_domain: PER_QUESTION_VARIANCE_DOMAIN,
            series_field: "Series".to_string(),
            value_field: "Value".to_string(),
            tooltip_columns: VARIANCE_TOOLTIP_COLUMNS
                .iter()
                .map(|(field, title, format)| TooltipColumn::new(*field, *title).with_format(*format))
                .collect(),
        }
    }
}

/// Options specific to the heatmap
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    pub title: String,
    pub height: u32,
    /// Field holding the row key (the table's first header cell)
    pub row_field: String,
    /// Field naming the column series
    pub column_field: String,
    pub value_field: String,
    pub row_title: String,
    pub column_title: String,
    pub color_domain: [f64; 2],
    pub scheme: String,
    pub highlight_stroke_width: f64,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            title: "Variance Across Philosophical Domains".to_string(),
            height: 500,
            row_field: "Domain".to_string(),
            column_field: "Model".to_string(),
            value_field: "Variance".to_string(),
            row_title: "Philosophical Domain".to_string(),
            column_title: "Model".to_string(),
            color_domain: DOMAIN_VARIANCE_DOMAIN,
            scheme: HEATMAP_SCHEME.to_string(),
            highlight_stroke_width: 2.0,
        }
    }
}

/// Configuration shared by all chart builders
///
/// **Public** - passed to every `build_*` function
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Priority order of series labels
    pub order: Vec<String>,
    pub highlight: Highlight,
    pub highlight_color: String,
    pub base_color: String,
    pub label_angle: i32,
    /// Clamp values outside a declared domain to its edge
    pub clamp: bool,
    pub tie_break: TieBreak,
    pub distribution: DistributionOptions,
    pub bar: BarOptions,
    pub heatmap: HeatmapOptions,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_MODEL_ORDER.iter().map(|s| s.to_string()).collect(),
            highlight: Highlight::label(DEFAULT_HIGHLIGHT),
            highlight_color: HIGHLIGHT_COLOR.to_string(),
            base_color: BASE_COLOR.to_string(),
            label_angle: -45,
            clamp: false,
            tie_break: TieBreak::default(),
            distribution: DistributionOptions::default(),
            bar: BarOptions::default(),
            heatmap: HeatmapOptions::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}
