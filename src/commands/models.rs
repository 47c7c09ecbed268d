use crate::chart::{ChartConfig, Highlight};
use crate::utils::config::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_HIGHLIGHT, DOMAIN_FILE, QUESTIONS_FILE, VARIANCE_FILE,
};
use std::path::PathBuf;
use std::time::Duration;

/// Where the three data files live and how to fetch them
///
/// **Public** - shared by every command that loads data
#[derive(Debug, Clone)]
pub struct SourceArgs {
    /// Directory or URL prefix holding the data files
    pub assets: String,

    /// Questions JSON file name
    pub questions_file: String,

    /// Per-question variance CSV file name
    pub variance_file: String,

    /// Domain heterogeneity CSV file name
    pub domain_file: String,

    /// Fetch timeout
    pub timeout: Duration,

    /// Add a timestamp parameter to HTTP requests
    pub cache_bust: bool,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            assets: "assets".to_string(),
            questions_file: QUESTIONS_FILE.to_string(),
            variance_file: VARIANCE_FILE.to_string(),
            domain_file: DOMAIN_FILE.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            cache_bust: true,
        }
    }
}

/// Chart appearance options exposed on the command line
#[derive(Debug, Clone)]
pub struct StyleArgs {
    /// Source display order; empty keeps the default order
    pub order: Vec<String>,

    /// Labels drawn in the highlight color
    pub highlight: Vec<String>,

    /// Clamp values outside the fixed domains
    pub clamp: bool,
}

impl Default for StyleArgs {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            highlight: vec![DEFAULT_HIGHLIGHT.to_string()],
            clamp: false,
        }
    }
}

impl StyleArgs {
    /// Chart configuration with these options applied
    pub fn chart_config(&self) -> ChartConfig {
        let mut config = ChartConfig::new()
            .with_highlight(Highlight::labels(self.highlight.iter().cloned()))
            .with_clamp(self.clamp);
        if !self.order.is_empty() {
            config = config.with_order(self.order.iter().cloned());
        }
        config
    }
}

/// Arguments for the build command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub sources: SourceArgs,
    pub style: StyleArgs,

    /// Directory receiving specs and HTML fragments
    pub output_dir: PathBuf,

    /// Question shown initially (defaults to the first one)
    pub question: Option<String>,

    /// Also write a standalone index.html
    pub page: bool,

    /// Title of the standalone page
    pub page_title: String,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            sources: SourceArgs::default(),
            style: StyleArgs::default(),
            output_dir: PathBuf::from("charts"),
            question: None,
            page: false,
            page_title: "The Collapse of Heterogeneity in Silicon Philosophers".to_string(),
        }
    }
}

/// Outcome of a build, one entry per visualization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Mount points that received a chart
    pub rendered: Vec<String>,

    /// Mount points that show an error instead, with the reason
    pub failed: Vec<(String, String)>,

    /// Entries of the question selection control
    pub questions: Vec<String>,

    /// Standalone page, when requested
    pub page: Option<PathBuf>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
