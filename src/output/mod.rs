//! Rendering collaborators and output writers.
//!
//! This module handles handing finished charts to whatever displays them:
//! - JSON specs on disk
//! - HTML fragments that embed the spec with `vegaEmbed`
//! - An in-memory renderer for callers that display charts themselves

pub mod embed;
pub mod json;

use crate::chart::ChartDescription;
use crate::utils::error::OutputError;
use std::collections::HashMap;

// Re-export main functions
pub use embed::{embed_fragment, error_fragment, page_html, EmbedActions, EmbedOptions, EmbedWriter};
pub use json::{read_chart, validate_path, write_chart};

/// Something that displays a chart at a named mount point
///
/// **Public** - the seam between chart building and display
///
/// Rendering replaces whatever was shown at `mount` before.
pub trait ChartRenderer {
    fn render(&mut self, mount: &str, chart: &ChartDescription) -> Result<(), OutputError>;

    /// Show a textual error instead of a chart
    fn render_error(&mut self, mount: &str, message: &str) -> Result<(), OutputError>;
}

/// What a mount point currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum Mounted {
    Chart(ChartDescription),
    Error(String),
}

/// Renderer keeping the latest content of each mount point in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    mounted: HashMap<String, Mounted>,
    renders: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mount: &str) -> Option<&Mounted> {
        self.mounted.get(mount)
    }

    /// Chart currently shown at `mount`, if any
    pub fn chart(&self, mount: &str) -> Option<&ChartDescription> {
        match self.mounted.get(mount) {
            Some(Mounted::Chart(chart)) => Some(chart),
            _ => None,
        }
    }

    /// Number of render calls so far, errors included
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl ChartRenderer for MemoryRenderer {
    fn render(&mut self, mount: &str, chart: &ChartDescription) -> Result<(), OutputError> {
        embed::validate_mount(mount)?;
        self.mounted.insert(mount.to_string(), Mounted::Chart(chart.clone()));
        self.renders += 1;
        Ok(())
    }

    fn render_error(&mut self, mount: &str, message: &str) -> Result<(), OutputError> {
        embed::validate_mount(mount)?;
        self.mounted.insert(mount.to_string(), Mounted::Error(message.to_string()));
        self.renders += 1;
        Ok(())
    }
}
