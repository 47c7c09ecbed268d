//! HTML embedding of chart descriptions.
//!
//! Each mount point gets an HTML fragment that hands the spec to
//! `vegaEmbed`. Charts can be exported as images; the source, compiled
//! and editor actions are switched off.

use super::json::{create_parent_dirs, validate_path, write_chart};
use super::ChartRenderer;
use crate::chart::ChartDescription;
use crate::utils::error::OutputError;
use indexmap::IndexMap;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Action menu entries offered by the embedding library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedActions {
    pub export: bool,
    pub source: bool,
    pub compiled: bool,
    pub editor: bool,
}

/// Options passed to `vegaEmbed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedOptions {
    pub actions: EmbedActions,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            actions: EmbedActions {
                export: true,
                source: false,
                compiled: false,
                editor: false,
            },
        }
    }
}

/// Check that a mount point can be used as an element id and file stem
pub fn validate_mount(mount: &str) -> Result<(), OutputError> {
    let valid = !mount.is_empty()
        && mount
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(OutputError::InvalidMount(mount.to_string()))
    }
}

/// Render the HTML fragment embedding `chart` at `mount`
///
/// **Public** - pure function, used by [`EmbedWriter`] and tests
pub fn embed_fragment(
    mount: &str,
    chart: &ChartDescription,
    options: &EmbedOptions,
) -> Result<String, OutputError> {
    validate_mount(mount)?;
    let spec = serde_json::to_string(chart)?;
    let options = serde_json::to_string(options)?;
    // keep "</script>" inside string literals from closing the tag
    let spec = spec.replace("</", "<\\/");

    Ok(format!(
        "<div id=\"{mount}\" class=\"viz\"></div>\n<script>\nvegaEmbed('#{mount}', {spec}, {options});\n</script>\n"
    ))
}

/// Render a fragment that shows an error message instead of a chart
pub fn error_fragment(mount: &str, message: &str) -> Result<String, OutputError> {
    validate_mount(mount)?;
    Ok(format!(
        "<div id=\"{mount}\" class=\"viz viz-error\">{}</div>\n",
        escape_html(message)
    ))
}

/// Wrap fragments into a standalone page that loads the Vega libraries
pub fn page_html<S: AsRef<str>>(title: &str, fragments: impl IntoIterator<Item = S>) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(fragment.as_ref());
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <script src=\"https://cdn.jsdelivr.net/npm/vega@5\"></script>\n\
         <script src=\"https://cdn.jsdelivr.net/npm/vega-lite@5\"></script>\n\
         <script src=\"https://cdn.jsdelivr.net/npm/vega-embed@6\"></script>\n\
         </head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renderer writing `<mount>.vl.json` and `<mount>.html` into a directory
///
/// **Public** - the renderer used by the `build` command
#[derive(Debug, Clone)]
pub struct EmbedWriter {
    output_dir: PathBuf,
    options: EmbedOptions,
    /// Latest fragment per mount, in first-render order
    fragments: IndexMap<String, String>,
}

impl EmbedWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            options: EmbedOptions::default(),
            fragments: IndexMap::new(),
        }
    }

    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the combined page of everything rendered or failed so far
    pub fn write_page(&self, title: &str) -> Result<PathBuf, OutputError> {
        let path = self.output_dir.join("index.html");
        write_text(&path, &page_html(title, self.fragments.values()))?;
        Ok(path)
    }

    fn fragment_path(&self, mount: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", mount))
    }
}

impl ChartRenderer for EmbedWriter {
    fn render(&mut self, mount: &str, chart: &ChartDescription) -> Result<(), OutputError> {
        let fragment = embed_fragment(mount, chart, &self.options)?;

        write_chart(chart, self.output_dir.join(format!("{}.vl.json", mount)))?;
        write_text(&self.fragment_path(mount), &fragment)?;

        info!("✓ Rendered {} chart at #{}", chart.kind(), mount);
        self.fragments.insert(mount.to_string(), fragment);
        Ok(())
    }

    fn render_error(&mut self, mount: &str, message: &str) -> Result<(), OutputError> {
        let fragment = error_fragment(mount, message)?;
        write_text(&self.fragment_path(mount), &fragment)?;
        self.fragments.insert(mount.to_string(), fragment);
        Ok(())
    }
}

fn write_text(path: &Path, content: &str) -> Result<(), OutputError> {
    validate_path(path)?;
    create_parent_dirs(path)?;
    fs::write(path, content).map_err(OutputError::WriteFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::GroupedSamples;
    use crate::chart::{build_distribution, ChartConfig};

    fn sample_chart() -> ChartDescription {
        let groups: GroupedSamples = vec![("Human", vec![Some(0.5)])].into_iter().collect();
        build_distribution("Free Will: Libertarian", &groups, &ChartConfig::default())
    }

    #[test]
    fn test_default_actions_export_only() {
        let json = serde_json::to_value(EmbedOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"actions": {"export": true, "source": false, "compiled": false, "editor": false}})
        );
    }

    #[test]
    fn test_fragment_contains_mount_and_options() {
        let fragment = embed_fragment("per-question-viz", &sample_chart(), &EmbedOptions::default()).unwrap();

        assert!(fragment.contains("<div id=\"per-question-viz\""));
        assert!(fragment.contains("vegaEmbed('#per-question-viz'"));
        assert!(fragment.contains("\"editor\":false"));
    }

    #[test]
    fn test_invalid_mount_rejected() {
        assert!(validate_mount("").is_err());
        assert!(validate_mount("a b").is_err());
        assert!(validate_mount("x'); alert(1); ('").is_err());
        assert!(validate_mount("domain_viz-2").is_ok());
    }

    #[test]
    fn test_error_fragment_escapes() {
        let fragment = error_fragment("domain-viz", "<oops>").unwrap();
        assert!(fragment.contains("&lt;oops&gt;"));
    }

    #[test]
    fn test_writer_outputs_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut writer = EmbedWriter::new(temp_dir.path());

        writer.render("per-question-viz", &sample_chart()).unwrap();
        writer.render_error("domain-viz", "Failed to load").unwrap();
        let page = writer.write_page("Charts").unwrap();

        assert!(temp_dir.path().join("per-question-viz.vl.json").exists());
        assert!(temp_dir.path().join("per-question-viz.html").exists());
        assert!(temp_dir.path().join("domain-viz.html").exists());
        let html = fs::read_to_string(page).unwrap();
        assert!(html.contains("vega-embed"));
        assert!(html.contains("Failed to load"));
    }

    #[test]
    fn test_rerender_replaces_page_fragment() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut writer = EmbedWriter::new(temp_dir.path());

        writer.render_error("per-question-viz", "Loading").unwrap();
        writer.render("domain-viz", &sample_chart()).unwrap();
        writer.render("per-question-viz", &sample_chart()).unwrap();
        let html = fs::read_to_string(writer.write_page("Charts").unwrap()).unwrap();

        assert_eq!(html.matches("<div id=\"per-question-viz\"").count(), 1);
        assert!(!html.contains("Loading"));
        // the mount keeps its original place on the page
        assert!(html.find("per-question-viz").unwrap() < html.find("domain-viz").unwrap());
    }
}
