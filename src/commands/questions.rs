//! Question listing and single-question rendering.

use super::build::validate_sources;
use super::models::{SourceArgs, StyleArgs};
use crate::chart::ChartDescription;
use crate::controller::{join_location, AnySource, SelectionControl, ViewController};
use crate::output::{write_chart, MemoryRenderer};
use crate::utils::config::QUESTION_MOUNT;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Load the questions dataset and return the selection control state
///
/// **Public** - backs the `questions` command
///
/// A failed load is not an error here: the control's error state is the
/// answer, exactly as a viewer would see it.
pub async fn list_questions(sources: &SourceArgs) -> Result<SelectionControl> {
    validate_sources(sources)?;

    let view = load_view(sources, &StyleArgs::default()).await?;
    Ok(view.selection().clone())
}

/// Build the distribution chart of one question
///
/// **Public** - backs the `question` command
pub async fn render_question(
    sources: &SourceArgs,
    style: &StyleArgs,
    key: &str,
) -> Result<ChartDescription> {
    validate_sources(sources)?;

    let mut view = load_view(sources, style).await?;
    if view.dataset().is_none() {
        anyhow::bail!("Failed to load questions from {}", sources.assets);
    }

    if !view.on_selection_change(key).context("Failed to render question")? {
        anyhow::bail!("Unknown question: {}", key);
    }

    view.renderer()
        .chart(QUESTION_MOUNT)
        .cloned()
        .context("No chart was rendered")
}

/// Print a chart as JSON, or write it when `output` is given
pub fn emit_chart(chart: &ChartDescription, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_chart(chart, path).context("Failed to write chart JSON")?;
            info!("✓ Chart written to: {}", path.display());
        }
        None => println!("{}", chart.to_json_pretty()?),
    }
    Ok(())
}

async fn load_view(
    sources: &SourceArgs,
    style: &StyleArgs,
) -> Result<ViewController<AnySource, MemoryRenderer>> {
    let location = join_location(&sources.assets, &sources.questions_file);
    let source = AnySource::for_location(&location, sources.timeout, sources.cache_bust)
        .context("Failed to create data source")?;

    let mut view = ViewController::new(source, MemoryRenderer::new(), QUESTION_MOUNT)
        .with_config(style.chart_config());

    // the selection control records the failure
    let _ = view.load(&location).await;
    Ok(view)
}
