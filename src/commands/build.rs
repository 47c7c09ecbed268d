//! Build command implementation.
//!
//! The build command renders every visualization of the page:
//! 1. Loads the questions dataset and renders the selected question
//! 2. Builds the per-question variance bar comparison
//! 3. Builds the domain heterogeneity heatmap
//! 4. Writes the standalone page (if requested)
//!
//! A failing visualization is replaced by an error fragment; the others
//! still render.

use super::models::{BuildArgs, BuildReport, SourceArgs};
use crate::chart::{build_bar_comparison, build_heatmap, ChartConfig, ChartDescription};
use crate::controller::{fetch_table, join_location, AnySource, ViewController};
use crate::output::{ChartRenderer, EmbedWriter};
use crate::parser::LongRecord;
use crate::utils::config::{DOMAIN_MOUNT, LOAD_ERROR_LABEL, QUESTION_MOUNT, VARIANCE_MOUNT};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::time::Instant;

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// A report of rendered and failed visualizations. Data problems only
/// show up in the report; `Err` is reserved for arguments and output
/// that cannot be written at all.
pub async fn execute_build(args: BuildArgs) -> Result<BuildReport> {
    let start_time = Instant::now();
    validate_args(&args)?;

    info!("Building charts from {} into {}", args.sources.assets, args.output_dir.display());

    let config = args.style.chart_config();
    let mut report = BuildReport::default();

    // Step 1: Per-question distribution
    info!("Step 1/4: Loading questions...");
    let questions_location = join_location(&args.sources.assets, &args.sources.questions_file);
    let source = source_for(&args.sources, &questions_location)?;

    let mut view = ViewController::new(source, EmbedWriter::new(&args.output_dir), QUESTION_MOUNT)
        .with_config(config.clone());

    match view.load(&questions_location).await {
        Ok(dataset) => {
            debug!("Questions dataset has {} entries", dataset.len());
            if let Some(key) = &args.question {
                let shown = view
                    .on_selection_change(key)
                    .with_context(|| format!("Failed to render question {}", key))?;
                if !shown {
                    anyhow::bail!("Unknown question: {}", key);
                }
            }
            report.rendered.push(QUESTION_MOUNT.to_string());
        }
        Err(e) => {
            error!("Error loading questions data: {}", e);
            report.failed.push((QUESTION_MOUNT.to_string(), e.to_string()));
        }
    }
    report.questions = view.selection().labels().into_iter().map(str::to_string).collect();

    let mut writer = view.into_renderer();
    if report.rendered.is_empty() {
        writer
            .render_error(QUESTION_MOUNT, LOAD_ERROR_LABEL)
            .context("Failed to write question error fragment")?;
    }

    // Step 2: Bar comparison
    info!("Step 2/4: Building per-question variance comparison...");
    let variance_location = join_location(&args.sources.assets, &args.sources.variance_file);
    let variance = table_chart(&args.sources, &variance_location, &config, |records, row_field, config| {
        let mut config = config.clone();
        config.bar.row_field = row_field.to_string();
        build_bar_comparison(records, &config)
    })
    .await;
    place(&mut writer, &mut report, VARIANCE_MOUNT, variance)?;

    // Step 3: Heatmap
    info!("Step 3/4: Building domain heatmap...");
    let domain_location = join_location(&args.sources.assets, &args.sources.domain_file);
    let heatmap = table_chart(&args.sources, &domain_location, &config, |records, row_field, config| {
        let mut config = config.clone();
        config.heatmap.row_field = row_field.to_string();
        build_heatmap(records, &config)
    })
    .await;
    place(&mut writer, &mut report, DOMAIN_MOUNT, heatmap)?;

    // Step 4: Page
    if args.page {
        info!("Step 4/4: Writing standalone page...");
        let page = writer
            .write_page(&args.page_title)
            .context("Failed to write index.html")?;
        info!("✓ Page written to: {}", page.display());
        report.page = Some(page);
    } else {
        info!("Step 4/4: Skipping standalone page (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!(
        "Build completed in {:.2}s ({} rendered, {} failed)",
        elapsed.as_secs_f64(),
        report.rendered.len(),
        report.failed.len()
    );

    Ok(report)
}

/// Load a wide table and build one chart from its long records
///
/// **Private** - data errors are returned, not raised
async fn table_chart<F>(
    sources: &SourceArgs,
    location: &str,
    config: &ChartConfig,
    build: F,
) -> std::result::Result<ChartDescription, String>
where
    F: FnOnce(&[LongRecord], &str, &ChartConfig) -> ChartDescription,
{
    let source = source_for(sources, location).map_err(|e| e.to_string())?;
    let table = fetch_table(&source, location, b',')
        .await
        .map_err(|e| format!("Failed to load {}: {}", location, e))?;
    let records = table
        .to_long()
        .map_err(|e| format!("Failed to parse {}: {}", location, e))?;

    debug!("{}: {} records", location, records.len());
    Ok(build(&records, table.row_key_name(), config))
}

/// Render a chart, or an error fragment when it could not be built
fn place(
    writer: &mut EmbedWriter,
    report: &mut BuildReport,
    mount: &str,
    chart: std::result::Result<ChartDescription, String>,
) -> Result<()> {
    match chart {
        Ok(chart) => {
            writer
                .render(mount, &chart)
                .with_context(|| format!("Failed to write chart {}", mount))?;
            report.rendered.push(mount.to_string());
        }
        Err(message) => {
            error!("{}", message);
            writer
                .render_error(mount, &message)
                .with_context(|| format!("Failed to write error fragment {}", mount))?;
            report.failed.push((mount.to_string(), message));
        }
    }
    Ok(())
}

fn source_for(sources: &SourceArgs, location: &str) -> Result<AnySource> {
    AnySource::for_location(location, sources.timeout, sources.cache_bust)
        .context("Failed to create data source")
}

/// Validate build arguments
///
/// **Public** - can be called before execute_build for early validation
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    validate_sources(&args.sources)?;

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.output_dir.is_file() {
        anyhow::bail!("Output directory is a file: {}", args.output_dir.display());
    }

    if let Some(question) = &args.question {
        if question.trim().is_empty() {
            anyhow::bail!("Question key cannot be empty");
        }
    }

    if args.style.highlight.iter().any(|label| label.is_empty()) {
        anyhow::bail!("Highlight labels cannot be empty");
    }

    Ok(())
}

/// Validate data source arguments
///
/// **Public** - shared with the question commands
pub fn validate_sources(sources: &SourceArgs) -> Result<()> {
    if sources.timeout.is_zero() {
        anyhow::bail!("Timeout must be greater than 0");
    }

    for file in [&sources.questions_file, &sources.variance_file, &sources.domain_file] {
        if file.trim().is_empty() {
            anyhow::bail!("Data file names cannot be empty");
        }
    }

    Ok(())
}
