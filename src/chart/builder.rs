//! Vega-Lite specification builders.
//!
//! Each builder turns normalized records into a [`ChartDescription`]:
//! - Distribution: box plot per source with a mean marker overlay
//! - Bar comparison: one bar per row (or grouped bars per column)
//! - Heatmap: rows by columns, colored by value, rows sorted by mean
//!
//! Category orders, highlighted labels and numeric domains are all
//! computed here and written into the spec explicitly.

use super::config::ChartConfig;
use super::description::{ChartDescription, ChartKind};
use super::highlight::membership_test;
use super::ordering::rows_by_ascending_mean;
use crate::aggregator::{aggregate_groups, display_order, valid_sample, GroupedSamples};
use crate::parser::LongRecord;
use crate::utils::config::VEGA_LITE_SCHEMA;
use indexmap::IndexMap;
use log::debug;
use serde_json::{json, Map, Value};

/// Build the per-question distribution chart
///
/// **Public** - rebuilt on every selection change
///
/// # Arguments
/// * `label` - Question label shown in the title (e.g. "Free Will: Libertarian")
/// * `groups` - Raw responses per source
/// * `config` - Chart configuration; `config.order` drives the source axis
///
/// # Returns
/// A two-layer spec. Layer 0 is the box plot over every valid response,
/// layer 1 holds one mean marker per source with a statistic.
pub fn build_distribution(
    label: &str,
    groups: &GroupedSamples,
    config: &ChartConfig,
) -> ChartDescription {
    let options = &config.distribution;

    let mut responses = Vec::new();
    let mut sources = Vec::new();
    for (source, samples) in groups.ordered(&config.order) {
        let before = responses.len();
        for (respondent, sample) in samples.iter().enumerate() {
            if let Some(response) = valid_sample(*sample) {
                responses.push(json!({
                    "model": source,
                    "philosopher": respondent,
                    "response": response,
                }));
            }
        }
        if responses.len() > before {
            sources.push(source);
        }
    }

    let statistics: Vec<Value> = aggregate_groups(groups, &config.order)
        .into_iter()
        .map(|group| {
            json!({
                "model": group.label,
                "mean": group.statistic.mean,
                "variance": group.statistic.variance,
                "stdDev": group.statistic.std_dev,
                "count": group.statistic.count,
            })
        })
        .collect();

    debug!(
        "Distribution for {}: {} responses, {} sources",
        label,
        responses.len(),
        statistics.len()
    );

    let highlighted = config.highlight.select(sources.iter().copied());
    let x_scale = json!({"domain": sources});
    let y_scale = json!({"domain": options.y_domain, "clamp": config.clamp});

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("Response Distribution: {}", label),
        "width": "container",
        "height": options.height,
        "layer": [
            {
                "data": {"values": responses},
                "mark": {
                    "type": "boxplot",
                    "extent": "min-max",
                    "size": options.box_size,
                },
                "encoding": {
                    "x": {
                        "field": "model",
                        "type": "nominal",
                        "axis": {"title": options.x_title, "labelAngle": config.label_angle},
                        "sort": sources,
                        "scale": x_scale,
                    },
                    "y": {
                        "field": "response",
                        "type": "quantitative",
                        "axis": {"title": options.y_title, "grid": true},
                        "scale": y_scale,
                    },
                    "color": highlight_color(config, "model", &highlighted),
                }
            },
            {
                "data": {"values": statistics},
                "mark": {
                    "type": "point",
                    "shape": "diamond",
                    "size": options.mean_size,
                    "color": options.mean_color,
                    "filled": true,
                },
                "encoding": {
                    "x": {
                        "field": "model",
                        "type": "nominal",
                        "sort": sources,
                        "scale": x_scale,
                    },
                    "y": {
                        "field": "mean",
                        "type": "quantitative",
                        "scale": y_scale,
                    },
                    "tooltip": [
                        {"field": "model", "type": "nominal", "title": options.x_title},
                        {"field": "mean", "type": "quantitative", "format": ".4f", "title": "Mean"},
                        {"field": "variance", "type": "quantitative", "format": ".4f", "title": "Variance"},
                        {"field": "stdDev", "type": "quantitative", "format": ".4f", "title": "Std Dev"},
                        {"field": "count", "type": "quantitative", "title": "Sample Size"},
                    ],
                }
            }
        ],
        "config": {"view": {"stroke": null}},
    });

    ChartDescription::new(ChartKind::Distribution, spec)
}

/// Build the bar comparison chart from a long-format table
///
/// **Public** - one bar per row key, ordered by `config.order`
///
/// With `config.bar.measure` set, the measure column is the bar height and
/// the configured tooltip columns ride along. Rows without a measure value
/// are left out. Without a measure, every column becomes one bar of a group.
pub fn build_bar_comparison(records: &[LongRecord], config: &ChartConfig) -> ChartDescription {
    let options = &config.bar;
    let row_field = options.row_field.as_str();

    let rows = pivot(records);
    let order = display_order(rows.keys().copied(), &config.order);

    let spec = match &options.measure {
        Some(measure) => {
            let mut values = Vec::new();
            let mut shown = Vec::new();
            for row in &order {
                let cells = &rows[row];
                if !cells.contains_key(measure.as_str()) {
                    debug!("Row {} has no {} value, leaving it out", row, measure);
                    continue;
                }
                let mut datum = Map::new();
                datum.insert(row_field.to_string(), json!(row));
                for (column, value) in cells {
                    datum.insert(column.to_string(), json!(value));
                }
                values.push(Value::Object(datum));
                shown.push(*row);
            }

            let highlighted = config.highlight.select(shown.iter().copied());

            let mut tooltip = vec![
                json!({"field": row_field, "type": "nominal"}),
                json!({"field": measure, "type": "quantitative", "format": ".4f", "title": options.measure_title}),
            ];
            tooltip.extend(options.tooltip_columns.iter().map(|column| {
                let mut entry = json!({"field": column.field, "type": "quantitative", "title": column.title});
                if let Some(format) = &column.format {
                    entry["format"] = json!(format);
                }
                entry
            }));

            json!({
                "$schema": VEGA_LITE_SCHEMA,
                "title": options.title,
                "data": {"values": values},
                "width": "container",
                "height": options.height,
                "mark": {"type": "bar", "tooltip": true},
                "encoding": {
                    "x": {
                        "field": row_field,
                        "type": "nominal",
                        "axis": {"labelAngle": config.label_angle, "title": row_field},
                        "sort": shown,
                    },
                    "y": {
                        "field": measure,
                        "type": "quantitative",
                        "axis": {"title": options.y_title},
                        "scale": {"domain": options.y_domain, "clamp": config.clamp},
                    },
                    "color": highlight_color(config, row_field, &highlighted),
                    "tooltip": tooltip,
                },
            })
        }
        None => {
            let series = display_order(
                records.iter().map(|record| record.column_key.as_str()),
                &config.order,
            );
            let rows = &rows;
            let values: Vec<Value> = order
                .iter()
                .flat_map(move |row| {
                    rows[row].iter().map(move |(column, value)| {
                        json!({
                            row_field: row,
                            options.series_field.as_str(): column,
                            options.value_field.as_str(): value,
                        })
                    })
                })
                .collect();
            let highlighted = config.highlight.select(order.iter().copied());

            json!({
                "$schema": VEGA_LITE_SCHEMA,
                "title": options.title,
                "data": {"values": values},
                "width": "container",
                "height": options.height,
                "mark": {"type": "bar", "tooltip": true, "stroke": config.highlight_color},
                "encoding": {
                    "x": {
                        "field": row_field,
                        "type": "nominal",
                        "axis": {"labelAngle": config.label_angle, "title": row_field},
                        "sort": order,
                    },
                    "xOffset": {"field": options.series_field, "sort": series},
                    "y": {
                        "field": options.value_field,
                        "type": "quantitative",
                        "axis": {"title": options.y_title},
                        "scale": {"domain": options.y_domain, "clamp": config.clamp},
                    },
                    "color": {
                        "field": options.series_field,
                        "type": "nominal",
                        "sort": series,
                    },
                    "strokeWidth": highlight_stroke(row_field, &highlighted, 2.0),
                    "tooltip": [
                        {"field": row_field, "type": "nominal"},
                        {"field": options.series_field, "type": "nominal"},
                        {"field": options.value_field, "type": "quantitative", "format": ".4f"},
                    ],
                },
            })
        }
    };

    ChartDescription::new(ChartKind::BarComparison, spec)
}

/// Build the heatmap from a long-format table
///
/// **Public** - rows are sorted by ascending mean value
///
/// The row order is computed here (see [`rows_by_ascending_mean`]) and
/// written as an explicit sort list. Columns follow `config.order`.
/// Highlighted columns get an outline rather than a fill color, since the
/// fill encodes the value.
pub fn build_heatmap(records: &[LongRecord], config: &ChartConfig) -> ChartDescription {
    let options = &config.heatmap;

    let row_order = rows_by_ascending_mean(records, config.tie_break);
    let columns = display_order(
        records.iter().map(|record| record.column_key.as_str()),
        &config.order,
    );
    let highlighted = config.highlight.select(columns.iter().copied());

    let values: Vec<Value> = records
        .iter()
        .map(|record| {
            json!({
                options.row_field.as_str(): record.row_key,
                options.column_field.as_str(): record.column_key,
                options.value_field.as_str(): record.value,
            })
        })
        .collect();

    debug!(
        "Heatmap: {} cells, {} rows, {} columns",
        values.len(),
        row_order.len(),
        columns.len()
    );

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": options.title,
        "data": {"values": values},
        "width": "container",
        "height": options.height,
        "mark": {"type": "rect", "tooltip": true, "stroke": config.highlight_color},
        "encoding": {
            "x": {
                "field": options.column_field,
                "type": "nominal",
                "axis": {"labelAngle": config.label_angle, "title": options.column_title},
                "sort": columns,
            },
            "y": {
                "field": options.row_field,
                "type": "nominal",
                "sort": row_order,
                "axis": {"title": options.row_title},
            },
            "color": {
                "field": options.value_field,
                "type": "quantitative",
                "scale": {
                    "scheme": options.scheme,
                    "domain": options.color_domain,
                    "clamp": config.clamp,
                },
                "legend": {"title": options.value_field},
            },
            "strokeWidth": highlight_stroke(
                &options.column_field,
                &highlighted,
                options.highlight_stroke_width,
            ),
            "tooltip": [
                {"field": options.row_field, "type": "nominal"},
                {"field": options.column_field, "type": "nominal"},
                {"field": options.value_field, "type": "quantitative", "format": ".4f"},
            ],
        },
    });

    ChartDescription::new(ChartKind::Heatmap, spec)
}

/// Highlight color when `field` is one of `highlighted`, base color otherwise
fn highlight_color(config: &ChartConfig, field: &str, highlighted: &[&str]) -> Value {
    json!({
        "condition": {
            "test": membership_test(field, highlighted),
            "value": config.highlight_color,
        },
        "value": config.base_color,
    })
}

/// Outline width when `field` is one of `highlighted`, none otherwise
fn highlight_stroke(field: &str, highlighted: &[&str], width: f64) -> Value {
    json!({
        "condition": {
            "test": membership_test(field, highlighted),
            "value": width,
        },
        "value": 0,
    })
}

/// Rows of a long table as column → value maps, rows in first-seen order
fn pivot(records: &[LongRecord]) -> IndexMap<&str, IndexMap<&str, f64>> {
    let mut rows: IndexMap<&str, IndexMap<&str, f64>> = IndexMap::new();
    for record in records {
        rows.entry(record.row_key.as_str())
            .or_default()
            .insert(record.column_key.as_str(), record.value);
    }
    rows
}
