//! Immutable, renderer-agnostic chart descriptions.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Kind of chart a description draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Distribution,
    BarComparison,
    Heatmap,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Distribution => "distribution",
            ChartKind::BarComparison => "bar comparison",
            ChartKind::Heatmap => "heatmap",
        };
        f.write_str(name)
    }
}

/// A Vega-Lite specification
///
/// **Public** - produced by the builders, consumed by renderers
///
/// There is no mutable access to the spec: a new render builds a new
/// description.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    kind: ChartKind,
    spec: Value,
}

impl ChartDescription {
    pub(crate) fn new(kind: ChartKind, spec: Value) -> Self {
        Self { kind, spec }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The full Vega-Lite document
    pub fn spec(&self) -> &Value {
        &self.spec
    }

    pub fn title(&self) -> Option<&str> {
        self.spec.get("title").and_then(Value::as_str)
    }

    /// Layers of a layered spec; a single-view spec has none
    pub fn layers(&self) -> &[Value] {
        self.spec
            .get("layer")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Inline data values of the top-level view
    pub fn data_values(&self) -> &[Value] {
        inline_values(&self.spec)
    }

    /// Inline data values of one layer
    pub fn layer_values(&self, layer: usize) -> &[Value] {
        self.layers().get(layer).map(inline_values).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.spec)
    }
}

impl Serialize for ChartDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.spec.serialize(serializer)
    }
}

fn inline_values(view: &Value) -> &[Value] {
    view.pointer("/data/values")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
