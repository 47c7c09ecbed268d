//! Predicate deciding which series are drawn in the highlight color.

use std::fmt;
use std::sync::Arc;

/// Which series labels are visually distinguished
///
/// **Public** - carried by [`ChartConfig`](super::ChartConfig)
///
/// The builders evaluate the predicate against the labels actually present
/// in the data and emit the matches as an explicit list, so the renderer
/// never sees a hardcoded name comparison.
#[derive(Clone)]
pub struct Highlight {
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    description: String,
}

impl Highlight {
    /// Highlight exactly one label
    pub fn label(label: impl Into<String>) -> Self {
        let label = label.into();
        let description = format!("label {:?}", label);
        Self {
            predicate: Arc::new(move |candidate| candidate == label),
            description,
        }
    }

    /// Highlight any of several labels
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let description = format!("labels {:?}", labels);
        Self {
            predicate: Arc::new(move |candidate| labels.iter().any(|l| l == candidate)),
            description,
        }
    }

    /// Highlight whatever satisfies `predicate`
    pub fn when(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
            description: "custom predicate".to_string(),
        }
    }

    /// Highlight nothing
    pub fn none() -> Self {
        Self {
            predicate: Arc::new(|_| false),
            description: "none".to_string(),
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        (self.predicate)(label)
    }

    /// The subset of `labels` that is highlighted, in the given order
    pub fn select<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        labels.into_iter().filter(|label| self.matches(label)).collect()
    }
}

impl fmt::Debug for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlight")
            .field("description", &self.description)
            .finish()
    }
}

/// Vega expression that is true when `datum[field]` is one of `labels`
///
/// An empty label list yields `false` so no datum is ever highlighted.
pub fn membership_test(field: &str, labels: &[&str]) -> String {
    if labels.is_empty() {
        return "false".to_string();
    }
    // serde_json escaping doubles as Vega expression string escaping
    let field = serde_json::Value::from(field).to_string();
    let labels = serde_json::Value::from(labels.to_vec()).to_string();
    format!("indexof({}, datum[{}]) >= 0", labels, field)
}
