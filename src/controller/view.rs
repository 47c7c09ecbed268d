//! View controller for the per-question visualization.
//!
//! The controller:
//! 1. Fetches the questions dataset from a [`DataSource`]
//! 2. Populates the selection control (or its error state)
//! 3. Renders the first question by default
//! 4. Rebuilds and replaces the chart on every selection change
//!
//! The loaded dataset is an immutable `Arc<Dataset>` owned by the
//! controller; a reload swaps in a new value. Loads are sequenced: each
//! one takes a [`LoadTicket`] and only the newest ticket may apply its
//! result, so a slow earlier fetch never overwrites a later one.

use super::selection::SelectionControl;
use super::source::DataSource;
use crate::chart::{build_distribution, ChartConfig};
use crate::output::ChartRenderer;
use crate::parser::{parse_table, Dataset, Table};
use crate::utils::error::{LoadError, OutputError};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Permission to apply the result of one load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    location: String,
}

impl LoadTicket {
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Fetch and parse a questions dataset
///
/// **Public** - usable on its own when loads are driven through tickets
pub async fn fetch_dataset<S: DataSource + ?Sized>(
    source: &S,
    location: &str,
) -> Result<Dataset, LoadError> {
    let text = source.fetch_text(location).await?;
    Dataset::from_json(&text)
}

/// Fetch and parse a delimited wide table
pub async fn fetch_table<S: DataSource + ?Sized>(
    source: &S,
    location: &str,
    delimiter: u8,
) -> Result<Table, LoadError> {
    let text = source.fetch_text(location).await?;
    Ok(parse_table(&text, delimiter)?)
}

/// Drives one mounted distribution chart and its selection control
pub struct ViewController<S, R> {
    source: S,
    renderer: R,
    config: ChartConfig,
    mount: String,
    dataset: Option<Arc<Dataset>>,
    selection: SelectionControl,
    selected: Option<String>,
    generation: u64,
}

impl<S: DataSource, R: ChartRenderer> ViewController<S, R> {
    pub fn new(source: S, renderer: R, mount: impl Into<String>) -> Self {
        Self {
            source,
            renderer,
            config: ChartConfig::default(),
            mount: mount.into(),
            dataset: None,
            selection: SelectionControl::default(),
            selected: None,
            generation: 0,
        }
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Load a dataset and render its first question
    ///
    /// **Public** - main entry point
    ///
    /// # Errors
    /// Any `LoadError` from fetching or parsing. The selection control is
    /// switched to its error state first, and the previously loaded
    /// dataset (if any) stays cached.
    pub async fn load(&mut self, location: &str) -> Result<Arc<Dataset>, LoadError> {
        let ticket = self.begin_load(location);
        let result = fetch_dataset(&self.source, location).await;
        self.complete_load(ticket, result)?
            .ok_or_else(|| LoadError::Superseded(location.to_string()))
    }

    /// Start a load; any older outstanding ticket becomes stale
    pub fn begin_load(&mut self, location: &str) -> LoadTicket {
        self.generation += 1;
        self.selection = SelectionControl::Loading;
        debug!("Load #{} of {} started", self.generation, location);

        LoadTicket {
            generation: self.generation,
            location: location.to_string(),
        }
    }

    /// Apply the result of a load
    ///
    /// # Returns
    /// * `Ok(Some(dataset))` - the result was applied
    /// * `Ok(None)` - a newer load was started since; the result is dropped
    /// * `Err(_)` - the load failed and the selection control shows an error
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Dataset, LoadError>,
    ) -> Result<Option<Arc<Dataset>>, LoadError> {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale load #{} of {} (current #{})",
                ticket.generation, ticket.location, self.generation
            );
            return Ok(None);
        }

        let dataset = match result {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                error!("Error loading questions data from {}: {}", ticket.location, e);
                self.selection = SelectionControl::load_failed();
                return Err(e);
            }
        };

        info!("Loaded {} questions from {}", dataset.len(), ticket.location);

        self.selection = SelectionControl::from_dataset(&dataset);
        self.dataset = Some(Arc::clone(&dataset));
        self.selected = None;

        let first = self.selection.options().first().map(|o| o.value.clone());
        if let Some(first) = first {
            // a render failure must not undo a successful load
            if let Err(e) = self.on_selection_change(&first) {
                warn!("Failed to render {}: {}", first, e);
            }
        }

        Ok(Some(dataset))
    }

    /// Rebuild and replace the chart for the question `key`
    ///
    /// **Public** - called whenever the viewer picks another question
    ///
    /// # Returns
    /// `Ok(true)` when a chart was rendered, `Ok(false)` when nothing is
    /// loaded or `key` is unknown (the current chart stays as it is).
    pub fn on_selection_change(&mut self, key: &str) -> Result<bool, OutputError> {
        let Some(dataset) = self.dataset.as_ref().map(Arc::clone) else {
            debug!("Selection {} ignored, no dataset loaded", key);
            return Ok(false);
        };

        let Some(question) = dataset.get(key) else {
            warn!("Unknown question {}", key);
            return Ok(false);
        };

        let groups = question.grouped_samples();
        let chart = build_distribution(&question.label(), &groups, &self.config);
        self.renderer.render(&self.mount, &chart)?;
        self.selected = Some(key.to_string());

        debug!("Rendered {} at #{}", key, self.mount);
        Ok(true)
    }

    pub fn selection(&self) -> &SelectionControl {
        &self.selection
    }

    /// Question currently shown
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Last successfully loaded dataset
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryRenderer;
    use async_trait::async_trait;

    struct StaticSource(Result<&'static str, u16>);

    #[async_trait]
    impl DataSource for StaticSource {
        async fn fetch_text(&self, _location: &str) -> Result<String, LoadError> {
            self.0.map(str::to_string).map_err(LoadError::Status)
        }
    }

    const DATA: &str = r#"{
        "Q1": {"base_question": "Mind", "position": "Physicalism",
               "models": {"GPT-4o": {"responses": [0.3, 0.5]}}},
        "Q0": {"base_question": "Free Will", "position": "Libertarian",
               "models": {"Human": {"responses": [0.2, 0.8, null]}}}
    }"#;

    #[tokio::test]
    async fn test_load_renders_first_question() {
        let mut view = ViewController::new(StaticSource(Ok(DATA)), MemoryRenderer::new(), "viz");

        let dataset = view.load("q.json").await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(view.selected(), Some("Q0"));
        assert!(view.renderer().chart("viz").is_some());
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_and_keeps_cache() {
        let mut view = ViewController::new(StaticSource(Ok(DATA)), MemoryRenderer::new(), "viz");
        view.load("q.json").await.unwrap();

        let mut failing = ViewController::new(StaticSource(Err(404)), MemoryRenderer::new(), "viz");
        assert!(matches!(failing.load("q.json").await, Err(LoadError::Status(404))));
        assert!(failing.selection().is_error());
        assert!(failing.dataset().is_none());

        // a later failing load on a loaded view keeps the cached dataset
        let ticket = view.begin_load("again.json");
        let result = view.complete_load(ticket, Err(LoadError::Status(500)));
        assert!(result.is_err());
        assert!(view.selection().is_error());
        assert_eq!(view.dataset().unwrap().len(), 2);
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut view = ViewController::new(StaticSource(Ok(DATA)), MemoryRenderer::new(), "viz");

        let slow = view.begin_load("slow.json");
        let fast = view.begin_load("fast.json");

        let applied = view
            .complete_load(fast, Dataset::from_json(DATA))
            .unwrap();
        assert!(applied.is_some());

        let stale = view
            .complete_load(slow, Dataset::from_json("{}"))
            .unwrap();
        assert!(stale.is_none());
        assert_eq!(view.dataset().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_selection_keeps_chart() {
        let mut view = ViewController::new(StaticSource(Ok(DATA)), MemoryRenderer::new(), "viz");
        view.load("q.json").await.unwrap();
        let renders = view.renderer().renders();

        assert!(!view.on_selection_change("Q99").unwrap());
        assert_eq!(view.renderer().renders(), renders);
        assert_eq!(view.selected(), Some("Q0"));

        assert!(view.on_selection_change("Q1").unwrap());
        assert_eq!(view.selected(), Some("Q1"));
    }

    #[test]
    fn test_selection_before_load_is_ignored() {
        let mut view = ViewController::new(StaticSource(Ok(DATA)), MemoryRenderer::new(), "viz");
        assert!(!view.on_selection_change("Q0").unwrap());
    }
}
