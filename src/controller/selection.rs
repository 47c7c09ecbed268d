//! The question selection control.

use crate::parser::Dataset;
use crate::utils::config::LOAD_ERROR_LABEL;

/// Text shown while the dataset is being fetched
pub const LOADING_LABEL: &str = "Loading questions...";

/// One entry of the selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Question id sent back on selection
    pub value: String,
    /// `"<key>: <base_question>: <position>"`
    pub label: String,
}

/// State of the selection control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionControl {
    #[default]
    Loading,
    Ready(Vec<SelectOption>),
    /// Load failed; the text replaces every option
    Error(String),
}

impl SelectionControl {
    /// One option per question, sorted by the numeric suffix of its id
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let options = dataset
            .sorted_keys()
            .into_iter()
            .filter_map(|key| {
                dataset.get(key).map(|question| SelectOption {
                    value: key.to_string(),
                    label: format!("{}: {}", key, question.label()),
                })
            })
            .collect();
        Self::Ready(options)
    }

    pub fn load_failed() -> Self {
        Self::Error(LOAD_ERROR_LABEL.to_string())
    }

    /// Selectable options; empty while loading or after an error
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Ready(options) => options,
            _ => &[],
        }
    }

    /// Text of every visible entry, as the viewer sees it
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Loading => vec![LOADING_LABEL],
            Self::Ready(options) => options.iter().map(|o| o.label.as_str()).collect(),
            Self::Error(message) => vec![message.as_str()],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
