//! Input JSON schema for per-question response data.
//!
//! The questions file is an object keyed by question id:
//!
//! ```json
//! {"Q0": {"base_question": "Free Will", "position": "Libertarian",
//!         "models": {"Human": {"responses": [0.2, 0.8, null]}}}}
//! ```
//!
//! Fields we do not use are ignored, so newer exports keep loading.

use crate::aggregator::GroupedSamples;
use crate::utils::error::LoadError;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Responses of one source (model or human panel) to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponses {
    /// One entry per respondent; `null` marks a missing answer
    #[serde(default)]
    pub responses: Vec<Option<f64>>,
}

/// A single question with the responses of every source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub base_question: String,
    pub position: String,

    /// Responses keyed by source name, in file order
    #[serde(default)]
    pub models: IndexMap<String, ModelResponses>,
}

impl Question {
    /// Human-readable label without the key
    pub fn label(&self) -> String {
        format!("{}: {}", self.base_question, self.position)
    }

    /// Regroup responses by source for aggregation
    pub fn grouped_samples(&self) -> GroupedSamples {
        self.models
            .iter()
            .map(|(name, model)| (name.clone(), model.responses.clone()))
            .collect()
    }
}

/// All questions of one load, keyed by question id
///
/// **Public** - immutable once loaded; a reload produces a new value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    questions: IndexMap<String, Question>,
}

impl Dataset {
    /// Parse the questions JSON document
    ///
    /// # Errors
    /// * `LoadError::MalformedJson` - not valid JSON or wrong shape
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let dataset: Dataset = serde_json::from_str(text)?;
        debug!("Parsed dataset with {} questions", dataset.len());
        Ok(dataset)
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.get(key)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question ids sorted by their numeric suffix
    ///
    /// `Q2` sorts before `Q10`. Ids without a numeric suffix come last,
    /// ordered by id.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.questions.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| {
            let rank = |key: &str| numeric_suffix(key).map_or((1, 0), |n| (0, n));
            rank(*a).cmp(&rank(*b)).then_with(|| a.cmp(b))
        });
        keys
    }
}

impl FromIterator<(String, Question)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Question)>>(iter: I) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

/// Trailing decimal digits of a question id (`"Q12"` → 12)
fn numeric_suffix(key: &str) -> Option<u64> {
    let digits = key.len() - key.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    key[key.len() - digits..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_with_nulls() {
        let dataset = Dataset::from_json(
            r#"{"Q0": {"base_question": "Free Will", "position": "Libertarian",
                "models": {"Human": {"responses": [0.2, 0.8, null]}}, "extra": 1}}"#,
        )
        .unwrap();

        let question = dataset.get("Q0").unwrap();
        assert_eq!(question.label(), "Free Will: Libertarian");
        assert_eq!(
            question.models["Human"].responses,
            vec![Some(0.2), Some(0.8), None]
        );
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(Dataset::from_json(r#"{"Q0": 3}"#).is_err());
        assert!(Dataset::from_json("not json").is_err());
    }

    #[test]
    fn test_sorted_keys_numeric() {
        let dataset = Dataset::from_json(
            r#"{"Q10": {"base_question": "a", "position": "b"},
                "Q2": {"base_question": "a", "position": "b"},
                "intro": {"base_question": "a", "position": "b"},
                "Q0": {"base_question": "a", "position": "b"}}"#,
        )
        .unwrap();

        assert_eq!(dataset.sorted_keys(), vec!["Q0", "Q2", "Q10", "intro"]);
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("Q12"), Some(12));
        assert_eq!(numeric_suffix("Q"), None);
        assert_eq!(numeric_suffix("7"), Some(7));
    }

    #[test]
    fn test_grouped_samples_keep_file_order() {
        let dataset = Dataset::from_json(
            r#"{"Q0": {"base_question": "a", "position": "b",
                "models": {"Mistral 7B": {"responses": [0.1]}, "Human": {"responses": [0.9]}}}}"#,
        )
        .unwrap();

        let groups = dataset.get("Q0").unwrap().grouped_samples();
        assert_eq!(groups.labels().collect::<Vec<_>>(), vec!["Mistral 7B", "Human"]);
    }
}
