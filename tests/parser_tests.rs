use heterogeneity_charts::parser::{parse_table, transform, Dataset, LongRecord};
use heterogeneity_charts::utils::error::{LoadError, ParseError};
use pretty_assertions::assert_eq;

const QUESTIONS: &str = r#"{
    "Q10": {"base_question": "Ethics", "position": "Deontology",
            "models": {"Human": {"responses": [0.7]}}},
    "Q2": {"base_question": "Mind", "position": "Physicalism",
           "models": {"GPT-4o": {"responses": [0.4, null]}}},
    "Q0": {"base_question": "Free Will", "position": "Libertarian",
           "models": {"Human": {"responses": [0.2, 0.8, null]},
                      "Claude": {"responses": [0.5]}},
           "notes": "ignored"}
}"#;

fn record(row: &str, column: &str, value: f64) -> LongRecord {
    LongRecord {
        row_key: row.to_string(),
        column_key: column.to_string(),
        value,
    }
}

#[test]
fn test_dataset_keys_sort_numerically() {
    let dataset = Dataset::from_json(QUESTIONS).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.sorted_keys(), vec!["Q0", "Q2", "Q10"]);
}

#[test]
fn test_question_groups_keep_file_order() {
    let dataset = Dataset::from_json(QUESTIONS).unwrap();
    let question = dataset.get("Q0").unwrap();

    assert_eq!(question.label(), "Free Will: Libertarian");

    let groups = question.grouped_samples();
    let labels: Vec<&str> = groups.labels().collect();
    assert_eq!(labels, vec!["Human", "Claude"]);
    assert_eq!(groups.get("Human").unwrap(), &[Some(0.2), Some(0.8), None]);
}

#[test]
fn test_dataset_malformed_json() {
    let result = Dataset::from_json("{\"Q0\": ");
    assert!(matches!(result, Err(LoadError::MalformedJson(_))));
}

#[test]
fn test_parse_table_to_long() {
    let text = "Domain,Human,GPT-4o\nEthics,0.052,0.011\nMind,,0.020\n";
    let table = parse_table(text, b',').unwrap();

    assert_eq!(table.row_key_name(), "Domain");
    assert_eq!(table.columns(), &["Human".to_string(), "GPT-4o".to_string()]);

    let records = table.to_long().unwrap();
    assert_eq!(
        records,
        vec![
            record("Ethics", "Human", 0.052),
            record("Ethics", "GPT-4o", 0.011),
            record("Mind", "GPT-4o", 0.020),
        ]
    );
}

#[test]
fn test_parse_table_other_delimiter() {
    let table = parse_table("Model;Per-Q Var\nHuman;0.05\n", b';').unwrap();
    assert_eq!(table.to_long().unwrap(), vec![record("Human", "Per-Q Var", 0.05)]);
}

#[test]
fn test_transform_rejects_malformed_cell() {
    let header = vec!["Domain", "Human", "Claude"];
    let rows = vec![
        vec!["Ethics", "0.1", "0.2"],
        vec!["Mind", "n/a", "0.3"],
    ];

    match transform(&header, &rows) {
        Err(ParseError::InvalidNumber { row, row_key, column, value }) => {
            assert_eq!(row, 2);
            assert_eq!(row_key, "Mind");
            assert_eq!(column, "Human");
            assert_eq!(value, "n/a");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
fn test_transform_short_rows_and_ragged_rows() {
    let header = vec!["Domain", "Human", "Claude"];

    let short = vec![vec!["Ethics", "0.1"]];
    assert_eq!(transform(&header, &short).unwrap(), vec![record("Ethics", "Human", 0.1)]);

    let wide = vec![vec!["Ethics", "0.1", "0.2", "0.3"]];
    assert!(matches!(
        transform(&header, &wide),
        Err(ParseError::RaggedRow { row: 1, .. })
    ));
}

#[test]
fn test_transform_requires_header() {
    let header: Vec<&str> = Vec::new();
    let rows: Vec<Vec<&str>> = Vec::new();
    assert!(matches!(transform(&header, &rows), Err(ParseError::MissingHeader)));
}
