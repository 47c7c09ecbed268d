use heterogeneity_charts::commands::{
    execute_build, list_questions, render_question, BuildArgs, SourceArgs, StyleArgs,
};
use heterogeneity_charts::utils::config::{
    DOMAIN_FILE, DOMAIN_MOUNT, LOAD_ERROR_LABEL, QUESTIONS_FILE, QUESTION_MOUNT, VARIANCE_FILE,
    VARIANCE_MOUNT,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const QUESTIONS: &str = r#"{
    "Q1": {"base_question": "Mind", "position": "Physicalism",
           "models": {"GPT-4o": {"responses": [0.4, 0.6]}, "Human": {"responses": [0.1, 0.9]}}},
    "Q0": {"base_question": "Free Will", "position": "Libertarian",
           "models": {"Human": {"responses": [0.2, 0.8, null]}}}
}"#;

const VARIANCE: &str = "Model,Per-Q Var,Var Ratio\nGPT-4o,0.01,0.2\nHuman,0.05,1.0\n";

const DOMAINS: &str = "Domain,Human,GPT-4o\nEthics,0.06,0.02\nMind,0.01,0.01\n";

fn assets(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn sources(dir: &Path) -> SourceArgs {
    SourceArgs {
        assets: dir.to_str().unwrap().to_string(),
        ..Default::default()
    }
}

fn all_assets() -> TempDir {
    assets(&[
        (QUESTIONS_FILE, QUESTIONS),
        (VARIANCE_FILE, VARIANCE),
        (DOMAIN_FILE, DOMAINS),
    ])
}

#[tokio::test]
async fn test_build_renders_every_chart() {
    let data = all_assets();
    let out = tempdir().unwrap();

    let report = execute_build(BuildArgs {
        sources: sources(data.path()),
        output_dir: out.path().to_path_buf(),
        page: true,
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.rendered, vec![QUESTION_MOUNT, VARIANCE_MOUNT, DOMAIN_MOUNT]);
    assert_eq!(
        report.questions,
        vec!["Q0: Free Will: Libertarian", "Q1: Mind: Physicalism"]
    );

    for mount in [QUESTION_MOUNT, VARIANCE_MOUNT, DOMAIN_MOUNT] {
        assert!(out.path().join(format!("{}.vl.json", mount)).is_file());
        assert!(out.path().join(format!("{}.html", mount)).is_file());
    }
    assert_eq!(report.page, Some(out.path().join("index.html")));

    let heatmap: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("domain-viz.vl.json")).unwrap())
            .unwrap();
    assert_eq!(heatmap["encoding"]["y"]["sort"], json!(["Mind", "Ethics"]));
    assert_eq!(heatmap["encoding"]["y"]["field"], json!("Domain"));
}

#[tokio::test]
async fn test_build_selected_question() {
    let data = all_assets();
    let out = tempdir().unwrap();

    execute_build(BuildArgs {
        sources: sources(data.path()),
        output_dir: out.path().to_path_buf(),
        question: Some("Q1".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    let spec: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("per-question-viz.vl.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(spec["title"], json!("Response Distribution: Mind: Physicalism"));
}

#[tokio::test]
async fn test_build_page_shows_selected_question_once() {
    let data = all_assets();
    let out = tempdir().unwrap();

    let report = execute_build(BuildArgs {
        sources: sources(data.path()),
        output_dir: out.path().to_path_buf(),
        question: Some("Q1".to_string()),
        page: true,
        ..Default::default()
    })
    .await
    .unwrap();

    let html = fs::read_to_string(report.page.unwrap()).unwrap();
    assert_eq!(html.matches("<div id=\"per-question-viz\"").count(), 1);
    assert_eq!(html.matches("vegaEmbed('#per-question-viz'").count(), 1);
    assert!(html.contains("Response Distribution: Mind: Physicalism"));
    assert!(!html.contains("Response Distribution: Free Will: Libertarian"));
}

#[tokio::test]
async fn test_build_unknown_question_fails() {
    let data = all_assets();
    let out = tempdir().unwrap();

    let result = execute_build(BuildArgs {
        sources: sources(data.path()),
        output_dir: out.path().to_path_buf(),
        question: Some("Q42".to_string()),
        ..Default::default()
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_build_degrades_per_chart() {
    let data = assets(&[(VARIANCE_FILE, VARIANCE), (DOMAIN_FILE, "Domain,Human\nEthics,lots\n")]);
    let out = tempdir().unwrap();

    let report = execute_build(BuildArgs {
        sources: sources(data.path()),
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.rendered, vec![VARIANCE_MOUNT]);

    let failed: Vec<&str> = report.failed.iter().map(|(mount, _)| mount.as_str()).collect();
    assert_eq!(failed, vec![QUESTION_MOUNT, DOMAIN_MOUNT]);
    assert_eq!(report.questions, vec![LOAD_ERROR_LABEL]);

    let question_html = fs::read_to_string(out.path().join("per-question-viz.html")).unwrap();
    assert!(question_html.contains(LOAD_ERROR_LABEL));
    assert!(!out.path().join("domain-viz.vl.json").exists());
}

#[tokio::test]
async fn test_list_questions() {
    let data = all_assets();
    let control = list_questions(&sources(data.path())).await.unwrap();

    assert_eq!(
        control.labels(),
        vec!["Q0: Free Will: Libertarian", "Q1: Mind: Physicalism"]
    );
}

#[tokio::test]
async fn test_list_questions_reports_error_state() {
    let data = assets(&[]);
    let control = list_questions(&sources(data.path())).await.unwrap();

    assert!(control.is_error());
    assert_eq!(control.labels(), vec![LOAD_ERROR_LABEL]);
}

#[tokio::test]
async fn test_render_question_with_custom_order() {
    let data = all_assets();
    let style = StyleArgs {
        order: vec!["GPT-4o".to_string(), "Human".to_string()],
        ..Default::default()
    };

    let chart = render_question(&sources(data.path()), &style, "Q1").await.unwrap();

    assert_eq!(chart.layers()[0]["encoding"]["x"]["sort"], json!(["GPT-4o", "Human"]));
    let stats = chart.layer_values(1);
    assert_eq!(stats[1]["model"], json!("Human"));
    assert_eq!(stats[1]["count"], json!(2));
}

#[tokio::test]
async fn test_render_unknown_question() {
    let data = all_assets();
    let result = render_question(&sources(data.path()), &StyleArgs::default(), "Q9").await;
    assert!(result.is_err());
}
