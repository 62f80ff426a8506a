#![cfg(unix)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use lastfm_timelapse::errors::TimelapseError;
use lastfm_timelapse::render::{CommandRenderer, RenderLayout, Renderer};
use lastfm_timelapse::timeline::DailyCountMatrix;

fn matrix() -> DailyCountMatrix {
    let mut counts: BTreeMap<String, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    counts
        .entry("Air".to_string())
        .or_default()
        .insert(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 3);
    counts
        .entry("Beck".to_string())
        .or_default()
        .insert(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 1);
    DailyCountMatrix::from_daily_counts(&counts)
}

fn script(dir: &std::path::Path, body: &str) -> String {
    let path = dir.join("render.sh");
    std::fs::write(&path, body).unwrap();
    format!("sh {}", path.display())
}

#[tokio::test]
async fn test_renderer_returns_written_file() {
    let dir = tempfile::tempdir().unwrap();
    // Stands in for a real renderer by copying the matrix to the output path
    let renderer = CommandRenderer::new(&script(dir.path(), "cp \"$1\" \"$3\"\n")).unwrap();
    let matrix = matrix();
    let layout = RenderLayout::new("rj's scrobbles by artists".to_string(), 4, &matrix);

    let bytes = renderer.render(&matrix, &layout).await.unwrap();

    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "date,Air,Beck\n2024-05-01,3,0\n2024-05-02,3,1\n"
    );
}

#[tokio::test]
async fn test_renderer_receives_layout() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CommandRenderer::new(&script(dir.path(), "cp \"$2\" \"$3\"\n")).unwrap();
    let matrix = matrix();
    let layout = RenderLayout::new("title".to_string(), 22, &matrix);

    let bytes = renderer.render(&matrix, &layout).await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(sent["title"], "title");
    assert_eq!(sent["bars"], 10);
    assert_eq!(sent["x_limit"], 3.5);
    assert_eq!(sent["left_margin"], 0.2);
}

#[tokio::test]
async fn test_failing_renderer_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let renderer =
        CommandRenderer::new(&script(dir.path(), "echo 'no encoder' >&2\nexit 3\n")).unwrap();
    let matrix = matrix();
    let layout = RenderLayout::new("title".to_string(), 4, &matrix);

    match renderer.render(&matrix, &layout).await {
        Err(TimelapseError::Render(message)) => assert!(message.contains("no encoder")),
        other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
    }
}

#[tokio::test]
async fn test_renderer_without_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CommandRenderer::new(&script(dir.path(), "exit 0\n")).unwrap();
    let matrix = matrix();
    let layout = RenderLayout::new("title".to_string(), 4, &matrix);

    assert!(matches!(
        renderer.render(&matrix, &layout).await,
        Err(TimelapseError::Render(_))
    ));
}
