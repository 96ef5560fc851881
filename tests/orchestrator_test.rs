use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use sonar_issue_analyzer::enums::progress_event::ProgressEvent;
use sonar_issue_analyzer::errors::{AnalyzerError, AnalyzerResult};
use sonar_issue_analyzer::services::analysis_orchestrator::AnalysisOrchestrator;
use sonar_issue_analyzer::services::progress_channel::ProgressChannel;
use sonar_issue_analyzer::services::result_writer::ResultWriter;
use sonar_issue_analyzer::structs::analysis_request::AnalysisRequest;
use sonar_issue_analyzer::structs::issue::Issue;
use sonar_issue_analyzer::traits::suggestion_provider::SuggestionProvider;
use crate::support::{FakeSource, FakeSuggestions};

fn orchestrator(source: FakeSource, suggestions: FakeSuggestions, root: &std::path::Path) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(Arc::new(source), Arc::new(suggestions), ResultWriter::new(root))
}

/// Answers every issue, but first leaves a plain file where `blocked_key`'s report directory belongs.
struct BlockingSuggestions {
    project_dir: PathBuf,
    blocked_key: &'static str,
}

#[async_trait]
impl SuggestionProvider for BlockingSuggestions {
    async fn get_suggestion(&self, issue: &Issue) -> AnalyzerResult<String> {
        if issue.key == self.blocked_key {
            std::fs::write(self.project_dir.join(&issue.key), "not a directory")?;
        }
        FakeSuggestions::ok().get_suggestion(issue).await
    }
}

async fn collect(mut rx: tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn zero_issues_emits_started_then_complete() {
    let dir = tempfile::tempdir().unwrap();
    let (channel, rx) = ProgressChannel::streaming();

    let result = orchestrator(FakeSource::with_issues(&[]), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new("my-app"), &channel)
        .await
        .unwrap();
    drop(channel);

    assert_eq!(result.total_issues, 0);
    assert_eq!(result.analyzed_issues, 0);
    let names: Vec<&str> = collect(rx).await.iter().map(|e| e.event_name()).collect();
    assert_eq!(names, vec!["started", "complete"]);
    assert!(dir.path().join("my-app").is_dir());
}

#[tokio::test]
async fn one_failing_issue_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let (channel, rx) = ProgressChannel::streaming();

    let result = orchestrator(
        FakeSource::with_issues(&["AX-1", "AX-2", "AX-3"]),
        FakeSuggestions::failing_for(&["AX-2"]),
        dir.path(),
    )
    .run(&AnalysisRequest::new("my-app"), &channel)
    .await
    .unwrap();
    drop(channel);

    assert_eq!(result.total_issues, 3);
    assert_eq!(result.analyzed_issues, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].issue_key, "AX-2");

    for key in ["AX-1", "AX-3"] {
        let issue_dir = dir.path().join("my-app").join(key);
        assert!(issue_dir.join("result.json").is_file());
        assert!(issue_dir.join("solution.md").is_file());
        assert!(issue_dir.join("report.html").is_file());
    }
    assert!(!dir.path().join("my-app").join("AX-2").exists());

    let events = collect(rx).await;
    let names: Vec<&str> = events.iter().map(|e| e.event_name()).collect();
    assert_eq!(
        names,
        vec!["started", "progress", "issueProcessed", "progress", "error", "progress", "issueProcessed", "complete"]
    );

    match &events[3] {
        ProgressEvent::Progress { current, total, current_issue_key, .. } => {
            assert_eq!((*current, *total), (2, 3));
            assert_eq!(current_issue_key, "AX-2");
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(events.last(), Some(&ProgressEvent::Complete(result)));
}

#[tokio::test]
async fn result_json_carries_issue_and_solution() {
    let dir = tempfile::tempdir().unwrap();

    orchestrator(FakeSource::with_issues(&["AX-1"]), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new("my-app"), &ProgressChannel::silent())
        .await
        .unwrap();

    let issue_dir = dir.path().join("my-app").join("AX-1");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(issue_dir.join("result.json")).unwrap()).unwrap();
    assert_eq!(json["projectKey"], "my-app");
    assert_eq!(json["issue"]["key"], "AX-1");
    assert_eq!(json["issue"]["type"], "BUG");
    assert!(json["solution"].as_str().unwrap().contains("```java"));
    assert!(json["timestamp"].as_str().is_some());

    let markdown = std::fs::read_to_string(issue_dir.join("solution.md")).unwrap();
    assert_eq!(markdown, json["solution"].as_str().unwrap());

    let html = std::fs::read_to_string(issue_dir.join("report.html")).unwrap();
    assert!(html.contains("language-java"));
    assert!(!html.contains("```"));
}

#[tokio::test]
async fn full_run_clears_previous_reports_but_single_issue_run_keeps_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("my-app").join("OLD-1");
    std::fs::create_dir_all(&stale).unwrap();
    std::fs::write(stale.join("report.html"), "old").unwrap();

    orchestrator(FakeSource::with_issues(&["AX-1", "AX-2"]), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new("my-app").with_issue_key("AX-2"), &ProgressChannel::silent())
        .await
        .unwrap();
    assert!(stale.exists());
    assert!(dir.path().join("my-app").join("AX-2").join("report.html").is_file());
    assert!(!dir.path().join("my-app").join("AX-1").exists());

    orchestrator(FakeSource::with_issues(&["AX-1"]), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new("my-app"), &ProgressChannel::silent())
        .await
        .unwrap();
    assert!(!stale.exists());
    assert!(!dir.path().join("my-app").join("AX-2").exists());
    assert!(dir.path().join("my-app").join("AX-1").is_dir());
}

#[tokio::test]
async fn fetch_failure_leaves_existing_reports_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("my-app").join("AX-9");
    std::fs::create_dir_all(&existing).unwrap();

    let (channel, rx) = ProgressChannel::streaming();
    let result = orchestrator(FakeSource::failing(502), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new("my-app"), &channel)
        .await;
    drop(channel);

    assert!(matches!(result, Err(AnalyzerError::UpstreamError { status: Some(502), .. })));
    assert!(existing.is_dir());

    let events = collect(rx).await;
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], ProgressEvent::Error { issue_key: None, .. }));
}

#[tokio::test]
async fn path_like_project_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = orchestrator(FakeSource::with_issues(&["AX-1"]), FakeSuggestions::ok(), dir.path())
        .run(&AnalysisRequest::new(".."), &ProgressChannel::silent())
        .await;

    assert!(matches!(result, Err(AnalyzerError::ValidationError { .. })));
}

#[tokio::test]
async fn write_failure_is_reported_per_issue() {
    let dir = tempfile::tempdir().unwrap();
    let suggestions = BlockingSuggestions {
        project_dir: dir.path().join("my-app"),
        blocked_key: "AX-2",
    };
    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(FakeSource::with_issues(&["AX-1", "AX-2", "AX-3"])),
        Arc::new(suggestions),
        ResultWriter::new(dir.path()),
    );

    let (channel, rx) = ProgressChannel::streaming();
    let result = orchestrator.run(&AnalysisRequest::new("my-app"), &channel).await.unwrap();
    drop(channel);

    assert_eq!(result.total_issues, 3);
    assert_eq!(result.analyzed_issues, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].issue_key, "AX-2");

    let events = collect(rx).await;
    let names: Vec<&str> = events.iter().map(|e| e.event_name()).collect();
    assert_eq!(
        names,
        vec!["started", "progress", "issueProcessed", "progress", "error", "progress", "issueProcessed", "complete"]
    );
    assert!(matches!(&events[4], ProgressEvent::Error { issue_key: Some(key), .. } if key == "AX-2"));

    let written = dir.path().join("my-app").join("AX-3");
    assert!(written.join("result.json").is_file());
    assert!(written.join("report.html").is_file());
    assert!(dir.path().join("my-app").join("AX-2").is_file());
}
