use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::Filter;
use sonar_issue_analyzer::errors::{AnalyzerError, AnalyzerResult};
use sonar_issue_analyzer::structs::issue::Issue;
use sonar_issue_analyzer::structs::issue_filter::IssueFilter;
use sonar_issue_analyzer::traits::issue_source::IssueSource;
use sonar_issue_analyzer::traits::suggestion_provider::SuggestionProvider;

pub fn issue_json(key: &str) -> Value {
    json!({
        "key": key,
        "type": "BUG",
        "severity": "MAJOR",
        "message": format!("Possible null dereference in {}", key),
        "component": "my-app:src/main/java/App.java",
        "line": 42,
        "creationDate": "2024-03-01T10:15:30+0000",
        "status": "OPEN",
        "project": "my-app",
        "rule": "java:S2259"
    })
}

pub fn issue(key: &str) -> Issue {
    serde_json::from_value(issue_json(key)).unwrap()
}

/// In-memory issue source returning a fixed list.
pub struct FakeSource {
    pub issues: Vec<Issue>,
    pub fail_with: Option<u16>,
}

impl FakeSource {
    pub fn with_issues(keys: &[&str]) -> Self {
        Self {
            issues: keys.iter().map(|k| issue(k)).collect(),
            fail_with: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            issues: Vec::new(),
            fail_with: Some(status),
        }
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn fetch_issues(&self, _project_key: &str, filter: &IssueFilter) -> AnalyzerResult<Vec<Issue>> {
        if let Some(status) = self.fail_with {
            return Err(AnalyzerError::upstream_error("Sonar", Some(status), "search failed"));
        }
        Ok(match &filter.issue_key {
            Some(key) => self.issues.iter().filter(|i| &i.key == key).cloned().collect(),
            None => self.issues.clone(),
        })
    }
}

/// Returns a canned markdown answer, failing for the listed issue keys.
pub struct FakeSuggestions {
    pub failing_keys: Vec<String>,
}

impl FakeSuggestions {
    pub fn ok() -> Self {
        Self { failing_keys: Vec::new() }
    }

    pub fn failing_for(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SuggestionProvider for FakeSuggestions {
    async fn get_suggestion(&self, issue: &Issue) -> AnalyzerResult<String> {
        if self.failing_keys.contains(&issue.key) {
            return Err(AnalyzerError::upstream_error("Ollama", Some(500), "model crashed"));
        }
        Ok(format!(
            "Check for null before use in {}.\n\n```java\nif (value != null) {{\n    return value.length();\n}}\n```\n",
            issue.key
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Fake Sonar `/api/issues/search`; `respond` receives the query and page number.
pub async fn spawn_sonar<F>(respond: F) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn(&HashMap<String, String>) -> (StatusCode, String) + Clone + Send + Sync + 'static,
{
    let recorded: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&recorded);

    let route = warp::path!("api" / "issues" / "search")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::header::optional::<String>("authorization"))
        .map(move |query: HashMap<String, String>, authorization: Option<String>| {
            let (status, body) = respond(&query);
            log.lock().unwrap().push(RecordedRequest { query, authorization });
            warp::reply::with_status(
                warp::reply::with_header(body, "content-type", "application/json"),
                status,
            )
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, recorded)
}

/// Fake Ollama `/api/generate` recording every request body.
pub async fn spawn_ollama(status: StatusCode, body: Value) -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let recorded: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&recorded);

    let route = warp::path!("api" / "generate")
        .and(warp::post())
        .and(warp::body::json::<Value>())
        .map(move |request: Value| {
            log.lock().unwrap().push(request);
            warp::reply::with_status(warp::reply::json(&body), status)
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, recorded)
}

pub fn page_of(keys: &[String], total: usize, page: usize) -> String {
    let issues: Vec<Value> = keys.iter().map(|k| issue_json(k)).collect();
    json!({
        "total": total,
        "paging": { "pageIndex": page, "pageSize": 100, "total": total },
        "issues": issues
    })
    .to_string()
}
