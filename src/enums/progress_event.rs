use serde::{Deserialize, Serialize};
use crate::structs::analysis_result::AnalysisResult;

/// Events reported while a run is in flight.
///
/// `Started` is always first and `Complete` always last; a run that fails to start
/// ends with an `Error` instead of `Complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProgressEvent {
    Started,
    #[serde(rename_all = "camelCase")]
    Progress {
        current: usize,
        total: usize,
        current_issue_key: String,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    IssueProcessed {
        issue_key: String,
        status: String,
        details: String,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        issue_key: Option<String>,
        message: String,
    },
    Complete(AnalysisResult),
}

impl ProgressEvent {
    /// Name of the server-sent event carrying this payload.
    pub fn event_name(&self) -> &'static str {
        match self {
            ProgressEvent::Started => "started",
            ProgressEvent::Progress { .. } => "progress",
            ProgressEvent::IssueProcessed { .. } => "issueProcessed",
            ProgressEvent::Error { .. } => "error",
            ProgressEvent::Complete(_) => "complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_type_tag() {
        let event = ProgressEvent::Progress {
            current: 1,
            total: 3,
            current_issue_key: "AX-1".to_string(),
            message: "Analyzing issue 1/3".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "progress",
                "current": 1,
                "total": 3,
                "currentIssueKey": "AX-1",
                "message": "Analyzing issue 1/3"
            })
        );
        assert_eq!(serde_json::to_value(ProgressEvent::Started).unwrap(), json!({"type": "started"}));
    }

    #[test]
    fn complete_flattens_result_fields() {
        let event = ProgressEvent::Complete(AnalysisResult {
            total_issues: 2,
            analyzed_issues: 1,
            errors: vec![],
            message: "done".to_string(),
        });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["totalIssues"], 2);
        assert_eq!(value["analyzedIssues"], 1);
        assert_eq!(event.event_name(), "complete");
    }

    #[test]
    fn run_level_error_omits_issue_key() {
        let event = ProgressEvent::Error { issue_key: None, message: "Sonar down".to_string() };
        assert_eq!(serde_json::to_value(&event).unwrap(), json!({"type": "error", "message": "Sonar down"}));
    }
}
