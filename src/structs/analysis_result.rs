use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueError {
    pub issue_key: String,
    pub error: String,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_issues: usize,
    pub analyzed_issues: usize,
    pub errors: Vec<IssueError>,
    pub message: String,
}
