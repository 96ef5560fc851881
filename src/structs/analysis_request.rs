use serde::{Deserialize, Serialize};
use crate::enums::issue_types::IssueTypes;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::structs::issue_filter::IssueFilter;

/// Input of one analysis run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub issue_key: Option<String>,
    #[serde(default)]
    pub issue_types: Option<IssueTypes>,
}

impl AnalysisRequest {
    pub fn new(project_key: &str) -> Self {
        Self {
            project_key: Some(project_key.to_string()),
            ..Self::default()
        }
    }

    pub fn with_issue_key(mut self, issue_key: &str) -> Self {
        self.issue_key = Some(issue_key.to_string());
        self
    }

    pub fn with_issue_types(mut self, issue_types: IssueTypes) -> Self {
        self.issue_types = Some(issue_types);
        self
    }

    pub fn project_key(&self) -> AnalyzerResult<&str> {
        match self.project_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AnalyzerError::validation_error("projectKey", "Project key is required")),
        }
    }

    pub fn filter(&self) -> IssueFilter {
        IssueFilter {
            issue_key: self
                .issue_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| k.to_string()),
            issue_types: self.issue_types.as_ref().map(|t| t.to_list()).unwrap_or_default(),
        }
    }
}
