use serde::{Deserialize, Serialize};

/// Sonar issue as returned by `/api/issues/search`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    #[serde(rename = "type", default)]
    pub issue_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    // Attached locally once the issue has been processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Issue {
    pub fn line_label(&self) -> String {
        self.line.map(|l| l.to_string()).unwrap_or_else(|| "N/A".to_string())
    }
}
