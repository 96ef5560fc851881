use serde::Serialize;
use crate::structs::issue::Issue;

/// Body of `result.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport<'a> {
    pub timestamp: String,
    pub project_key: &'a str,
    pub issue: &'a Issue,
    pub solution: &'a str,
}
