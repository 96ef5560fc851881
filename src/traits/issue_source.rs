use async_trait::async_trait;
use crate::errors::AnalyzerResult;
use crate::structs::issue::Issue;
use crate::structs::issue_filter::IssueFilter;

#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_issues(&self, project_key: &str, filter: &IssueFilter) -> AnalyzerResult<Vec<Issue>>;
}
