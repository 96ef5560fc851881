/// Narrowing applied to an issue search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub issue_key: Option<String>,
    pub issue_types: Vec<String>,
}
