use serde::Deserialize;
use crate::structs::issue::Issue;

#[derive(Debug, Deserialize)]
pub struct IssuesSearchResponse {
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub paging: Option<Paging>,
    // Absent on malformed payloads, which are reported as upstream errors
    #[serde(default)]
    pub issues: Option<Vec<Issue>>,
}

impl IssuesSearchResponse {
    pub fn total(&self) -> Option<usize> {
        self.paging.as_ref().map(|p| p.total).or(self.total)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_index: usize,
    pub page_size: usize,
    pub total: usize,
}
