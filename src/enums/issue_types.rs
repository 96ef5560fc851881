use serde::{Deserialize, Serialize};

/// Issue type filter as sent by clients: `"BUG,CODE_SMELL"` or `["BUG", "CODE_SMELL"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueTypes {
    Csv(String),
    List(Vec<String>),
}

impl IssueTypes {
    pub fn to_list(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            IssueTypes::Csv(value) => value.split(',').collect(),
            IssueTypes::List(values) => values.iter().map(|v| v.as_str()).collect(),
        };

        raw.into_iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }
}
