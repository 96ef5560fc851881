use serde::{Deserialize, Serialize};

/// How the Sonar token is presented to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SonarAuth {
    /// Token as user name with an empty password.
    #[default]
    Basic,
    Bearer,
}

impl SonarAuth {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "bearer" => Some(Self::Bearer),
            _ => None,
        }
    }
}
