use serde::{Deserialize, Serialize};
use crate::enums::sonar_auth::SonarAuth;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SonarConfig {
    #[serde(default = "ConfigHelper::default_sonar_url")]
    pub url: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub auth: SonarAuth,

    #[serde(default = "ConfigHelper::default_sonar_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            url: ConfigHelper::default_sonar_url(),
            token: None,
            auth: SonarAuth::default(),
            timeout_secs: ConfigHelper::default_sonar_timeout_secs(),
        }
    }
}
