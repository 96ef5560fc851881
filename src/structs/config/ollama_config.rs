use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OllamaConfig {
    #[serde(default = "ConfigHelper::default_ollama_url")]
    pub url: String,

    #[serde(default = "ConfigHelper::default_model")]
    pub model: String,

    #[serde(default = "ConfigHelper::default_ollama_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: ConfigHelper::default_ollama_url(),
            model: ConfigHelper::default_model(),
            timeout_secs: ConfigHelper::default_ollama_timeout_secs(),
        }
    }
}
