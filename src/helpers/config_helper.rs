use crate::config::constants::{
    DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_TIMEOUT_SECS, DEFAULT_OLLAMA_URL, DEFAULT_RESULTS_DIR,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SONAR_TIMEOUT_SECS, DEFAULT_SONAR_URL,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_sonar_url() -> String {
        DEFAULT_SONAR_URL.to_string()
    }

    pub fn default_sonar_timeout_secs() -> u64 {
        DEFAULT_SONAR_TIMEOUT_SECS
    }

    pub fn default_ollama_url() -> String {
        DEFAULT_OLLAMA_URL.to_string()
    }

    pub fn default_model() -> String {
        DEFAULT_OLLAMA_MODEL.to_string()
    }

    pub fn default_ollama_timeout_secs() -> u64 {
        DEFAULT_OLLAMA_TIMEOUT_SECS
    }

    pub fn default_port() -> u16 {
        DEFAULT_SERVER_PORT
    }

    pub fn default_host() -> String {
        DEFAULT_SERVER_HOST.to_string()
    }

    pub fn default_results_dir() -> String {
        DEFAULT_RESULTS_DIR.to_string()
    }
}
