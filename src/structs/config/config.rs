use serde::{Deserialize, Serialize};
use crate::structs::config::ollama_config::OllamaConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::server_config::ServerConfig;
use crate::structs::config::sonar_config::SonarConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sonar: SonarConfig,

    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}
