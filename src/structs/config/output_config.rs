use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "ConfigHelper::default_results_dir")]
    pub results_dir: String,
}

impl OutputConfig {
    pub fn results_root(&self) -> PathBuf {
        PathBuf::from(&self.results_dir)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: ConfigHelper::default_results_dir(),
        }
    }
}
