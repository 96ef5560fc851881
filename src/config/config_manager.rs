use std::fs;
use std::path::{Path, PathBuf};
use reqwest::Url;
use crate::config::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, OLLAMA_MODEL_ENV, OLLAMA_URL_ENV, PORT_ENV, RESULTS_DIR_ENV,
    SONAR_AUTH_ENV, SONAR_TOKEN_ENV, SONAR_URL_ENV,
};
use crate::enums::sonar_auth::SonarAuth;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads the TOML file (if any) and applies environment overrides on top.
    pub fn load(path: Option<&Path>) -> AnalyzerResult<Config> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_config_path);

        let config = if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            Self::load_from_file(&config_path)?
        } else if path.is_some() {
            return Err(AnalyzerError::config_error(
                &format!("Config file not found: {}", config_path.display()),
                Some("Run 'sonar-analyzer init' to create one"),
            ));
        } else {
            Config::default()
        };

        Self::apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    pub fn load_from_file(path: &Path) -> AnalyzerResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| AnalyzerError::config_error(&format!("Cannot read {}: {}", path.display(), e), None))?;
        Ok(toml::from_str(&content)?)
    }

    /// Applies `SONAR_URL`-style overrides; `lookup` abstracts the process environment.
    pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> AnalyzerResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(SONAR_URL_ENV) {
            config.sonar.url = url;
        }
        if let Some(token) = lookup(SONAR_TOKEN_ENV) {
            config.sonar.token = Some(token);
        }
        if let Some(auth) = lookup(SONAR_AUTH_ENV) {
            config.sonar.auth = SonarAuth::parse(&auth).ok_or_else(|| {
                AnalyzerError::config_error(&format!("Unsupported {} value '{}'", SONAR_AUTH_ENV, auth), Some("Use 'basic' or 'bearer'"))
            })?;
        }
        if let Some(url) = lookup(OLLAMA_URL_ENV) {
            config.ollama.url = url;
        }
        if let Some(model) = lookup(OLLAMA_MODEL_ENV) {
            config.ollama.model = model;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.server.port = port.trim().parse().map_err(|_| {
                AnalyzerError::config_error(&format!("Invalid {} value '{}'", PORT_ENV, port), Some("Use a number between 1 and 65535"))
            })?;
        }
        if let Some(dir) = lookup(RESULTS_DIR_ENV) {
            config.output.results_dir = dir;
        }

        Ok(config)
    }

    pub fn create_sample_config(path: Option<&Path>) -> AnalyzerResult<PathBuf> {
        let sample_config = r#"# Sonar Issue Analyzer Configuration
# Every value can be overridden with the environment variable shown next to it.

[sonar]
url = "http://localhost:9000"      # SONAR_URL
token = ""                         # SONAR_TOKEN
auth = "basic"                     # SONAR_AUTH: "basic" (token as user) or "bearer"
timeout_secs = 30

[ollama]
url = "http://localhost:11434"     # OLLAMA_URL
model = "codellama"                # OLLAMA_MODEL
timeout_secs = 300

[server]
host = "0.0.0.0"
port = 3000                        # PORT

[output]
results_dir = "results"            # RESULTS_DIR
"#;
        let config_file_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_config_path);

        if config_file_path.exists() {
            return Err(AnalyzerError::config_error(
                &format!("Config file already exists: {}", config_file_path.display()),
                Some("Edit the existing file or remove it first"),
            ));
        }
        if let Some(parent) = config_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file_path, sample_config)?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, url) in [("sonar.url", &config.sonar.url), ("ollama.url", &config.ollama.url)] {
            match Url::parse(url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                Ok(parsed) => errors.push(format!("{} must use http or https, got '{}'", name, parsed.scheme())),
                Err(e) => errors.push(format!("{} is not a valid URL ('{}'): {}", name, url, e)),
            }
        }

        if config.ollama.model.trim().is_empty() {
            errors.push("ollama.model must not be empty".to_string());
        }

        if config.server.port == 0 {
            errors.push("server.port must not be 0".to_string());
        }

        if config.output.results_dir.trim().is_empty() {
            errors.push("output.results_dir must not be empty".to_string());
        }

        if config.sonar.timeout_secs == 0 || config.ollama.timeout_secs == 0 {
            errors.push("timeouts must be at least one second".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
