use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::issue_types::IssueTypes;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::logger::progress_logger::ProgressLogger;
use crate::server::analyzer_server::{AnalyzerServer, AppState};
use crate::services::analysis_orchestrator::AnalysisOrchestrator;
use crate::services::ollama_client::OllamaClient;
use crate::services::progress_channel::ProgressChannel;
use crate::services::result_writer::ResultWriter;
use crate::services::sonar_client::SonarClient;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::config::config::Config;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> AnalyzerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Serve { port } => self.serve_command(port).await,
            Commands::Analyze { project, issue, types } => self.analyze_command(project, issue, types).await,
            Commands::Validate => self.validate_command(),
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> AnalyzerResult<()> {
        log::info!("🚀 Initializing sonar-analyzer configuration...");

        let path = ConfigManager::create_sample_config(self.config_path.as_deref())?;
        log::info!("📝 Edit {} to point at your Sonar and Ollama instances.", path.display());
        log::info!("🔧 Run 'sonar-analyzer validate' to check your configuration.");
        Ok(())
    }

    async fn serve_command(&self, port: Option<u16>) -> AnalyzerResult<()> {
        let mut config = self.load_valid_config()?;
        if let Some(port) = port {
            config.server.port = port;
        }

        let server = AnalyzerServer::new(Self::app_state(&config)?);
        server.run(&config).await
    }

    async fn analyze_command(&self, project: String, issue: Option<String>, types: Option<String>) -> AnalyzerResult<()> {
        let config = self.load_valid_config()?;
        let state = Self::app_state(&config)?;

        let mut request = AnalysisRequest::new(&project);
        if let Some(issue_key) = issue {
            request = request.with_issue_key(&issue_key);
        }
        if let Some(types) = types {
            request = request.with_issue_types(IssueTypes::Csv(types));
        }

        let orchestrator = AnalysisOrchestrator::new(
            state.issue_source,
            state.suggestion_provider,
            ResultWriter::new(state.results_root.clone()),
        );

        let (channel, mut rx) = ProgressChannel::streaming();
        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                ProgressLogger::log_event(&event);
            }
        });

        let result = orchestrator.run(&request, &channel).await;
        drop(channel);
        if let Err(e) = printer.await {
            log::warn!("⚠️ Progress printer stopped unexpectedly: {}", e);
        }

        let result = result?;
        ProgressLogger::print_summary(&result);
        log::info!("📁 Reports saved under {}", state.results_root.join(request.project_key()?).display());
        Ok(())
    }

    fn validate_command(&self) -> AnalyzerResult<()> {
        log::info!("🔍 Validating sonar-analyzer configuration...");

        let config = self.load_config()?;
        Self::check(&config)?;

        log::info!("✅ Configuration is valid");
        log::info!("   Sonar:   {} (auth: {:?}, token {})", config.sonar.url, config.sonar.auth,
            if config.sonar.token.as_deref().map_or(true, str::is_empty) { "not set" } else { "set" });
        log::info!("   Ollama:  {} (model {})", config.ollama.url, config.ollama.model);
        log::info!("   Server:  {}:{}", config.server.host, config.server.port);
        log::info!("   Results: {}", config.output.results_root().display());
        Ok(())
    }

    fn load_config(&self) -> AnalyzerResult<Config> {
        ConfigManager::load(self.config_path.as_deref()).map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            e
        })
    }

    fn load_valid_config(&self) -> AnalyzerResult<Config> {
        let config = self.load_config()?;
        Self::check(&config)?;
        Ok(config)
    }

    fn check(config: &Config) -> AnalyzerResult<()> {
        ConfigManager::validate_config(config).map_err(|errors| {
            log::error!("❌ Issues found:");
            for error in &errors {
                log::error!("   - {}", error);
            }
            AnalyzerError::config_error(&errors.join("; "), Some("Fix config.toml or the matching environment variables"))
        })
    }

    fn app_state(config: &Config) -> AnalyzerResult<AppState> {
        Ok(AppState {
            issue_source: Arc::new(SonarClient::new(&config.sonar)?),
            suggestion_provider: Arc::new(OllamaClient::new(&config.ollama)?),
            results_root: config.output.results_root(),
        })
    }
}
