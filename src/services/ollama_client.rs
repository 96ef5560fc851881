use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::{timeout_duration_secs, OLLAMA_GENERATE_PATH};
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::prompts::issue_prompt::build_issue_prompt;
use crate::structs::ai::ollama::ollama_generate_request::OllamaGenerateRequest;
use crate::structs::ai::ollama::ollama_generate_response::OllamaGenerateResponse;
use crate::structs::config::ollama_config::OllamaConfig;
use crate::structs::issue::Issue;
use crate::traits::suggestion_provider::SuggestionProvider;

const SERVICE_NAME: &str = "Ollama";

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> AnalyzerResult<Self> {
        let client = Client::builder()
            .timeout(timeout_duration_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::config_error(&format!("Failed to build Ollama HTTP client: {}", e), None))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
            model: config.model.clone(),
        })
    }

    fn get_request(&self, prompt: String) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        }
    }

    pub async fn generate(&self, prompt: String) -> AnalyzerResult<String> {
        let url = format!("{}{}", self.base_url, OLLAMA_GENERATE_PATH);
        let request_body = self.get_request(prompt);

        log::debug!("📦 Request model: {}", request_body.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalyzerError::upstream_error(SERVICE_NAME, None, &e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ Ollama API error response ({}): {}", status, error_text);
            return Err(AnalyzerError::upstream_error(SERVICE_NAME, Some(status.as_u16()), &error_text));
        }

        let status = response.status().as_u16();
        let body: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::upstream_error(SERVICE_NAME, Some(status), &format!("Malformed generate payload: {}", e)))?;

        body.response
            .ok_or_else(|| AnalyzerError::upstream_error(SERVICE_NAME, Some(status), "No 'response' field in generate payload"))
    }
}

#[async_trait]
impl SuggestionProvider for OllamaClient {
    async fn get_suggestion(&self, issue: &Issue) -> AnalyzerResult<String> {
        self.generate(build_issue_prompt(issue)).await
    }
}
