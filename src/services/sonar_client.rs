use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use crate::config::constants::{
    timeout_duration_secs, SONAR_MAX_ISSUES, SONAR_PAGE_SIZE, SONAR_SEARCH_PATH,
    SONAR_UNRESOLVED_STATUSES, VALID_ISSUE_TYPES,
};
use crate::enums::sonar_auth::SonarAuth;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::structs::config::sonar_config::SonarConfig;
use crate::structs::issue::Issue;
use crate::structs::issue_filter::IssueFilter;
use crate::structs::sonar::issues_search_response::IssuesSearchResponse;
use crate::traits::issue_source::IssueSource;

const SERVICE_NAME: &str = "Sonar";

#[derive(Clone)]
pub struct SonarClient {
    base_url: String,
    token: Option<String>,
    auth: SonarAuth,
    client: Client,
}

impl SonarClient {
    pub fn new(config: &SonarConfig) -> AnalyzerResult<Self> {
        let client = Client::builder()
            .timeout(timeout_duration_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::config_error(&format!("Failed to build Sonar HTTP client: {}", e), None))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            auth: config.auth,
            client,
        })
    }

    fn build_params(project_key: &str, filter: &IssueFilter, page: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("componentKeys", project_key.to_string()),
            ("statuses", SONAR_UNRESOLVED_STATUSES.to_string()),
            ("ps", SONAR_PAGE_SIZE.to_string()),
            ("p", page.to_string()),
        ];

        if let Some(issue_key) = &filter.issue_key {
            params.push(("issues", issue_key.clone()));
        } else if !filter.issue_types.is_empty() {
            params.push(("types", filter.issue_types.join(",")));
        }

        params
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.token, self.auth) {
            (Some(token), SonarAuth::Basic) => request.basic_auth(token, Some("")),
            (Some(token), SonarAuth::Bearer) => request.bearer_auth(token),
            (None, _) => request,
        }
    }

    async fn fetch_page(&self, params: &[(&'static str, String)]) -> AnalyzerResult<IssuesSearchResponse> {
        let url = format!("{}{}", self.base_url, SONAR_SEARCH_PATH);

        let response = self
            .authorize(self.client.get(&url).query(params))
            .send()
            .await
            .map_err(|e| AnalyzerError::upstream_error(SERVICE_NAME, None, &e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalyzerError::upstream_error(SERVICE_NAME, Some(status.as_u16()), &e.to_string()))?;

        if !status.is_success() {
            log::error!("❌ Sonar API error response ({}): {}", status, body);
            return Err(AnalyzerError::upstream_error(SERVICE_NAME, Some(status.as_u16()), &body));
        }

        let parsed: IssuesSearchResponse = serde_json::from_str(&body).map_err(|e| {
            AnalyzerError::upstream_error(SERVICE_NAME, Some(status.as_u16()), &format!("Malformed issue search payload ({}): {}", e, body))
        })?;

        if parsed.issues.is_none() {
            return Err(AnalyzerError::upstream_error(
                SERVICE_NAME,
                Some(status.as_u16()),
                &format!("Missing 'issues' field in response: {}", body),
            ));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl IssueSource for SonarClient {
    async fn fetch_issues(&self, project_key: &str, filter: &IssueFilter) -> AnalyzerResult<Vec<Issue>> {
        if project_key.trim().is_empty() {
            return Err(AnalyzerError::validation_error("projectKey", "Project key is required"));
        }

        if filter.issue_key.is_none() {
            for issue_type in &filter.issue_types {
                if !VALID_ISSUE_TYPES.contains(&issue_type.as_str()) {
                    log::warn!("⚠️ Unknown issue type '{}' passed through to Sonar", issue_type);
                }
            }
        }

        let mut issues: Vec<Issue> = Vec::new();
        let mut page = 1;

        loop {
            let params = Self::build_params(project_key, filter, page);
            let response = self.fetch_page(&params).await?;
            let total = response.total();
            let batch = response.issues.unwrap_or_default();
            let batch_len = batch.len();
            issues.extend(batch);

            let has_more = total.map_or(false, |t| issues.len() < t);
            if batch_len < SONAR_PAGE_SIZE || !has_more || issues.len() >= SONAR_MAX_ISSUES {
                break;
            }
            page += 1;
        }

        if issues.len() > SONAR_MAX_ISSUES {
            issues.truncate(SONAR_MAX_ISSUES);
        }

        if let Some(issue_key) = &filter.issue_key {
            if issues.is_empty() {
                return Err(AnalyzerError::not_found("Issue", issue_key));
            }
        }

        log::info!("📥 Found {} issues for project {}", issues.len(), project_key);
        Ok(issues)
    }
}
