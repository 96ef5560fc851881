use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio_stream::wrappers::UnboundedReceiverStream;
use warp::http::{header, Response, StatusCode};
use warp::reply::Reply;
use warp::Filter;
use crate::config::constants::{ARCHIVE_FILE_NAME, VALID_ISSUE_TYPES};
use crate::enums::progress_event::ProgressEvent;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::server::api_docs::openapi_document;
use crate::services::analysis_orchestrator::AnalysisOrchestrator;
use crate::services::archive_exporter::ArchiveExporter;
use crate::services::progress_channel::ProgressChannel;
use crate::services::result_writer::ResultWriter;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::config::config::Config;
use crate::traits::issue_source::IssueSource;
use crate::traits::suggestion_provider::SuggestionProvider;

/// Long-lived collaborators shared by every request.
pub struct AppState {
    pub issue_source: Arc<dyn IssueSource>,
    pub suggestion_provider: Arc<dyn SuggestionProvider>,
    pub results_root: PathBuf,
}

impl AppState {
    pub fn orchestrator(&self) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(
            Arc::clone(&self.issue_source),
            Arc::clone(&self.suggestion_provider),
            ResultWriter::new(self.results_root.clone()),
        )
    }

    /// Checks that the request's keys map onto usable output directories.
    pub fn validate_output_location(&self, request: &AnalysisRequest) -> AnalyzerResult<()> {
        let project_key = request.project_key()?;
        let writer = ResultWriter::new(self.results_root.clone());

        match request.filter().issue_key {
            Some(issue_key) => writer.issue_directory(project_key, &issue_key).map(|_| ()),
            None => writer.project_directory(project_key).map(|_| ()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub stream: Option<bool>,
}

pub struct AnalyzerServer {
    state: Arc<AppState>,
}

impl AnalyzerServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub async fn run(&self, config: &Config) -> AnalyzerResult<()> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| AnalyzerError::config_error(&format!("Invalid listen address: {}", e), Some("Check server.host and PORT")))?;

        std::fs::create_dir_all(&self.state.results_root)?;

        log::info!("🌐 Server is running on {}", addr);
        log::info!("🔗 Sonar URL: {}", config.sonar.url);
        log::info!("🤖 Ollama URL: {} (model {})", config.ollama.url, config.ollama.model);
        log::info!("📁 Results will be saved in: {}", self.state.results_root.display());
        log::info!("🏷️ Valid issue types: {}", VALID_ISSUE_TYPES.join(", "));

        let (_, server) = warp::serve(routes(Arc::clone(&self.state)))
            .try_bind_with_graceful_shutdown(addr, async {
                tokio::signal::ctrl_c().await.ok();
                log::info!("🛑 Shutting down server...");
            })
            .map_err(|e| AnalyzerError::config_error(&format!("Failed to bind {}: {}", addr, e), None))?;

        server.await;
        log::info!("✅ Server shutdown complete");
        Ok(())
    }
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    let results_root = state.results_root.clone();
    let state_filter = warp::any().map(move || Arc::clone(&state));

    let analyze = warp::path!("api" / "analyze")
        .and(warp::post())
        .and(warp::query::<AnalyzeQuery>())
        .and(warp::body::json::<AnalysisRequest>())
        .and(state_filter.clone())
        .and_then(analyze_handler);

    let download = warp::path!("api" / "results.zip")
        .and(warp::get())
        .and(state_filter)
        .and_then(results_zip_handler);

    let health = warp::path!("api" / "health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    let docs = warp::path!("api-docs")
        .and(warp::get())
        .map(|| warp::reply::json(&openapi_document()));

    let results_files = warp::path("results").and(warp::fs::dir(results_root));

    analyze
        .or(download)
        .or(health)
        .or(docs)
        .or(results_files)
        .with(warp::cors()
            .allow_any_origin()
            .allow_headers(vec!["content-type"])
            .allow_methods(vec!["GET", "POST"]))
}

fn error_reply(error: &AnalyzerError) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&error.to_body()), error.http_status()).into_response()
}

async fn analyze_handler(
    query: AnalyzeQuery,
    request: AnalysisRequest,
    state: Arc<AppState>,
) -> Result<warp::reply::Response, Infallible> {
    if request.project_key().is_err() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "error": "Project key is required" })),
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    // Key checks happen before the event stream opens
    if let Err(e) = state.validate_output_location(&request) {
        log::warn!("⚠️ Rejected analysis request: {}", e);
        return Ok(error_reply(&e));
    }

    if query.stream.unwrap_or(true) {
        Ok(stream_analysis(request, state))
    } else {
        Ok(batch_analysis(request, state).await)
    }
}

fn stream_analysis(request: AnalysisRequest, state: Arc<AppState>) -> warp::reply::Response {
    let (channel, rx) = ProgressChannel::streaming();
    let orchestrator = state.orchestrator();

    tokio::spawn(async move {
        if let Err(e) = orchestrator.run(&request, &channel).await {
            log::warn!("⚠️ Streamed analysis ended early: {}", e);
        }
    });

    let events = UnboundedReceiverStream::new(rx).map(|event: ProgressEvent| {
        let sse = warp::sse::Event::default().event(event.event_name());
        Ok::<_, Infallible>(sse.json_data(&event).unwrap_or_else(|e| {
            warp::sse::Event::default()
                .event("error")
                .data(json!({ "type": "error", "message": e.to_string() }).to_string())
        }))
    });

    let reply = warp::sse::reply(warp::sse::keep_alive().stream(events));
    let reply = warp::reply::with_header(reply, header::CACHE_CONTROL, "no-cache");
    warp::reply::with_header(reply, "X-Accel-Buffering", "no").into_response()
}

async fn batch_analysis(request: AnalysisRequest, state: Arc<AppState>) -> warp::reply::Response {
    match state.orchestrator().run(&request, &ProgressChannel::silent()).await {
        Ok(result) => warp::reply::json(&result).into_response(),
        Err(e) => error_reply(&e),
    }
}

async fn results_zip_handler(state: Arc<AppState>) -> Result<warp::reply::Response, Infallible> {
    let exporter = ArchiveExporter::new(state.results_root.clone());

    let archive = match tokio::task::spawn_blocking(move || exporter.build_archive()).await {
        Ok(result) => result,
        Err(e) => Err(AnalyzerError::io_error("archive creation", &e.to_string())),
    };

    let bytes = match archive {
        Ok(bytes) => bytes,
        Err(e @ AnalyzerError::NotFoundError { .. }) => {
            log::error!("❌ {}", e);
            return Ok(warp::reply::with_status("Results directory not found", StatusCode::NOT_FOUND).into_response());
        }
        Err(e) => {
            log::error!("❌ Archive error: {}", e);
            return Ok(warp::reply::with_status("Error creating zip file", StatusCode::INTERNAL_SERVER_ERROR).into_response());
        }
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", ARCHIVE_FILE_NAME))
        .body(bytes);

    Ok(match response {
        Ok(response) => response.into_response(),
        Err(e) => {
            log::error!("❌ Failed to build archive response: {}", e);
            warp::reply::with_status("Error creating zip file", StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    })
}
