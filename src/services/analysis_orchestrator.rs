use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;
use crate::enums::progress_event::ProgressEvent;
use crate::errors::AnalyzerResult;
use crate::services::progress_channel::ProgressChannel;
use crate::services::result_writer::ResultWriter;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::{AnalysisResult, IssueError};
use crate::structs::issue::Issue;
use crate::structs::issue_filter::IssueFilter;
use crate::traits::issue_source::IssueSource;
use crate::traits::suggestion_provider::SuggestionProvider;

/// Drives one analysis run: fetch, then suggest and persist each issue in order.
///
/// `run` consumes the orchestrator, so an instance can never serve a second run.
pub struct AnalysisOrchestrator {
    issue_source: Arc<dyn IssueSource>,
    suggestion_provider: Arc<dyn SuggestionProvider>,
    writer: ResultWriter,
    run_id: Uuid,
}

impl AnalysisOrchestrator {
    pub fn new(
        issue_source: Arc<dyn IssueSource>,
        suggestion_provider: Arc<dyn SuggestionProvider>,
        writer: ResultWriter,
    ) -> Self {
        Self {
            issue_source,
            suggestion_provider,
            writer,
            run_id: Uuid::new_v4(),
        }
    }

    pub async fn run(self, request: &AnalysisRequest, progress: &ProgressChannel) -> AnalyzerResult<AnalysisResult> {
        let project_key = request.project_key()?;
        self.writer.project_directory(project_key)?;
        let filter = request.filter();

        log::info!("🔍 [{}] Starting analysis for project {}", self.run_id, project_key);
        progress.emit(ProgressEvent::Started);

        let mut issues = match self.prepare(project_key, &filter).await {
            Ok(issues) => issues,
            Err(e) => {
                log::error!("❌ [{}] Analysis of {} failed to start: {}", self.run_id, project_key, e);
                progress.emit(ProgressEvent::Error {
                    issue_key: None,
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        let total = issues.len();
        log::info!("📋 [{}] Found {} issues to analyze", self.run_id, total);

        let mut analyzed = 0;
        let mut errors: Vec<IssueError> = Vec::new();
        let mut cancelled_at: Option<usize> = None;

        for (index, issue) in issues.iter_mut().enumerate() {
            if progress.is_closed() {
                log::warn!("⚠️ [{}] Client disconnected, stopping after {} of {} issues", self.run_id, index, total);
                cancelled_at = Some(index);
                break;
            }

            progress.emit(ProgressEvent::Progress {
                current: index + 1,
                total,
                current_issue_key: issue.key.clone(),
                message: format!("Analyzing issue {} of {}: {}", index + 1, total, issue.key),
            });

            match self.process_issue(project_key, issue).await {
                Ok(dir) => {
                    analyzed += 1;
                    log::info!("✅ [{}] Created report for issue {}", self.run_id, issue.key);
                    progress.emit(ProgressEvent::IssueProcessed {
                        issue_key: issue.key.clone(),
                        status: "completed".to_string(),
                        details: format!("Report saved to {}", dir.display()),
                    });
                }
                Err(e) => {
                    log::error!("❌ [{}] Error analyzing issue {}: {}", self.run_id, issue.key, e);
                    issue.error = Some(e.to_string());
                    errors.push(IssueError {
                        issue_key: issue.key.clone(),
                        error: e.to_string(),
                    });
                    progress.emit(ProgressEvent::Error {
                        issue_key: Some(issue.key.clone()),
                        message: e.to_string(),
                    });
                }
            }
        }

        let message = Self::summary_message(project_key, total, analyzed, errors.len(), cancelled_at);
        log::info!("🏁 [{}] {}", self.run_id, message);

        let result = AnalysisResult {
            total_issues: total,
            analyzed_issues: analyzed,
            errors,
            message,
        };
        progress.emit(ProgressEvent::Complete(result.clone()));

        Ok(result)
    }

    async fn prepare(&self, project_key: &str, filter: &IssueFilter) -> AnalyzerResult<Vec<Issue>> {
        let issues = self.issue_source.fetch_issues(project_key, filter).await?;

        // Single-issue runs only replace that issue's reports
        match &filter.issue_key {
            Some(issue_key) => self.writer.reset_issue_directory(project_key, issue_key).await?,
            None => self.writer.reset_project_directory(project_key).await?,
        };

        Ok(issues)
    }

    async fn process_issue(&self, project_key: &str, issue: &mut Issue) -> AnalyzerResult<PathBuf> {
        log::info!("🤖 [{}] Requesting suggestion for issue {}", self.run_id, issue.key);
        let solution = self.suggestion_provider.get_suggestion(issue).await?;

        let dir = self.writer.persist(project_key, issue, &solution).await?;
        issue.solution = Some(solution);
        Ok(dir)
    }

    fn summary_message(project_key: &str, total: usize, analyzed: usize, failed: usize, cancelled_at: Option<usize>) -> String {
        if let Some(processed) = cancelled_at {
            return format!(
                "Analysis of {} cancelled after {} of {} issues: client disconnected",
                project_key, processed, total
            );
        }

        if total == 0 {
            return format!("No issues found for project {}", project_key);
        }

        if failed == 0 {
            format!("Analysis completed: {} of {} issues analyzed for project {}", analyzed, total, project_key)
        } else {
            format!(
                "Analysis completed with errors: {} of {} issues analyzed, {} failed for project {}",
                analyzed, total, failed, project_key
            )
        }
    }
}
