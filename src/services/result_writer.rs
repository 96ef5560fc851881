use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::fs;
use crate::config::constants::{REPORT_FILE_NAME, RESULT_FILE_NAME, SOLUTION_FILE_NAME};
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::services::report_renderer::ReportRenderer;
use crate::structs::issue::Issue;
use crate::structs::issue_report::IssueReport;

// Everything but ASCII alphanumerics, `-`, `_` and `.` is escaped, `%` included
const PATH_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Persists reports as `results_root/{project}/{issue}/{result.json,solution.md,report.html}`.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    results_root: PathBuf,
}

impl ResultWriter {
    pub fn new(results_root: impl Into<PathBuf>) -> Self {
        Self {
            results_root: results_root.into(),
        }
    }

    pub fn results_root(&self) -> &Path {
        &self.results_root
    }

    pub fn project_directory(&self, project_key: &str) -> AnalyzerResult<PathBuf> {
        Ok(self.results_root.join(sanitize_path_component("projectKey", project_key)?))
    }

    pub fn issue_directory(&self, project_key: &str, issue_key: &str) -> AnalyzerResult<PathBuf> {
        Ok(self
            .project_directory(project_key)?
            .join(sanitize_path_component("issueKey", issue_key)?))
    }

    /// Deletes and recreates the project's output directory.
    pub async fn reset_project_directory(&self, project_key: &str) -> AnalyzerResult<PathBuf> {
        let dir = self.project_directory(project_key)?;
        recreate_directory(&dir).await?;
        Ok(dir)
    }

    /// Deletes and recreates a single issue's output directory.
    pub async fn reset_issue_directory(&self, project_key: &str, issue_key: &str) -> AnalyzerResult<PathBuf> {
        let dir = self.issue_directory(project_key, issue_key)?;
        recreate_directory(&dir).await?;
        Ok(dir)
    }

    /// Writes all artifacts for one issue and returns its directory.
    pub async fn persist(&self, project_key: &str, issue: &Issue, solution: &str) -> AnalyzerResult<PathBuf> {
        let dir = self.issue_directory(project_key, &issue.key)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AnalyzerError::io_error(&format!("creating {}", dir.display()), &e.to_string()))?;

        let report = IssueReport {
            timestamp: Utc::now().to_rfc3339(),
            project_key,
            issue,
            solution,
        };
        let json = serde_json::to_string_pretty(&report)?;
        write_file(&dir.join(RESULT_FILE_NAME), json.as_bytes()).await?;
        write_file(&dir.join(SOLUTION_FILE_NAME), solution.as_bytes()).await?;

        let html = ReportRenderer::render(project_key, issue, solution);
        write_file(&dir.join(REPORT_FILE_NAME), html.as_bytes()).await?;

        log::debug!("💾 Wrote report for {} to {}", issue.key, dir.display());
        Ok(dir)
    }
}

async fn recreate_directory(dir: &Path) -> AnalyzerResult<()> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(AnalyzerError::io_error(&format!("removing {}", dir.display()), &e.to_string())),
    }

    fs::create_dir_all(dir)
        .await
        .map_err(|e| AnalyzerError::io_error(&format!("creating {}", dir.display()), &e.to_string()))
}

async fn write_file(path: &Path, contents: &[u8]) -> AnalyzerResult<()> {
    fs::write(path, contents)
        .await
        .map_err(|e| AnalyzerError::io_error(&format!("writing {}", path.display()), &e.to_string()))
}

/// Maps a Sonar key onto a single directory name.
///
/// The mapping is percent-encoding, so distinct keys never share a directory.
pub fn sanitize_path_component(field: &str, value: &str) -> AnalyzerResult<String> {
    if value.trim().is_empty() || value == "." || value == ".." {
        return Err(AnalyzerError::validation_error(field, &format!("'{}' cannot be used as a directory name", value)));
    }

    Ok(utf8_percent_encode(value, PATH_COMPONENT).to_string())
}
