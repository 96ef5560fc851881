use crate::enums::progress_event::ProgressEvent;
use crate::structs::analysis_result::AnalysisResult;

pub struct ProgressLogger;

impl ProgressLogger {
    pub fn log_event(event: &ProgressEvent) {
        match event {
            ProgressEvent::Started => log::info!("🚀 Analysis started"),
            ProgressEvent::Progress { current, total, current_issue_key, .. } => {
                log::info!("🔎 [{}/{}] {}", current, total, current_issue_key);
            }
            ProgressEvent::IssueProcessed { issue_key, details, .. } => {
                log::info!("   ✅ {}: {}", issue_key, details);
            }
            ProgressEvent::Error { issue_key: Some(issue_key), message } => {
                log::error!("   ❌ {}: {}", issue_key, message);
            }
            ProgressEvent::Error { issue_key: None, message } => log::error!("❌ {}", message),
            ProgressEvent::Complete(result) => log::info!("🏁 {}", result.message),
        }
    }

    pub fn print_summary(result: &AnalysisResult) {
        println!("\n📊 ANALYSIS SUMMARY");
        println!("==================");
        println!("{}", result.message);
        println!("  Total issues:    {}", result.total_issues);
        println!("  Analyzed issues: {}", result.analyzed_issues);

        if !result.errors.is_empty() {
            println!("\n❌ FAILED ISSUES ({}):", result.errors.len());
            for error in &result.errors {
                println!("  • {}: {}", error.issue_key, error.error);
            }
        }
    }
}
