pub mod ai;
pub mod analysis_request;
pub mod analysis_result;
pub mod cli;
pub mod config;
pub mod issue;
pub mod issue_filter;
pub mod issue_report;
pub mod sonar;
