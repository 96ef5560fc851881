pub mod issue_source;
pub mod suggestion_provider;
