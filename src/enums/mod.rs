pub mod commands;
pub mod issue_types;
pub mod progress_event;
pub mod sonar_auth;
