//! Fetches unresolved SonarQube issues, asks a local Ollama model for a fix for each one,
//! and publishes the answers as JSON, Markdown and HTML reports.
//!
//! The same pipeline backs the `sonar-analyzer` CLI and the HTTP API in [`server`].

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod prompts;
pub mod server;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
