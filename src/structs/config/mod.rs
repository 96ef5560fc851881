pub mod config;
pub mod ollama_config;
pub mod output_config;
pub mod server_config;
pub mod sonar_config;
