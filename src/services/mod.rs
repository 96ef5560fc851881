pub mod analysis_orchestrator;
pub mod archive_exporter;
pub mod ollama_client;
pub mod progress_channel;
pub mod report_renderer;
pub mod result_writer;
pub mod sonar_client;
pub mod syntax_highlighter;
