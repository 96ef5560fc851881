pub mod analyzer_server;
pub mod api_docs;
