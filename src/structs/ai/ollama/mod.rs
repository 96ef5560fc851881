pub mod ollama_generate_request;
pub mod ollama_generate_response;
