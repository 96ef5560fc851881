use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct OllamaGenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub response: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}
