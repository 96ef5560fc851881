use async_trait::async_trait;
use crate::errors::AnalyzerResult;
use crate::structs::issue::Issue;

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn get_suggestion(&self, issue: &Issue) -> AnalyzerResult<String>;
}
