use async_trait::async_trait;

use crate::error::LlmError;

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` and returns the reply's text segments joined by newline.
    ///
    /// `web_search` asks the service to consult live web results first.
    async fn generate(&self, prompt: &str, web_search: bool) -> Result<String, LlmError>;

    fn name(&self) -> &str;
}
