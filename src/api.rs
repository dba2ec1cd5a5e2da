//! OpenAI-compatible analysis client.
//!
//! One awaited chat-completion request per call: no retry scheduling, no
//! streaming. Sampling temperature stays low because this is summarization,
//! not generation. Transport and API failures map to
//! [`DigestError::Analysis`]; callers display those and never store them as
//! valid analysis text.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};

use crate::error::DigestError;
use crate::utils::truncate_for_log;

/// Default chat-completions endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1/chat/completions";

/// Focus phrase applied when the user supplies none.
pub const DEFAULT_FOCUS: &str = "identify and summarize the main subtopics";

const ANALYSIS_MAX_TOKENS: u32 = 2000;
/// Follow-up answers are expected to be narrower than the initial analysis.
const ANSWER_MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnalysisClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Summarize a normalized thread, anchored to the focus phrase.
    ///
    /// The prompt template asks for a 5-10 word topic statement, detection of
    /// a primary question, and a bulleted subtopic breakdown.
    #[instrument(level = "info", skip_all)]
    pub async fn analyze(&self, content: &str, focus: &str) -> Result<String, DigestError> {
        let focus = if focus.trim().is_empty() {
            DEFAULT_FOCUS
        } else {
            focus
        };
        let prompt = format!(
            "Analyze this Reddit thread and answer:\n\n\
             1. What is the main topic? (in 5-10 words)\n\
             2. Is there a primary question? (yes/no, and which)\n\
             3. List the detected subtopics, each with a headline and a bulleted summary\n\n\
             The analysis must focus on: {focus}\n\n\
             CONTENT:\n{content}\n"
        );
        self.complete(&prompt, ANALYSIS_MAX_TOKENS).await
    }

    /// Answer a follow-up question using only the cached thread and analysis.
    #[instrument(level = "info", skip_all)]
    pub async fn answer(
        &self,
        thread_text: &str,
        analysis: &str,
        question: &str,
    ) -> Result<String, DigestError> {
        let prompt = format!(
            "Thread context:\n{thread_text}\n\n\
             Prior analysis:\n{analysis}\n\n\
             User question: {question}\n\n\
             Answer using only the information in the thread above."
        );
        self.complete(&prompt, ANSWER_MAX_TOKENS).await
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DigestError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DigestError::Analysis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_for_log(&body, 200), "Completion request rejected");
            return Err(DigestError::Analysis(format!(
                "API returned {status}: {}",
                truncate_for_log(&body, 200)
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DigestError::Analysis(format!("unreadable completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DigestError::Analysis("completion response has no choices".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}
