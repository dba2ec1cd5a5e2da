//! Conversation state for one analyzed thread.
//!
//! The session owns the current [`ThreadRecord`], the stored analysis, and
//! the ordered chat history. There are no process-wide singletons: a new
//! acquisition builds a fresh session, which atomically replaces the analysis
//! and history along with the record.

use crate::api::AnalysisClient;
use crate::error::DigestError;
use crate::models::{Exchange, Role, ThreadRecord};

/// One fetch-analyze-chat session.
#[derive(Debug)]
pub struct ChatSession {
    record: ThreadRecord,
    analysis: String,
    history: Vec<Exchange>,
}

impl ChatSession {
    pub fn new(record: ThreadRecord) -> Self {
        Self {
            record,
            analysis: String::new(),
            history: Vec::new(),
        }
    }

    pub fn record(&self) -> &ThreadRecord {
        &self.record
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Store a successful analysis. Failed analysis results must never reach
    /// this; callers display the error instead.
    pub fn set_analysis(&mut self, text: String) {
        self.analysis = text;
    }

    /// Ask a follow-up question against the cached thread.
    ///
    /// The user exchange is appended unconditionally so the input survives a
    /// failing completion call; the assistant exchange is appended only on
    /// success. On failure the history gains no placeholder answer; the
    /// error goes back to the caller for display.
    pub async fn ask(
        &mut self,
        client: &AnalysisClient,
        question: &str,
    ) -> Result<String, DigestError> {
        self.history.push(Exchange {
            role: Role::User,
            text: question.to_string(),
        });

        let answer = client
            .answer(&self.record.normalized_text, &self.analysis, question)
            .await?;

        self.history.push(Exchange {
            role: Role::Assistant,
            text: answer.clone(),
        });
        Ok(answer)
    }

    /// Clear the transcript; the record and analysis stay untouched.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
