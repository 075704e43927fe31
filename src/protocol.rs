//! JSON request/response types exchanged with the chat front end.

use crate::submission::{Route, Submission, SummaryMode};
use serde::{Deserialize, Serialize};

/// Protocol version reported in every response
pub const PROTOCOL_VERSION: &str = "1.0";

/// A chat message submitted by the front end
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Raw user text (trimmed by the responder)
    pub text: String,

    /// Summarization mode for text that is forwarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SummaryMode>,
}

/// What the front end should do with the message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Always "1.0"
    pub version: String,

    /// "answer", "summarize" or "rejected"
    pub route: String,

    /// Canned answer to render (route = answer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Closest knowledge base question, accepted or not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_question: Option<String>,

    /// Match score of `matched_question` (0.0 to 1.0)
    pub score: f64,

    /// Threshold the score was held to
    pub threshold: f64,

    /// Char count of the trimmed text
    pub length: usize,

    /// Summarization mode (route = summarize)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SummaryMode>,

    /// Message for the user (route = rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Submission<'_>> for ChatResponse {
    fn from(submission: &Submission<'_>) -> Self {
        let (answer, mode) = match submission.route {
            Route::Answer(entry) => (Some(entry.answer().to_string()), None),
            Route::Summarize(mode) => (None, Some(mode)),
            Route::Rejected => (None, None),
        };

        Self {
            version: PROTOCOL_VERSION.to_string(),
            route: submission.route.as_str().to_string(),
            answer,
            matched_question: submission.matched.best_question().map(str::to_string),
            score: submission.matched.score,
            threshold: submission.matched.threshold,
            length: submission.length,
            mode,
            message: submission.message.clone(),
        }
    }
}
