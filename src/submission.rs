//! Chat submission routing.
//!
//! Decides what happens to a message: answer it from the knowledge base,
//! hand it to the summarizer, or bounce it back because its length is out of
//! range. The summarizer itself lives elsewhere; this only picks the route.

use crate::error::{ResponderError, Result};
use crate::knowledge::KnowledgeEntry;
use crate::matcher::{MatchResult, Matcher};
use crate::protocol::ChatRequest;
use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Shortest text (in chars) worth summarizing
pub const DEFAULT_MIN_CHARS: usize = 500;

/// Longest text (in chars) the summarizer accepts
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Summarization strategy requested from the summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Generate new sentences (LLM-backed)
    #[default]
    Abstractive,
    /// Pick the highest-ranked original sentences
    Extractive,
}

impl SummaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMode::Abstractive => "abstractive",
            SummaryMode::Extractive => "extractive",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive char-count window for text sent to the summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPolicy {
    min_chars: usize,
    max_chars: usize,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl LengthPolicy {
    pub fn new(min_chars: usize, max_chars: usize) -> Result<Self> {
        if min_chars > max_chars {
            return Err(ResponderError::InvalidLengthPolicy {
                min: min_chars,
                max: max_chars,
            });
        }
        Ok(Self {
            min_chars,
            max_chars,
        })
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn allows(&self, length: usize) -> bool {
        (self.min_chars..=self.max_chars).contains(&length)
    }

    /// User-facing explanation for a rejected length
    pub fn rejection_message(&self, length: usize) -> String {
        format!(
            "Please ensure your text is between {} and {} characters. Current length: {}",
            self.min_chars, self.max_chars, length
        )
    }
}

/// Where a submitted message goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'kb> {
    /// Reply with a canned answer
    Answer(&'kb KnowledgeEntry),
    /// Forward the text to the summarizer
    Summarize(SummaryMode),
    /// Length out of range and no canned answer
    Rejected,
}

impl Route<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Answer(_) => "answer",
            Route::Summarize(_) => "summarize",
            Route::Rejected => "rejected",
        }
    }
}

/// A routed message
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<'kb> {
    /// Trimmed text
    pub text: String,
    /// Char count of `text`
    pub length: usize,
    pub route: Route<'kb>,
    pub matched: MatchResult<'kb>,
    /// Set when the route is `Rejected`
    pub message: Option<String>,
}

/// Routes chat messages between canned answers and the summarizer
#[derive(Debug, Clone, Copy)]
pub struct SubmissionHandler<'kb> {
    matcher: Matcher<'kb>,
    policy: LengthPolicy,
    default_mode: SummaryMode,
}

impl<'kb> SubmissionHandler<'kb> {
    pub fn new(matcher: Matcher<'kb>) -> Self {
        Self {
            matcher,
            policy: LengthPolicy::default(),
            default_mode: SummaryMode::default(),
        }
    }

    pub fn with_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_mode(mut self, mode: SummaryMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Route `raw`, summarizing in `mode` (or the handler default) if it gets that far
    pub fn submit(&self, raw: &str, mode: Option<SummaryMode>) -> Submission<'kb> {
        let text = raw.trim().to_string();
        let length = text.chars().count();
        let matched = self.matcher.evaluate(&text);

        let (route, message) = if let Some(entry) = matched.accepted() {
            (Route::Answer(entry), None)
        } else if self.policy.allows(length) {
            (Route::Summarize(mode.unwrap_or(self.default_mode)), None)
        } else {
            (Route::Rejected, Some(self.policy.rejection_message(length)))
        };

        debug!("Routed {} chars to {}", length, route.as_str());

        Submission {
            text,
            length,
            route,
            matched,
            message,
        }
    }

    /// Route many requests in parallel; results keep the input order
    pub fn submit_batch(&self, requests: &[ChatRequest]) -> Vec<Submission<'kb>> {
        requests
            .par_iter()
            .map(|request| self.submit(&request.text, request.mode))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::from_pairs([
            ("what is your name?", "My name is FutureScribe AI."),
            ("can you summarize text?", "Yes, I can summarize text."),
        ])
        .unwrap()
    }

    fn text_of_len(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn test_known_question_is_answered() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb));
        let submission = handler.submit("  What is your name?  ", None);

        assert_eq!(submission.text, "What is your name?");
        assert_eq!(submission.length, 18);
        match submission.route {
            Route::Answer(entry) => assert_eq!(entry.answer(), "My name is FutureScribe AI."),
            other => panic!("expected answer, got {:?}", other),
        }
        assert!(submission.message.is_none());
    }

    #[test]
    fn test_short_unknown_text_is_rejected() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb));
        let submission = handler.submit("qqqq zzzz", None);

        assert_eq!(submission.route, Route::Rejected);
        assert_eq!(
            submission.message.as_deref(),
            Some("Please ensure your text is between 500 and 4000 characters. Current length: 9")
        );
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb));
        let submission = handler.submit("   ", None);
        assert_eq!(submission.length, 0);
        assert_eq!(submission.route, Route::Rejected);
    }

    #[test]
    fn test_length_window_is_inclusive() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb));

        assert_eq!(handler.submit(&text_of_len(499), None).route, Route::Rejected);
        assert_eq!(
            handler.submit(&text_of_len(500), None).route,
            Route::Summarize(SummaryMode::Abstractive)
        );
        assert_eq!(
            handler.submit(&text_of_len(4000), None).route,
            Route::Summarize(SummaryMode::Abstractive)
        );
        assert_eq!(handler.submit(&text_of_len(4001), None).route, Route::Rejected);
    }

    #[test]
    fn test_request_mode_overrides_default() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb)).with_mode(SummaryMode::Extractive);
        let long = text_of_len(800);

        assert_eq!(
            handler.submit(&long, None).route,
            Route::Summarize(SummaryMode::Extractive)
        );
        assert_eq!(
            handler.submit(&long, Some(SummaryMode::Abstractive)).route,
            Route::Summarize(SummaryMode::Abstractive)
        );
    }

    #[test]
    fn test_length_counts_chars() {
        let kb = kb();
        let policy = LengthPolicy::new(3, 5).unwrap();
        let handler = SubmissionHandler::new(Matcher::new(&kb)).with_policy(policy);
        // Five chars, ten bytes
        let submission = handler.submit("ééééé", None);
        assert_eq!(submission.length, 5);
        assert_eq!(submission.route, Route::Summarize(SummaryMode::Abstractive));
    }

    #[test]
    fn test_invalid_policy() {
        let err = LengthPolicy::new(10, 5).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidLengthPolicy { min: 10, max: 5 }));
        assert!(LengthPolicy::new(5, 5).is_ok());
    }

    #[test]
    fn test_batch_preserves_order() {
        let kb = kb();
        let handler = SubmissionHandler::new(Matcher::new(&kb));
        let requests: Vec<ChatRequest> = (0..64)
            .map(|i| ChatRequest {
                text: if i % 2 == 0 {
                    "what is your name".to_string()
                } else {
                    format!("{} zzzz", i)
                },
                mode: None,
            })
            .collect();

        let submissions = handler.submit_batch(&requests);
        assert_eq!(submissions.len(), requests.len());
        for (request, submission) in requests.iter().zip(&submissions) {
            assert_eq!(submission.text, request.text);
            assert_eq!(submission, &handler.submit(&request.text, request.mode));
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(SummaryMode::Abstractive.to_string(), "abstractive");
        assert_eq!(SummaryMode::Extractive.as_str(), "extractive");
        assert_eq!(SummaryMode::default(), SummaryMode::Abstractive);
    }
}
