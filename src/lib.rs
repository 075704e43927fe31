//! FAQ responder for FutureScribe AI
//!
//! Decides whether a chat message is one of the known questions and, if so,
//! answers it directly instead of sending the text off for summarization.
//!
//! # Matching
//! - Tokenize: lowercase, strip everything but `[a-z0-9]`, split on whitespace
//! - Score each question: mean over input words of their best Levenshtein
//!   similarity to any question word
//! - Keep the best question (first one wins ties)
//! - Accept if the score reaches 0.3 (up to 5 words) or 0.5 (longer input)
//!
//! # Routing
//! Unanswered messages between 500 and 4000 characters go to the summarizer;
//! anything else is bounced with a length message.

pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod protocol;
pub mod scorer;
pub mod similarity;
pub mod submission;
pub mod threshold;
pub mod tokenizer;

pub use error::{ResponderError, Result};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use matcher::{MatchResult, Matcher};
pub use protocol::{ChatRequest, ChatResponse};
pub use scorer::score;
pub use similarity::{levenshtein, similarity};
pub use submission::{LengthPolicy, Route, Submission, SubmissionHandler, SummaryMode};
pub use threshold::{threshold, ThresholdPolicy};
pub use tokenizer::tokenize;
