//! Best-match search over the knowledge base.

use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
use crate::scorer::score;
use crate::threshold::ThresholdPolicy;
use crate::tokenizer::tokenize;
use tracing::debug;

/// Outcome of matching one input against the whole knowledge base
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'kb> {
    /// Highest-scoring entry, if any entry scored above zero
    pub best: Option<&'kb KnowledgeEntry>,
    /// Score of `best` (0.0 when there is none)
    pub score: f64,
    /// Acceptance threshold derived from the input
    pub threshold: f64,
    /// Number of tokens in the input
    pub token_count: usize,
}

impl<'kb> MatchResult<'kb> {
    fn no_match(threshold: f64, token_count: usize) -> Self {
        Self {
            best: None,
            score: 0.0,
            threshold,
            token_count,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.best.is_some() && self.score >= self.threshold
    }

    /// The accepted entry, or `None` when the best candidate fell short
    pub fn accepted(&self) -> Option<&'kb KnowledgeEntry> {
        self.best.filter(|_| self.score >= self.threshold)
    }

    pub fn answer(&self) -> Option<&'kb str> {
        self.accepted().map(KnowledgeEntry::answer)
    }

    pub fn best_question(&self) -> Option<&'kb str> {
        self.best.map(KnowledgeEntry::question)
    }
}

/// Fuzzy question matcher over a read-only knowledge base.
///
/// Holds no mutable state, so one matcher can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'kb> {
    knowledge: &'kb KnowledgeBase,
    thresholds: ThresholdPolicy,
}

impl<'kb> Matcher<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            knowledge,
            thresholds: ThresholdPolicy::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdPolicy) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn knowledge(&self) -> &'kb KnowledgeBase {
        self.knowledge
    }

    /// Score `text` against every entry and keep the best one.
    ///
    /// Later entries replace the current best only on a strictly higher score,
    /// so the first entry wins ties.
    pub fn evaluate(&self, text: &str) -> MatchResult<'kb> {
        let tokens = tokenize(text);
        let threshold = self.thresholds.threshold(tokens.len());

        if tokens.is_empty() {
            debug!("Input has no words, skipping knowledge base scan");
            return MatchResult::no_match(threshold, 0);
        }

        let mut best: Option<&'kb KnowledgeEntry> = None;
        let mut best_score = 0.0;

        for entry in self.knowledge {
            let entry_score = score(&tokens, entry.tokens());
            if entry_score > best_score {
                best = Some(entry);
                best_score = entry_score;
            }
        }

        debug!(
            "Best candidate {:?} scored {:.3} (threshold {:.1}, {} tokens)",
            best.map(KnowledgeEntry::question),
            best_score,
            threshold,
            tokens.len()
        );

        MatchResult {
            best,
            score: best_score,
            threshold,
            token_count: tokens.len(),
        }
    }

    /// Canned answer for `text`, or `None` when nothing clears the threshold
    pub fn answer(&self, text: &str) -> Option<&'kb str> {
        self.evaluate(text).answer()
    }
}
