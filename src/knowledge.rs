//! The knowledge base: an ordered, validated list of question/answer records.
//!
//! A question key may carry several phrasings separated by commas or periods
//! (`"ok, okay"`). It is tokenized as one blob, so every phrasing contributes
//! words to the same token stream. Tokens are computed once here and reused
//! for every query.

use crate::error::{ResponderError, Result};
use crate::tokenizer::tokenize;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Knowledge base file name under the user's config directory
const KNOWLEDGE_FILE: &str = "knowledge-base.json";

/// Application directory name under the platform config dir
const CONFIG_DIR: &str = "faq-responder";

/// FutureScribe AI question set shipped with the binary
const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge-base.json");

/// On-disk knowledge base document
#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    version: String,

    #[serde(default)]
    name: String,

    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    question: String,
    answer: String,
}

/// A validated question/answer pair
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeEntry {
    question: String,
    answer: String,
    tokens: Vec<String>,
}

impl KnowledgeEntry {
    /// Question key exactly as written in the source
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Canned answer (may contain markdown)
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Normalized tokens of the whole question key
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    name: String,
    version: String,
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build from `(question, answer)` pairs, preserving their order.
    ///
    /// Rejects blank questions or answers, questions that produce no tokens,
    /// and exact duplicate questions.
    pub fn from_pairs<I, Q, A>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for (index, (question, answer)) in pairs.into_iter().enumerate() {
            let question: String = question.into();
            let answer: String = answer.into();

            if question.trim().is_empty() {
                return Err(ResponderError::EmptyQuestion { index });
            }
            if answer.trim().is_empty() {
                return Err(ResponderError::EmptyAnswer { index, question });
            }
            let tokens = tokenize(&question);
            if tokens.is_empty() {
                return Err(ResponderError::UnmatchableQuestion { index, question });
            }
            if !seen.insert(question.clone()) {
                return Err(ResponderError::DuplicateQuestion { index, question });
            }

            entries.push(KnowledgeEntry {
                question,
                answer,
                tokens,
            });
        }

        Ok(Self {
            name: String::new(),
            version: String::new(),
            entries,
        })
    }

    /// Parse and validate a knowledge base JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let file: KnowledgeFile = serde_json::from_str(content)
            .map_err(|e| ResponderError::KnowledgeParse(e.to_string()))?;

        let mut kb = Self::from_pairs(file.entries.into_iter().map(|e| (e.question, e.answer)))?;
        kb.name = file.name;
        kb.version = file.version;

        if kb.is_empty() {
            warn!("Knowledge base {:?} has no entries; every query will go unanswered", kb.name);
        }
        Ok(kb)
    }

    /// The FutureScribe AI question set compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_KNOWLEDGE)
    }

    /// Load and validate a knowledge base file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResponderError::KnowledgeNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ResponderError::KnowledgeRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Pick the knowledge base to serve.
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present, otherwise the built-in set.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading knowledge base from: {:?}", path);
            return Self::load(path);
        }

        match default_path() {
            Some(path) if path.exists() => {
                debug!("Loading knowledge base from: {:?}", path);
                Self::load(&path)
            }
            Some(path) => {
                info!("No knowledge base at {:?}, using built-in set", path);
                Self::builtin()
            }
            None => {
                warn!("Config directory not found, using built-in knowledge base");
                Self::builtin()
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KnowledgeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a KnowledgeEntry;
    type IntoIter = std::slice::Iter<'a, KnowledgeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// `<config_dir>/faq-responder/knowledge-base.json`, if the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(KNOWLEDGE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_loads_in_order() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.len(), 26);
        assert_eq!(kb.name(), "FutureScribe AI");
        assert_eq!(kb.entries()[0].question(), "what is your name?");
        assert_eq!(kb.entries()[1].question(), "ok, okay");
        assert_eq!(
            kb.entries()[25].question(),
            "how much text can the summarizer tool handle at once?"
        );
    }

    #[test]
    fn test_synonym_key_tokens() {
        let kb = KnowledgeBase::from_pairs([("ok, okay", "Roger that!")]).unwrap();
        assert_eq!(kb.entries()[0].tokens(), &["ok", "okay"]);
    }

    #[test]
    fn test_rejects_empty_question() {
        let err = KnowledgeBase::from_pairs([("hi", "hello"), ("  ", "answer")]).unwrap_err();
        assert!(matches!(err, ResponderError::EmptyQuestion { index: 1 }));
    }

    #[test]
    fn test_rejects_empty_answer() {
        let err = KnowledgeBase::from_pairs([("hi", "")]).unwrap_err();
        assert!(matches!(err, ResponderError::EmptyAnswer { index: 0, .. }));
    }

    #[test]
    fn test_rejects_question_without_words() {
        let err = KnowledgeBase::from_pairs([("?!?", "answer")]).unwrap_err();
        assert!(matches!(err, ResponderError::UnmatchableQuestion { index: 0, .. }));
    }

    #[test]
    fn test_rejects_duplicate_question() {
        let err = KnowledgeBase::from_pairs([("hi", "a"), ("hello", "b"), ("hi", "c")]).unwrap_err();
        assert!(matches!(err, ResponderError::DuplicateQuestion { index: 2, .. }));
    }

    #[test]
    fn test_from_json_defaults_metadata() {
        let kb = KnowledgeBase::from_json(r#"{"entries": [{"question": "a b", "answer": "c"}]}"#)
            .unwrap();
        assert_eq!(kb.name(), "");
        assert_eq!(kb.version(), "");
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = KnowledgeBase::from_json(r#"{"entries": {"a": "b"}}"#).unwrap_err();
        assert!(matches!(err, ResponderError::KnowledgeParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "2", "name": "custom", "entries": [{{"question": "where are you?", "answer": "Here."}}]}}"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.name(), "custom");
        assert_eq!(kb.version(), "2");
        assert_eq!(kb.entries()[0].answer(), "Here.");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = KnowledgeBase::load(&path).unwrap_err();
        assert!(matches!(err, ResponderError::KnowledgeNotFound(p) if p == path));
    }

    #[test]
    fn test_resolve_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(KnowledgeBase::resolve(Some(&path)).is_err());
    }
}
