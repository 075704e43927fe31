use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResponderError>;

#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse request on line {line}: {source}")]
    BatchLineParse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to read knowledge base from {path}: {source}")]
    KnowledgeRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse knowledge base: {0}")]
    KnowledgeParse(String),

    #[error("Knowledge base not found at {0}")]
    KnowledgeNotFound(PathBuf),

    #[error("Knowledge base entry #{index} has an empty question")]
    EmptyQuestion { index: usize },

    #[error("Knowledge base entry #{index} ({question:?}) has an empty answer")]
    EmptyAnswer { index: usize, question: String },

    #[error("Knowledge base entry #{index} ({question:?}) contains no matchable words")]
    UnmatchableQuestion { index: usize, question: String },

    #[error("Knowledge base entry #{index} duplicates question {question:?}")]
    DuplicateQuestion { index: usize, question: String },

    #[error("Invalid length policy: minimum {min} exceeds maximum {max}")]
    InvalidLengthPolicy { min: usize, max: usize },
}
