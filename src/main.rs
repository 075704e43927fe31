//! fqr - FAQ responder for FutureScribe AI
//!
//! Answers known questions from the knowledge base and tells the front end
//! whether anything else should be summarized or bounced.
//!
//! # Input
//! - `--text <TEXT>`: a single message
//! - stdin: one JSON request `{"text": "...", "mode": "abstractive"}`
//! - stdin with `--batch`: JSON Lines, one request per line
//!
//! # Output (via stdout)
//! One JSON response per request with the route (answer, summarize,
//! rejected), the canned answer if any, and the match score/threshold.
//! Logs go to stderr (`RUST_LOG=debug` for per-query detail).

use clap::Parser;
use colored::Colorize;
use faq_responder::submission::{DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS};
use faq_responder::{
    ChatRequest, ChatResponse, KnowledgeBase, LengthPolicy, Matcher, ResponderError, Route,
    Submission, SubmissionHandler, SummaryMode,
};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "fqr", version, about = "Answer FAQ messages or route them to the summarizer")]
struct Cli {
    /// Knowledge base JSON file (default: <config dir>/faq-responder/knowledge-base.json, then built-in)
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Message to answer; a JSON request is read from stdin when omitted
    #[arg(short, long, conflicts_with = "batch")]
    text: Option<String>,

    /// Summarization mode for forwarded text when the request does not name one
    #[arg(short, long, value_enum, default_value_t = SummaryMode::Abstractive)]
    mode: SummaryMode,

    /// Shortest text (chars) forwarded to the summarizer
    #[arg(long, default_value_t = DEFAULT_MIN_CHARS)]
    min_chars: usize,

    /// Longest text (chars) forwarded to the summarizer
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Read JSON Lines requests from stdin and answer each one
    #[arg(long)]
    batch: bool,

    /// Print the knowledge base questions and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ResponderError> {
    let knowledge = KnowledgeBase::resolve(cli.knowledge.as_deref())?;
    info!(
        "Loaded {} questions from knowledge base {:?}",
        knowledge.len(),
        knowledge.name()
    );

    if cli.list {
        for entry in &knowledge {
            println!("{}", entry.question());
        }
        return Ok(());
    }

    let policy = LengthPolicy::new(cli.min_chars, cli.max_chars)?;
    let handler = SubmissionHandler::new(Matcher::new(&knowledge))
        .with_policy(policy)
        .with_mode(cli.mode);

    if cli.batch {
        return run_batch(&handler);
    }

    let request = match &cli.text {
        Some(text) => ChatRequest {
            text: text.clone(),
            mode: None,
        },
        None => read_request()?,
    };

    let submission = handler.submit(&request.text, request.mode);
    log_submission(&submission);

    println!("{}", serde_json::to_string(&ChatResponse::from(&submission))?);

    Ok(())
}

/// Read a single JSON request from stdin
fn read_request() -> Result<ChatRequest, ResponderError> {
    let mut input_json = String::new();
    io::stdin().read_to_string(&mut input_json)?;

    debug!("Received input: {}", input_json);

    Ok(serde_json::from_str(&input_json)?)
}

/// Answer every JSON Lines request on stdin, one response line each, in input order
fn run_batch(handler: &SubmissionHandler<'_>) -> Result<(), ResponderError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let requests = parse_batch(&input)?;
    info!("Processing batch of {} requests", requests.len());

    for submission in handler.submit_batch(&requests) {
        log_submission(&submission);
        println!("{}", serde_json::to_string(&ChatResponse::from(&submission))?);
    }

    Ok(())
}

/// Parse JSON Lines, skipping blank lines; errors carry the 1-based line number
fn parse_batch(input: &str) -> Result<Vec<ChatRequest>, ResponderError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ResponderError::BatchLineParse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Log the routing decision to stderr
fn log_submission(submission: &Submission<'_>) {
    let route = match submission.route {
        Route::Answer(_) => submission.route.as_str().green(),
        Route::Summarize(_) => submission.route.as_str().yellow(),
        Route::Rejected => submission.route.as_str().red(),
    };

    info!(
        "{} {} chars -> {} (best: {}, score: {:.2}, threshold: {:.1})",
        "💬".blue(),
        submission.length,
        route,
        submission
            .matched
            .best_question()
            .unwrap_or("none")
            .bold(),
        submission.matched.score,
        submission.matched.threshold
    );
}
