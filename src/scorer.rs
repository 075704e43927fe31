//! Question-level scoring: how well an input token sequence aligns with a question.

use crate::similarity::similarity;

/// Mean, over input tokens, of each token's best similarity to any question token.
///
/// Word order does not matter. An empty input (or an empty question) scores 0.
pub fn score<I, Q>(input_tokens: &[I], question_tokens: &[Q]) -> f64
where
    I: AsRef<str>,
    Q: AsRef<str>,
{
    if input_tokens.is_empty() || question_tokens.is_empty() {
        return 0.0;
    }

    let total: f64 = input_tokens
        .iter()
        .map(|token| best_alignment(token.as_ref(), question_tokens))
        .sum();

    total / input_tokens.len() as f64
}

/// Highest similarity between `token` and any of `question_tokens`
fn best_alignment<Q: AsRef<str>>(token: &str, question_tokens: &[Q]) -> f64 {
    question_tokens
        .iter()
        .map(|q| similarity(token, q.as_ref()))
        .fold(0.0, f64::max)
}
