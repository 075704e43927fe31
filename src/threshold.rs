//! Length-adaptive acceptance threshold.
//!
//! Short inputs swing the mean similarity a lot with a single off word, so
//! they get the lower bar; longer inputs are held to a stricter one.

/// Inputs with at most this many tokens count as short
pub const SHORT_INPUT_MAX_TOKENS: usize = 5;

/// Threshold for short inputs
pub const SHORT_INPUT_THRESHOLD: f64 = 0.3;

/// Threshold for everything longer
pub const LONG_INPUT_THRESHOLD: f64 = 0.5;

/// Two-tier threshold keyed on input token count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub short_input_max_tokens: usize,
    pub short_input: f64,
    pub long_input: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            short_input_max_tokens: SHORT_INPUT_MAX_TOKENS,
            short_input: SHORT_INPUT_THRESHOLD,
            long_input: LONG_INPUT_THRESHOLD,
        }
    }
}

impl ThresholdPolicy {
    pub fn threshold(&self, token_count: usize) -> f64 {
        if token_count <= self.short_input_max_tokens {
            self.short_input
        } else {
            self.long_input
        }
    }
}

/// Threshold for `tokens` under the default policy
pub fn threshold<S: AsRef<str>>(tokens: &[S]) -> f64 {
    ThresholdPolicy::default().threshold(tokens.len())
}
