//! Dialect sniffer.
//!
//! Each dialect contributes zero or more weighted regex signals via
//! [`crate::format::Format::signals`]. A dialect's score is the sum of
//! `weight * log2(occurrences + 1)` over its signals, so repeated matches
//! boost the score with diminishing returns and a single distinctive
//! signal can outrank a prolific weak one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::FormatRegistry;

/// The dialect returned when nothing scores above zero.
pub const DEFAULT_FORMAT: &str = "gfm";

/// One weighted detection pattern.
///
/// The regex is compiled on first use so signal tables can live in
/// statics inside each dialect module.
pub struct Signal {
    pattern: Lazy<Regex>,
    weight: f64,
}

impl Signal {
    pub const fn new(weight: f64, build: fn() -> Regex) -> Signal {
        Signal {
            pattern: Lazy::new(build),
            weight,
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Guess the most likely source dialect for `input`.
///
/// The strictly highest positive score wins; ties go to the
/// earlier-registered dialect. Empty input and zero-signal input both
/// return [`DEFAULT_FORMAT`].
pub fn detect_format<'a>(registry: &'a FormatRegistry, input: &str) -> &'a str {
    if input.trim().is_empty() {
        return DEFAULT_FORMAT;
    }

    let mut best_id = DEFAULT_FORMAT;
    let mut best_score = 0.0_f64;
    for format in registry.formats() {
        let score = score_signals(format.signals(), input);
        if score > best_score {
            best_score = score;
            best_id = format.id();
        }
    }
    best_id
}

fn score_signals(signals: &[Signal], input: &str) -> f64 {
    let mut score = 0.0;
    for signal in signals {
        let count = signal.pattern().find_iter(input).count();
        if count > 0 {
            score += signal.weight() * ((count + 1) as f64).log2();
        }
    }
    score
}
