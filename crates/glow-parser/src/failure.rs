//! Bookkeeping for failed match attempts.
//!
//! Every time a pattern expects one token kind and finds another, the attempt
//! is offered to a [`FailureRecord`]. Only the attempts that got furthest into
//! the input are kept, since those are the ones a user wants to hear about.

use glow_lexer::{Token, TokenKind};

/// One token mismatch inside a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureAttempt {
    /// The rule whose pattern was being matched.
    pub rule: String,
    /// The token that was found instead.
    pub offending: Token,
    pub expected: TokenKind,
    /// Number of tokens successfully matched before this attempt.
    pub depth: usize,
}

/// The deepest failed attempts seen so far.
#[derive(Debug, Clone, Default)]
pub struct FailureRecord {
    attempts: Vec<FailureAttempt>,
    max_depth: Option<usize>,
}

impl FailureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an attempt. A deeper attempt replaces everything recorded, an
    /// equally deep one is added, a shallower one is dropped.
    pub fn add_attempt(&mut self, attempt: FailureAttempt) {
        match self.max_depth {
            Some(max) if attempt.depth < max => {}
            Some(max) if attempt.depth == max => self.attempts.push(attempt),
            _ => {
                self.max_depth = Some(attempt.depth);
                self.attempts.clear();
                self.attempts.push(attempt);
            }
        }
    }

    pub fn attempts(&self) -> &[FailureAttempt] {
        &self.attempts
    }

    pub fn into_attempts(self) -> Vec<FailureAttempt> {
        self.attempts
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }
}

/// Distinct expected kinds, in the order they were first recorded.
pub fn expected_kinds(attempts: &[FailureAttempt]) -> Vec<TokenKind> {
    let mut kinds = Vec::new();
    for attempt in attempts {
        if !kinds.contains(&attempt.expected) {
            kinds.push(attempt.expected);
        }
    }
    kinds
}

/// Distinct rule names, in the order they were first recorded.
pub fn failing_rules(attempts: &[FailureAttempt]) -> Vec<&str> {
    let mut rules: Vec<&str> = Vec::new();
    for attempt in attempts {
        if !rules.contains(&attempt.rule.as_str()) {
            rules.push(&attempt.rule);
        }
    }
    rules
}
