//! Parser error types.

use glow_lexer::{LexError, Token};
use thiserror::Error;

use crate::FailureAttempt;

/// A grammar that cannot be used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar rule `{0}` does not exist")]
    UnknownRule(String),

    #[error("rule `{rule}` references undefined rule `{target}`")]
    DanglingReference { rule: String, target: String },

    #[error("left-recursive rules: {}", .cycle.join(" -> "))]
    LeftRecursion { cycle: Vec<String> },
}

/// A hard failure while matching. Not matching is `Ok(None)`, never an error.
#[derive(Debug, Clone, Error)]
pub enum MatchError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("recursion limit of {limit} reached while matching rule `{rule}` without consuming input")]
    RecursionLimit { rule: String, limit: usize },
}

/// Why a top-level parse failed.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("recursion limit of {limit} reached while matching rule `{rule}` without consuming input")]
    RecursionLimit { rule: String, limit: usize },

    /// The start rule did not match. `failures` holds the deepest attempts,
    /// `at` the first significant token where matching started.
    #[error("no match for rule `{rule}` at {}", .at.pos)]
    NoMatch {
        rule: String,
        at: Token,
        failures: Vec<FailureAttempt>,
    },

    /// The start rule matched but input remains. `failures` holds attempts
    /// that got further than the match, if any.
    #[error("unexpected {} after a complete `{rule}` at {}", .token.describe(), .token.pos)]
    TrailingInput {
        rule: String,
        token: Token,
        failures: Vec<FailureAttempt>,
    },
}

impl From<MatchError> for ParseError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Lex(err) => ParseError::Lex(err),
            MatchError::Grammar(err) => ParseError::Grammar(err),
            MatchError::RecursionLimit { rule, limit } => ParseError::RecursionLimit { rule, limit },
        }
    }
}

/// Looking up a label that the match does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("rule `{rule}` has no captured component `{label}`")]
    NoSuchCapture { rule: String, label: String },

    #[error("component `{label}` of rule `{rule}` is not a {expected}")]
    WrongKind {
        rule: String,
        label: String,
        expected: &'static str,
    },
}
