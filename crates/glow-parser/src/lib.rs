//! Grammar-driven parser for Glow.
//!
//! Rules are registered in a [`Grammar`] and matched against a
//! [`glow_lexer::TokenStream`] by a backtracking [`RuleMatcher`]. The result
//! is a [`RuleMatch`] tree whose parts are looked up by label.
//!
//! ## Error Reporting
//!
//! A failed match is not an error by itself; alternatives fail all the time.
//! Every token mismatch is offered to a [`FailureRecord`], which keeps the
//! attempts that got furthest. When the start rule fails as a whole, those
//! attempts become a single "expected ..., found ..." diagnostic.

mod error;
mod failure;
mod glow;
mod grammar;
mod matcher;
mod parser;
mod report;

pub use error::{CaptureError, GrammarError, MatchError, ParseError};
pub use failure::{FailureAttempt, FailureRecord};
pub use glow::{GLOW_START, glow_grammar};
pub use grammar::{Component, Grammar, Pattern, Rule, rule, token};
pub use matcher::{Capture, MatchOptions, RuleMatch, RuleMatcher};
pub use parser::Parser;
pub use report::expected_message;

use std::sync::{Arc, LazyLock};

use glow_common::SourceFile;

static GLOW_PARSER: LazyLock<Parser> = LazyLock::new(Parser::glow);

/// Parse a Glow source file with the built-in grammar.
pub fn parse(source: Arc<SourceFile>) -> Result<RuleMatch<'static>, ParseError> {
    GLOW_PARSER.parse(source, GLOW_START)
}
