//! Turning parse errors into diagnostics.

use glow_common::Span;
use glow_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use glow_lexer::{LexError, TokenKind};

use crate::failure::{expected_kinds, failing_rules};
use crate::{FailureAttempt, GrammarError, ParseError};

/// "expected `*`, `+` or `)`, found end of file", from the deepest attempts.
pub fn expected_message(failures: &[FailureAttempt]) -> Option<String> {
    let first = failures.first()?;
    Some(format!(
        "expected {}, found {}",
        join_expected(&expected_kinds(failures)),
        first.offending.describe()
    ))
}

fn join_expected(kinds: &[TokenKind]) -> String {
    let described: Vec<String> = kinds.iter().map(TokenKind::describe).collect();
    match described.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

fn quoted_list(names: &[&str]) -> String {
    names.iter().map(|n| format!("`{n}`")).collect::<Vec<_>>().join(", ")
}

impl GrammarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GrammarError::UnknownRule(_) => ErrorCode::UnknownRule,
            GrammarError::DanglingReference { .. } => ErrorCode::DanglingReference,
            GrammarError::LeftRecursion { .. } => ErrorCode::LeftRecursion,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(DiagnosticKind::Grammar, Span::DUMMY, self.to_string()).with_code(self.code())
    }
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.code(),
            ParseError::Grammar(err) => err.code(),
            ParseError::RecursionLimit { .. } => ErrorCode::RecursionLimit,
            ParseError::NoMatch { .. } => ErrorCode::UnexpectedToken,
            ParseError::TrailingInput { .. } => ErrorCode::TrailingInput,
        }
    }

    /// Where the error is, if it points into the source.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(LexError::UnexpectedCharacter { span, .. }) => Some(*span),
            ParseError::NoMatch { at, failures, .. } => {
                Some(failures.first().map_or(at.span, |f| f.offending.span))
            }
            ParseError::TrailingInput { token, failures, .. } => {
                Some(failures.first().map_or(token.span, |f| f.offending.span))
            }
            ParseError::Lex(LexError::Config(_))
            | ParseError::Grammar(_)
            | ParseError::RecursionLimit { .. } => None,
        }
    }

    /// Turn the error into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::Grammar(err) => err.to_diagnostic(),
            ParseError::RecursionLimit { .. } => {
                Diagnostic::error(DiagnosticKind::Parser, Span::DUMMY, self.to_string())
                    .with_code(self.code())
            }
            ParseError::NoMatch { rule, at, failures } => match expected_message(failures) {
                Some(message) => {
                    let offending = &failures[0].offending;
                    let expected = join_expected(&expected_kinds(failures));
                    Diagnostic::error(DiagnosticKind::Parser, offending.span, message)
                        .with_code(self.code())
                        .with_label(Label::new(offending.span, format!("expected {expected}")))
                        .with_note(format!(
                            "while matching {}",
                            rule_phrase(&failing_rules(failures))
                        ))
                }
                None => Diagnostic::error(
                    DiagnosticKind::Parser,
                    at.span,
                    format!("expected `{rule}`, found {}", at.describe()),
                )
                .with_code(self.code())
                .with_label(Label::new(at.span, format!("`{rule}` cannot start here"))),
            },
            ParseError::TrailingInput {
                rule,
                token,
                failures,
            } => match expected_message(failures) {
                // a longer match was attempted; its failure is the real problem
                Some(message) => {
                    let offending = &failures[0].offending;
                    let expected = join_expected(&expected_kinds(failures));
                    Diagnostic::error(DiagnosticKind::Parser, offending.span, message)
                        .with_code(ErrorCode::UnexpectedToken)
                        .with_label(Label::new(offending.span, format!("expected {expected}")))
                        .with_note(format!(
                            "a complete `{rule}` ends before {}, at {}",
                            token.describe(),
                            token.pos
                        ))
                }
                None => Diagnostic::error(
                    DiagnosticKind::Parser,
                    token.span,
                    format!("unexpected {} after a complete `{rule}`", token.describe()),
                )
                .with_code(self.code())
                .with_label(Label::new(token.span, "input continues here")),
            },
        }
    }
}

fn rule_phrase(rules: &[&str]) -> String {
    match rules {
        [single] => format!("rule `{single}`"),
        _ => format!("rules {}", quoted_list(rules)),
    }
}
