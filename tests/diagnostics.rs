//! Integration tests for glow-diagnostic crate.

use std::sync::Arc;

use glow_common::SourceFile;
use glow_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, render};
use glow_lexer::TokenStream;
use glow_parser::{Grammar, Parser, parse, rule};

fn render_error(text: &str) -> (Diagnostic, String) {
    let source = Arc::new(SourceFile::from_string("test.glow", text));
    let err = parse(source.clone()).unwrap_err();
    let diag = err.to_diagnostic();
    let rendered = render(source.contents(), source.name(), &diag);
    (diag, rendered)
}

#[test]
fn test_render_no_match() {
    let (diag, rendered) = render_error("var x = (1 + 2;");
    assert_eq!(diag.code, Some(ErrorCode::UnexpectedToken));
    assert!(rendered.contains("E0100"));
    assert!(rendered.contains("found `;`"));
    assert!(rendered.contains("test.glow"));
}

#[test]
fn test_render_lex_error() {
    let (diag, rendered) = render_error("var x = 1 # 2;");
    assert_eq!(diag.kind, DiagnosticKind::Lexer);
    assert_eq!(diag.code, Some(ErrorCode::UnexpectedCharacter));
    assert!(rendered.contains("unexpected character `#`"));
}

#[test]
fn test_lex_error_diagnostic_from_stream() {
    let source = Arc::new(SourceFile::from_string("test.glow", "\n\n  $"));
    let err = TokenStream::new(source).tokenize().unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.span.range(), 4..5);
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.labels[0].message, "unexpected character here");
}

#[test]
fn test_grammar_error_diagnostic() {
    let mut grammar = Grammar::new();
    grammar.define_rule("start", vec![vec![rule("missing")]]);
    let err = Parser::new(grammar).unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.kind, DiagnosticKind::Grammar);
    assert_eq!(diag.code, Some(ErrorCode::DanglingReference));
    assert_eq!(diag.message, "rule `start` references undefined rule `missing`");
}

#[test]
fn test_every_code_is_distinct() {
    let codes = [
        ErrorCode::UnexpectedCharacter,
        ErrorCode::UnexpectedToken,
        ErrorCode::TrailingInput,
        ErrorCode::RecursionLimit,
        ErrorCode::UnknownRule,
        ErrorCode::DanglingReference,
        ErrorCode::LeftRecursion,
        ErrorCode::MissingTokenPattern,
        ErrorCode::InvalidTokenPattern,
    ];
    let mut seen: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), codes.len());
}
