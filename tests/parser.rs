//! Integration tests for glow-parser crate.

use std::sync::Arc;

use glow_common::{SourceFile, SourcePos, Span};
use glow_lexer::{TokenKind, TokenStream};
use glow_parser::{
    Capture, FailureRecord, Grammar, GrammarError, MatchOptions, ParseError, Parser, RuleMatch,
    RuleMatcher, parse, rule, token,
};

fn source(text: &str) -> Arc<SourceFile> {
    Arc::new(SourceFile::from_string("test.glow", text))
}

fn parse_rule<'p>(parser: &'p Parser, text: &str, start: &str) -> Result<RuleMatch<'p>, ParseError> {
    parser.parse_str("test.glow", text, start)
}

// ============================================================================
// Glow Programs
// ============================================================================

#[test]
fn test_parse_program() {
    let m = parse(source("var x = 42;\nconst y = (x + 1) * 2;\n")).unwrap();
    assert_eq!(m.rule_name(), "program");
    let second = m.sub_match("rest").unwrap().sub_match("first").unwrap();
    assert_eq!(second.token("name").unwrap().content, "y");
    assert_eq!(second.token("name").unwrap().pos, SourcePos::new(2, 7));
}

#[test]
fn test_operator_structure() {
    let parser = Parser::glow();
    let m = parse_rule(&parser, "a - b * c", "expr").unwrap();
    let lhs = m.sub_match("lhs").unwrap().sub_match("body").unwrap();
    assert_eq!(lhs.token("value").unwrap().content, "a");

    let tail = m.sub_match("tail").unwrap();
    assert_eq!(tail.token("op").unwrap().kind, TokenKind::Minus);

    // `b * c` is the whole right operand of `-`
    let rhs = tail.sub_match("rhs").unwrap();
    assert_eq!(rhs.rule_name(), "expr");
    let product = rhs.sub_match("tail").unwrap();
    assert_eq!(product.token("op").unwrap().kind, TokenKind::Asterisk);
    assert!(!product.has_capture("tail"));
    assert_eq!(rhs.span(), Some(Span::from_usize(4, 9)));
    assert_eq!(m.span(), Some(Span::from_usize(0, 9)));
}

#[test]
fn test_product_before_sum() {
    let parser = Parser::glow();
    let m = parse_rule(&parser, "(a * b / c + d)", "paren").unwrap();
    let expr = m.sub_match("body").unwrap();
    let times = expr.sub_match("tail").unwrap();
    assert_eq!(times.token("op").unwrap().kind, TokenKind::Asterisk);
    let div = times.sub_match("tail").unwrap();
    assert_eq!(div.token("op").unwrap().kind, TokenKind::Div);
    let plus = div.sub_match("tail").unwrap();
    assert_eq!(plus.token("op").unwrap().kind, TokenKind::Plus);
    assert_eq!(plus.sub_match("rhs").unwrap().rule_name(), "expr");
}

// ============================================================================
// Input Size
// ============================================================================

#[test]
fn test_long_program() {
    let text = "var a = 1;\n".repeat(300);
    let m = parse(source(&text)).unwrap();

    let mut count = 1;
    let mut current = &m;
    while let Ok(rest) = current.sub_match("rest") {
        count += 1;
        current = rest;
    }
    assert_eq!(count, 300);
    assert_eq!(m.span(), Some(Span::from_usize(0, text.len() - 1)));
}

#[test]
fn test_long_string() {
    let text = format!("var s = \"{}\";", "x".repeat(300));
    let m = parse(source(&text)).unwrap();
    let chars = m.tokens().iter().filter(|t| t.kind == TokenKind::StringChar).count();
    assert_eq!(chars, 300);
}

#[test]
fn test_deep_nesting() {
    let depth = 12;
    let text = format!("var a = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let m = parse(source(&text)).unwrap();

    let mut expr = m.sub_match("first").unwrap().sub_match("value").unwrap();
    let mut levels = 0;
    while let Ok(paren) = expr.sub_match("lhs").and_then(|factor| factor.sub_match("body")) {
        if paren.rule_name() != "paren" {
            break;
        }
        levels += 1;
        expr = paren.sub_match("body").unwrap();
    }
    assert_eq!(levels, depth);
}

#[test]
fn test_deep_nesting_with_operators() {
    let depth = 12;
    let text = format!("var a = {}1{};", "(1 * ".repeat(depth), ")".repeat(depth));
    assert!(parse(source(&text)).is_ok());
}

#[test]
fn test_deep_unclosed_nesting_fails() {
    let text = format!("var a = {}1 + ;", "(".repeat(12));
    let err = parse(source(&text)).unwrap_err();
    assert!(matches!(err, ParseError::NoMatch { .. }));
}

#[test]
fn test_default_options_accept_realistic_input() {
    assert_eq!(MatchOptions::default().max_recursion, 256);
    let mut text = String::new();
    for i in 0..300 {
        text.push_str(&format!("const v{i} = (v{i} + {i}) * \"{}\";\n", "y".repeat(i % 50)));
    }
    assert!(parse(source(&text)).is_ok());
}

#[test]
fn test_comments_and_strings() {
    let text = "// greeting\nconst s = \"hi // there\"; // done\n";
    let m = parse(source(text)).unwrap();
    let tokens: Vec<_> = m.tokens().iter().map(|t| t.content.clone()).collect();
    assert_eq!(tokens[0], "s");
    assert_eq!(tokens[1..].concat(), "hi // there");
}

#[test]
fn test_empty_string() {
    let parser = Parser::glow();
    let m = parse_rule(&parser, "\"\"", "string").unwrap();
    let chars = m.sub_match("body").unwrap();
    assert!(chars.captures().next().is_none());
}

#[test]
fn test_missing_semicolon() {
    let err = parse(source("var x = 1")).unwrap_err();
    let ParseError::NoMatch { failures, .. } = &err else {
        panic!("expected NoMatch, got {err:?}");
    };
    assert!(failures.iter().all(|f| f.offending.is_eof()));
    assert!(failures.iter().any(|f| f.expected == TokenKind::Semicolon));
    assert_eq!(err.to_diagnostic().message, "expected `;`, found end of file");
}

#[test]
fn test_unbalanced_paren() {
    let parser = Parser::glow();
    let err = parse_rule(&parser, "(a", "paren").unwrap_err();
    let message = err.to_diagnostic().message;
    assert!(message.starts_with("expected "));
    assert!(message.contains("`)`"));
    assert!(message.ends_with("found end of file"));
}

#[test]
fn test_error_points_at_offending_token() {
    let err = parse(source("var x = 1;\nvar = 2;")).unwrap_err();
    // the first declaration alone is a complete program
    let ParseError::TrailingInput { token, failures, .. } = &err else {
        panic!("expected TrailingInput, got {err:?}");
    };
    assert_eq!(token.kind, TokenKind::KwVar);
    assert_eq!(token.pos, SourcePos::new(2, 1));
    assert_eq!(failures[0].offending.pos, SourcePos::new(2, 5));

    let diag = err.to_diagnostic();
    assert_eq!(diag.message, "expected name, found `=`");
    assert_eq!(diag.span, failures[0].offending.span);
}

#[test]
fn test_plain_trailing_input() {
    let parser = Parser::glow();
    let err = parse_rule(&parser, "a )", "atomic").unwrap_err();
    assert_eq!(err.to_diagnostic().message, "unexpected `)` after a complete `atomic`");
}

#[test]
fn test_trailing_input_allowed() {
    let parser = Parser::glow().with_options(MatchOptions::new().require_eof(false));
    let m = parse_rule(&parser, "a )", "atomic").unwrap();
    assert!(matches!(m.capture("value"), Ok(Capture::Token(_))));
}

#[test]
fn test_lexical_error_is_independent_of_grammar() {
    let err = parse(source("var x = 1;\n@")).unwrap_err();
    let ParseError::Lex(lex) = &err else {
        panic!("expected Lex, got {err:?}");
    };
    assert_eq!(lex.to_string(), "test.glow:2:1: unexpected character `@`");
}

// ============================================================================
// Custom Grammars
// ============================================================================

fn list_grammar() -> Grammar {
    let mut grammar = Grammar::new();
    grammar
        .define_rule(
            "list",
            vec![
                vec![
                    token(TokenKind::SquareBrackLeft),
                    rule("items").label("items"),
                    token(TokenKind::SquareBrackRight),
                ],
                vec![token(TokenKind::SquareBrackLeft), token(TokenKind::SquareBrackRight)],
            ],
        )
        .define_rule(
            "items",
            vec![
                vec![
                    token(TokenKind::IntegerLiteral).label("head"),
                    token(TokenKind::Colon),
                    rule("items").label("tail"),
                ],
                vec![token(TokenKind::IntegerLiteral).label("head")],
            ],
        );
    grammar
}

#[test]
fn test_custom_grammar() {
    let parser = Parser::new(list_grammar()).unwrap();
    let m = parse_rule(&parser, "[1 : 2 : 3]", "list").unwrap();
    let mut heads = Vec::new();
    let mut items = m.sub_match("items").ok();
    while let Some(current) = items {
        heads.push(current.token("head").unwrap().content.clone());
        items = current.sub_match("tail").ok();
    }
    assert_eq!(heads, vec!["1", "2", "3"]);

    let empty = parse_rule(&parser, "[]", "list").unwrap();
    assert_eq!(empty.alternative(), 1);
}

#[test]
fn test_unknown_start_rule() {
    let parser = Parser::new(list_grammar()).unwrap();
    let err = parse_rule(&parser, "[]", "map").unwrap_err();
    assert!(matches!(err, ParseError::Grammar(GrammarError::UnknownRule(ref name)) if name == "map"));
}

#[test]
fn test_left_recursion_rejected() {
    let mut grammar = list_grammar();
    grammar.define_rule(
        "sum",
        vec![
            vec![rule("sum"), token(TokenKind::Plus), token(TokenKind::IntegerLiteral)],
            vec![token(TokenKind::IntegerLiteral)],
        ],
    );
    let err = Parser::new(grammar.clone()).unwrap_err();
    assert_eq!(
        err,
        GrammarError::LeftRecursion {
            cycle: vec!["sum".to_string(), "sum".to_string()],
        }
    );

    // matching it anyway stops at the recursion limit instead of overflowing
    let mut stream = TokenStream::new(source("1 + 2"));
    let mut record = FailureRecord::new();
    let result = RuleMatcher::new(&grammar)
        .with_options(MatchOptions::new().max_recursion(64))
        .attempt_rule_match("sum", &mut stream, 0, &mut record);
    assert!(result.is_err());
}

#[test]
fn test_failure_record_keeps_deepest() {
    let grammar = list_grammar();
    let mut stream = TokenStream::new(source("[1 : 2 ;"));
    let mut record = FailureRecord::new();
    let result = RuleMatcher::new(&grammar)
        .attempt_rule_match("list", &mut stream, 0, &mut record)
        .unwrap();
    assert!(result.is_none());

    // `[`, `1`, `:`, `2` matched before `;`
    assert_eq!(record.max_depth(), Some(4));
    assert!(record.attempts().iter().all(|a| a.offending.content == ";"));
    assert!(record.attempts().iter().all(|a| a.depth == 4));
}
