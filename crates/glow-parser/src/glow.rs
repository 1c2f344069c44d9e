//! The grammar of the Glow language.
//!
//! An expression is a factor followed by an optional operator tail, so each
//! operand is matched once no matter which operator follows it:
//!
//! ```text
//! expr:      [factor:lhs] [expr_tail:tail] | [factor:lhs]
//! expr_tail: Asterisk:op [factor:rhs] [expr_tail:tail] | ... | Plus:op [expr:rhs] | ... | ()
//! ```
//!
//! `*` and `/` chain factors, and `+` or `-` takes the rest of the expression
//! as its right operand, which gives them the lower precedence. No rule
//! matches at end of file, so every `[x] [tail]` has a plain `[x]` fallback for
//! input that ends right after `x`.

use glow_lexer::TokenKind;

use crate::{Component, Grammar, rule, token};

/// Rule a Glow source file is parsed from.
pub const GLOW_START: &str = "program";

/// Build the Glow grammar.
pub fn glow_grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar.define_rule(
        "program",
        vec![
            vec![rule("declaration").label("first"), rule("program").label("rest")],
            vec![rule("declaration").label("first")],
        ],
    );

    let binding = |keyword| {
        vec![
            token(keyword),
            token(TokenKind::Name).label("name"),
            token(TokenKind::Assign),
            rule("expr").label("value"),
            token(TokenKind::Semicolon),
        ]
    };
    grammar.define_rule(
        "declaration",
        vec![binding(TokenKind::KwVar), binding(TokenKind::KwConst)],
    );

    grammar.define_rule(
        "expr",
        vec![
            vec![rule("factor").label("lhs"), rule("expr_tail").label("tail")],
            vec![rule("factor").label("lhs")],
        ],
    );
    let mut tail = Vec::new();
    for op in [TokenKind::Asterisk, TokenKind::Div] {
        tail.extend(chained(op));
    }
    for op in [TokenKind::Plus, TokenKind::Minus] {
        tail.push(vec![token(op).label("op"), rule("expr").label("rhs")]);
    }
    tail.push(vec![]);
    grammar.define_rule("expr_tail", tail);

    grammar.define_rule(
        "factor",
        vec![
            vec![rule("paren").label("body")],
            vec![rule("atomic").label("body")],
        ],
    );
    grammar.define_rule(
        "paren",
        vec![vec![
            token(TokenKind::ParenLeft),
            rule("expr").label("body"),
            token(TokenKind::ParenRight),
        ]],
    );
    grammar.define_rule(
        "atomic",
        vec![
            vec![token(TokenKind::Name).label("value")],
            vec![token(TokenKind::IntegerLiteral).label("value")],
            vec![rule("string").label("value")],
        ],
    );
    grammar.define_rule(
        "string",
        vec![vec![
            token(TokenKind::DblQuote),
            rule("chars").label("body"),
            token(TokenKind::DblQuote),
        ]],
    );
    grammar.define_rule(
        "chars",
        vec![
            vec![token(TokenKind::StringChar).label("char"), rule("chars").label("rest")],
            vec![token(TokenKind::EscapedDblQuote).label("char"), rule("chars").label("rest")],
            vec![],
        ],
    );

    grammar
}

// `op:op [factor:rhs] [expr_tail:tail] | op:op [factor:rhs]`
fn chained(op: TokenKind) -> [Vec<Component>; 2] {
    let step = || vec![token(op).label("op"), rule("factor").label("rhs")];
    let mut continued = step();
    continued.push(rule("expr_tail").label("tail"));
    [continued, step()]
}
