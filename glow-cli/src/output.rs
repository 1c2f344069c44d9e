//! Output formatting utilities.
//! 输出格式化工具。
//!
//! Colored status lines for the CLI, and the plain-text rendering of tokens
//! and match trees.
//! CLI 的彩色状态行，以及 token 和匹配树的纯文本渲染。

use glow_lexer::Token;
use glow_parser::{Capture, RuleMatch};
use serde_json::{Map, Value, json};

/// Print a success message in green.
/// 以绿色打印成功消息。
pub fn success(msg: &str) {
    println!("\x1b[32m{msg}\x1b[0m");
}

/// Print an error message in red.
/// 以红色打印错误消息。
pub fn error(msg: &str) {
    eprintln!("\x1b[31merror:\x1b[0m {msg}");
}

/// Print an info message in blue.
/// 以蓝色打印信息消息。
pub fn info(msg: &str) {
    println!("\x1b[34minfo:\x1b[0m {msg}");
}

/// One token per line: position, kind and quoted content.
/// 每行一个 token：位置、种类和带引号的内容。
pub fn token_line(token: &Token) -> String {
    format!("{:<8} {:<16} {:?}", token.pos.to_string(), token.kind.name(), token.content)
}

/// Indented text rendering of a match tree.
/// 匹配树的缩进文本渲染。
pub fn match_tree(m: &RuleMatch<'_>) -> String {
    let mut out = String::new();
    out.push_str(m.rule_name());
    out.push('\n');
    write_captures(m, 1, &mut out);
    out
}

fn write_captures(m: &RuleMatch<'_>, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for (label, capture) in m.captures() {
        match capture {
            Capture::Token(token) => {
                out.push_str(&format!("{pad}{label}: {} {:?}\n", token.kind.name(), token.content));
            }
            Capture::Rule(sub) => {
                out.push_str(&format!("{pad}{label}: {}\n", sub.rule_name()));
                write_captures(sub, indent + 1, out);
            }
        }
    }
}

/// JSON rendering of a match tree.
/// 匹配树的 JSON 渲染。
pub fn match_json(m: &RuleMatch<'_>) -> Value {
    let captures: Map<String, Value> = m
        .captures()
        .map(|(label, capture)| {
            let value = match capture {
                Capture::Token(token) => token_json(token),
                Capture::Rule(sub) => match_json(sub),
            };
            (label.to_string(), value)
        })
        .collect();
    json!({
        "rule": m.rule_name(),
        "alternative": m.alternative(),
        "span": m.span().map(|span| [span.start.0, span.end.0]),
        "captures": captures,
    })
}

fn token_json(token: &Token) -> Value {
    json!({
        "kind": token.kind.name(),
        "content": token.content,
        "line": token.pos.line,
        "column": token.pos.column,
    })
}
