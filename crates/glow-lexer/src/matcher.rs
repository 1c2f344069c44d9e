//! The token pattern registry.
//! 词法模式注册表。
//!
//! Every token kind is recognized by exactly one pattern: either a literal
//! matched by prefix, or a regular expression anchored at the start of the
//! remaining input. The matcher itself has no notion of modes; the caller
//! decides which kinds are legal and in which order they are tried.
//! 每种 token 由唯一的模式识别：前缀匹配的字面量，或锚定在剩余输入开头的正则表达式。
//! 匹配器本身没有模式的概念；由调用者决定哪些 token 合法以及尝试顺序。

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{TokenError, TokenKind};

/// How a single token kind is recognized.
/// 单个 token 种类的识别方式。
#[derive(Debug, Clone)]
pub enum TokenPattern {
    /// Matches iff the input starts with this text.
    /// 当输入以该文本开头时匹配。
    Literal(String),
    /// Matches iff the expression matches at index 0.
    /// 当表达式在索引 0 处匹配时匹配。
    Regex(Regex),
}

impl TokenPattern {
    /// Return the matched prefix of `input`, if any.
    /// 返回 `input` 被匹配的前缀（如果有）。
    fn match_prefix<'s>(&self, input: &'s str) -> Option<&'s str> {
        let text = match self {
            TokenPattern::Literal(lit) => {
                if input.starts_with(lit.as_str()) {
                    &input[..lit.len()]
                } else {
                    return None;
                }
            }
            TokenPattern::Regex(re) => {
                let m = re.find(input)?;
                if m.start() != 0 {
                    return None;
                }
                m.as_str()
            }
        };

        // Only the end of input may be matched by an empty token, otherwise
        // the scanner would never make progress.
        // 只有输入末尾可以被空 token 匹配，否则扫描器将无法前进。
        if text.is_empty() && !input.is_empty() {
            return None;
        }
        Some(text)
    }
}

/// A successful match: the winning kind and the text it covered.
/// 一次成功的匹配：胜出的 token 种类及其覆盖的文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
}

/// Registry mapping each token kind to its pattern.
/// 将每种 token 映射到其模式的注册表。
#[derive(Debug, Clone, Default)]
pub struct TokenMatcher {
    patterns: HashMap<TokenKind, TokenPattern>,
}

static GLOW: LazyLock<Arc<TokenMatcher>> = LazyLock::new(|| Arc::new(TokenMatcher::build_glow()));

impl TokenMatcher {
    /// Create an empty registry.
    /// 创建一个空注册表。
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry for the Glow language.
    /// Glow 语言的共享注册表。
    pub fn glow() -> Arc<TokenMatcher> {
        Arc::clone(&GLOW)
    }

    fn build_glow() -> Self {
        let mut matcher = Self::new()
            .literal(TokenKind::EscapedDblQuote, "\\\"")
            .literal(TokenKind::DoubleSlash, "//")
            .literal(TokenKind::DblQuote, "\"")
            .literal(TokenKind::CurlyBraceRight, "}")
            .literal(TokenKind::CurlyBraceLeft, "{")
            .literal(TokenKind::SquareBrackRight, "]")
            .literal(TokenKind::SquareBrackLeft, "[")
            .literal(TokenKind::ParenRight, ")")
            .literal(TokenKind::ParenLeft, "(")
            .literal(TokenKind::Assign, "=")
            .literal(TokenKind::DoubleEq, "==")
            .literal(TokenKind::Colon, ":")
            .literal(TokenKind::Semicolon, ";")
            .literal(TokenKind::Asterisk, "*")
            .literal(TokenKind::Plus, "+")
            .literal(TokenKind::Minus, "-")
            .literal(TokenKind::Div, "/")
            .literal(TokenKind::Eol, "\n");

        // Keywords must end at a word boundary so `variable` stays a name.
        // 关键字必须在单词边界处结束，这样 `variable` 仍是一个名字。
        let regexes = [
            (TokenKind::KwVar, r"var\b"),
            (TokenKind::KwConst, r"const\b"),
            (TokenKind::KwFunc, r"func\b"),
            (TokenKind::Name, r"[a-zA-Z_][a-zA-Z_0-9]*"),
            (TokenKind::IntegerLiteral, r"[0-9]+"),
            (TokenKind::Whitespace, r"[ \t]"),
            (TokenKind::StringChar, r"."),
            (TokenKind::CommentChar, r"."),
            (TokenKind::Eof, r"$"),
        ];
        for (kind, expr) in regexes {
            matcher = match matcher.regex(kind, expr) {
                Ok(m) => m,
                Err(err) => unreachable!("built-in token pattern is invalid: {err}"),
            };
        }
        matcher
    }

    /// Register a literal pattern, replacing any previous pattern for `kind`.
    /// 注册字面量模式，替换 `kind` 先前的模式。
    pub fn literal(mut self, kind: TokenKind, text: impl Into<String>) -> Self {
        self.patterns.insert(kind, TokenPattern::Literal(text.into()));
        self
    }

    /// Register a regular-expression pattern, anchored at the start of input.
    /// 注册锚定在输入开头的正则表达式模式。
    pub fn regex(mut self, kind: TokenKind, expr: &str) -> Result<Self, TokenError> {
        let anchored = format!("^(?:{expr})");
        let re = Regex::new(&anchored).map_err(|source| TokenError::InvalidPattern { kind, source })?;
        self.patterns.insert(kind, TokenPattern::Regex(re));
        Ok(self)
    }

    pub fn pattern(&self, kind: TokenKind) -> Option<&TokenPattern> {
        self.patterns.get(&kind)
    }

    /// Check that every kind in `kinds` has a registered pattern.
    /// 检查 `kinds` 中的每种 token 都有已注册的模式。
    pub fn ensure_registered(&self, kinds: &[TokenKind]) -> Result<(), TokenError> {
        match kinds.iter().find(|kind| !self.patterns.contains_key(kind)) {
            Some(kind) => Err(TokenError::MissingPattern(*kind)),
            None => Ok(()),
        }
    }

    /// Find the first candidate whose pattern matches at the start of `input`.
    /// 查找第一个在 `input` 开头匹配的候选 token。
    ///
    /// Candidates are tried in the given order and the first match wins, so
    /// keywords and longer operators must come before the general patterns
    /// that would also match them.
    /// 候选按给定顺序尝试，第一个匹配者胜出，因此关键字和较长的运算符必须排在同样能匹配它们的通用模式之前。
    pub fn find<'s>(
        &self,
        input: &'s str,
        candidates: &[TokenKind],
    ) -> Result<Option<TokenMatch<'s>>, TokenError> {
        for &kind in candidates {
            let pattern = self
                .patterns
                .get(&kind)
                .ok_or(TokenError::MissingPattern(kind))?;
            if let Some(text) = pattern.match_prefix(input) {
                return Ok(Some(TokenMatch { kind, text }));
            }
        }
        Ok(None)
    }
}
