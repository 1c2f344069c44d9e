//! Lexer error types.
//! 词法分析错误类型。

use glow_common::{SourcePos, Span};
use glow_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use thiserror::Error;

use crate::TokenKind;

/// Token pattern registry misconfiguration.
/// 词法模式注册表的配置错误。
///
/// These are programming errors in the token tables, not problems with the
/// scanned source.
/// 这些是词法表中的编程错误，而不是被扫描源码的问题。
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("no pattern is registered for token kind `{0}`")]
    MissingPattern(TokenKind),

    #[error("invalid pattern for token kind `{kind}`: {source}")]
    InvalidPattern {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },
}

impl TokenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TokenError::MissingPattern(_) => ErrorCode::MissingTokenPattern,
            TokenError::InvalidPattern { .. } => ErrorCode::InvalidTokenPattern,
        }
    }
}

/// Errors raised while scanning source text.
/// 扫描源文本时产生的错误。
#[derive(Debug, Clone, Error)]
pub enum LexError {
    #[error("{file}:{pos}: unexpected character `{ch}`")]
    UnexpectedCharacter {
        file: String,
        pos: SourcePos,
        span: Span,
        ch: char,
    },

    #[error(transparent)]
    Config(#[from] TokenError),
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnexpectedCharacter { .. } => ErrorCode::UnexpectedCharacter,
            LexError::Config(err) => err.code(),
        }
    }

    /// Turn the error into a renderable diagnostic.
    /// 将错误转换为可渲染的诊断信息。
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LexError::UnexpectedCharacter { span, ch, .. } => Diagnostic::error(
                DiagnosticKind::Lexer,
                *span,
                format!("unexpected character `{}`", ch.escape_debug()),
            )
            .with_code(self.code())
            .with_label(Label::new(*span, "unexpected character here")),
            LexError::Config(err) => {
                Diagnostic::error(DiagnosticKind::Lexer, Span::DUMMY, err.to_string())
                    .with_code(self.code())
            }
        }
    }
}
