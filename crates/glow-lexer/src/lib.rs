//! Lexical analysis for Glow.
//! Glow 词法分析模块。
//!
//! This crate provides a mode-aware token stream that turns source text into
//! tokens on demand, driven by a registry of literal and regex patterns.
//! 本 crate 提供一个感知模式的 token 流，由字面量和正则模式注册表驱动，按需将源文本转换为 token。

mod error;
mod matcher;
mod stream;
mod token;

pub use error::{LexError, TokenError};
pub use matcher::{TokenMatch, TokenMatcher, TokenPattern};
pub use stream::{Mode, ScanState, TokenStream};
pub use token::{Token, TokenKind};
