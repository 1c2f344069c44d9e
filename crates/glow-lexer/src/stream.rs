//! The Glow token stream.
//! Glow token 流。

use std::sync::Arc;

use glow_common::{SourceFile, SourcePos, Span};
use tracing::{debug, trace};

use crate::{LexError, Token, TokenError, TokenKind, TokenMatcher};

/// Mode for the scanner state machine.
/// 扫描器状态机的模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Plain syntax - 普通语法
    #[default]
    Syntax,
    /// Inside a string literal - 在字符串字面量内部
    StringLiteral,
    /// Inside a line comment - 在行注释内部
    Comment,
}

/// Legal tokens in syntax mode, in matching order.
/// 语法模式下的合法 token，按匹配顺序排列。
const SYNTAX_TOKENS: &[TokenKind] = &[
    TokenKind::DoubleSlash,
    // special - 特殊
    TokenKind::Eol,
    TokenKind::Eof,
    TokenKind::Whitespace,
    // delimiters - 分隔符
    TokenKind::DblQuote,
    TokenKind::CurlyBraceRight,
    TokenKind::CurlyBraceLeft,
    TokenKind::SquareBrackRight,
    TokenKind::SquareBrackLeft,
    TokenKind::ParenRight,
    TokenKind::ParenLeft,
    // `==` before `=` - `==` 在 `=` 之前
    TokenKind::DoubleEq,
    TokenKind::Assign,
    TokenKind::Colon,
    TokenKind::Semicolon,
    TokenKind::Asterisk,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Div,
    // keywords before names - 关键字在名字之前
    TokenKind::KwVar,
    TokenKind::KwConst,
    TokenKind::KwFunc,
    TokenKind::Name,
    TokenKind::IntegerLiteral,
];

/// Legal tokens inside a string literal.
/// 字符串字面量内部的合法 token。
const STRING_TOKENS: &[TokenKind] = &[
    TokenKind::EscapedDblQuote,
    TokenKind::DblQuote,
    TokenKind::Eol,
    TokenKind::Eof,
    TokenKind::StringChar,
];

/// Legal tokens inside a comment.
/// 注释内部的合法 token。
const COMMENT_TOKENS: &[TokenKind] = &[TokenKind::Eol, TokenKind::Eof, TokenKind::CommentChar];

impl Mode {
    /// The candidate token kinds for this mode, in matching order.
    /// 此模式下的候选 token 种类，按匹配顺序排列。
    pub fn candidates(self) -> &'static [TokenKind] {
        match self {
            Mode::Syntax => SYNTAX_TOKENS,
            Mode::StringLiteral => STRING_TOKENS,
            Mode::Comment => COMMENT_TOKENS,
        }
    }

    /// The mode after recognizing a token of `kind` in this mode.
    /// 在此模式下识别出 `kind` 类型的 token 之后的模式。
    pub fn after(self, kind: TokenKind) -> Mode {
        match (self, kind) {
            (Mode::Syntax, TokenKind::DblQuote) => Mode::StringLiteral,
            (Mode::StringLiteral, TokenKind::DblQuote) => Mode::Syntax,
            (Mode::Syntax, TokenKind::DoubleSlash) => Mode::Comment,
            (Mode::Comment, TokenKind::Eol) => Mode::Syntax,
            (mode, _) => mode,
        }
    }
}

/// The complete resumable position of a token stream.
/// token 流完整的可恢复位置。
///
/// Snapshots are plain copies, so any number of alternatives can probe ahead
/// and roll back independently.
/// 快照是普通的值拷贝，因此任意多个备选分支都可以独立地向前探测并回滚。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanState {
    /// Byte offset into the source. / 源码中的字节偏移。
    pub offset: usize,
    /// 1-based line. / 从 1 开始的行号。
    pub line: u32,
    /// 1-based column, in characters. / 从 1 开始的列号（按字符计）。
    pub column: u32,
    pub mode: Mode,
}

impl ScanState {
    pub const START: ScanState = ScanState {
        offset: 0,
        line: 1,
        column: 1,
        mode: Mode::Syntax,
    };

    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    /// The state after consuming `text` recognized as `kind`.
    /// 消耗被识别为 `kind` 的 `text` 之后的状态。
    fn advance(self, kind: TokenKind, text: &str) -> ScanState {
        let (line, column) = if kind == TokenKind::Eol {
            (self.line + 1, 1)
        } else {
            (self.line, self.column + text.chars().count() as u32)
        };

        ScanState {
            offset: self.offset + text.len(),
            line,
            column,
            mode: self.mode.after(kind),
        }
    }
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::START
    }
}

/// A stateful scanner over one source file.
/// 针对单个源文件的有状态扫描器。
///
/// Tokens are produced on demand. The grammar layer pulls significant tokens
/// with [`TokenStream::next_token`] and backtracks with
/// [`TokenStream::state`] / [`TokenStream::restore`].
/// token 按需产生。语法层通过 [`TokenStream::next_token`] 拉取有意义的 token，
/// 并通过 [`TokenStream::state`] / [`TokenStream::restore`] 回溯。
#[derive(Debug, Clone)]
pub struct TokenStream {
    matcher: Arc<TokenMatcher>,
    source: Arc<SourceFile>,
    state: ScanState,
}

impl TokenStream {
    /// Create a stream over `source` using the Glow token patterns.
    /// 使用 Glow 词法模式为 `source` 创建 token 流。
    pub fn new(source: Arc<SourceFile>) -> Self {
        Self {
            matcher: TokenMatcher::glow(),
            source,
            state: ScanState::START,
        }
    }

    /// Create a stream with a custom pattern registry.
    /// 使用自定义模式注册表创建 token 流。
    ///
    /// Fails if any mode's candidate kind has no registered pattern.
    /// 如果任一模式的候选 token 没有注册模式则失败。
    pub fn with_matcher(matcher: Arc<TokenMatcher>, source: Arc<SourceFile>) -> Result<Self, TokenError> {
        for mode in [Mode::Syntax, Mode::StringLiteral, Mode::Comment] {
            matcher.ensure_registered(mode.candidates())?;
        }
        Ok(Self {
            matcher,
            source,
            state: ScanState::START,
        })
    }

    /// Load a new source and reset the position to its start.
    /// 加载新的源文件并将位置重置到开头。
    pub fn load(&mut self, source: Arc<SourceFile>) {
        self.source = source;
        self.state = ScanState::START;
    }

    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// Snapshot the current position.
    /// 对当前位置做快照。
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Return to a previously taken snapshot.
    /// 回到先前的快照。
    pub fn restore(&mut self, state: ScanState) {
        self.state = state;
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn pos(&self) -> SourcePos {
        self.state.pos()
    }

    /// The source text not yet consumed.
    /// 尚未消耗的源文本。
    pub fn remaining(&self) -> &str {
        &self.source.contents()[self.state.offset..]
    }

    /// Scan the next token, trivia included.
    /// 扫描下一个 token，包括空白和注释。
    pub fn raw_next_token(&mut self) -> Result<Token, LexError> {
        let start = self.state;
        let rest = &self.source.contents()[start.offset..];

        let Some(found) = self.matcher.find(rest, start.mode.candidates())? else {
            let ch = rest.chars().next().unwrap_or('\0');
            let end = start.offset + ch.len_utf8().min(rest.len());
            debug!(pos = %start.pos(), ?ch, "unexpected character");
            return Err(LexError::UnexpectedCharacter {
                file: self.source.name().to_string(),
                pos: start.pos(),
                span: Span::from_usize(start.offset, end),
                ch,
            });
        };

        let next = start.advance(found.kind, found.text);
        if next.mode != start.mode {
            trace!(from = ?start.mode, to = ?next.mode, pos = %start.pos(), "mode switch");
        }
        self.state = next;

        Ok(Token::new(
            found.kind,
            found.text,
            start.pos(),
            Span::from_usize(start.offset, next.offset),
            Arc::clone(&self.source),
        ))
    }

    /// Scan the next significant token, skipping trivia.
    /// 扫描下一个有意义的 token，跳过空白和注释。
    ///
    /// End of file is returned as a token every time it is reached.
    /// 每次到达文件末尾都会返回 Eof token。
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let token = self.raw_next_token()?;
            if !token.kind.is_trivia() {
                return Ok(token);
            }
        }
    }

    /// Look at the next significant token without consuming it.
    /// 查看下一个有意义的 token 而不消耗它。
    pub fn peek_token(&mut self) -> Result<Token, LexError> {
        let saved = self.state;
        let token = self.next_token();
        self.state = saved;
        token
    }

    /// Returns true if only trivia remains.
    /// 如果只剩下空白和注释则返回 true。
    pub fn at_eof(&mut self) -> Result<bool, LexError> {
        Ok(self.peek_token()?.is_eof())
    }

    /// Scan all significant tokens from the current position, ending with Eof.
    /// 从当前位置扫描所有有意义的 token，以 Eof 结尾。
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        self.collect_until_eof(Self::next_token)
    }

    /// Scan every token from the current position, trivia included.
    /// 从当前位置扫描所有 token，包括空白和注释。
    pub fn tokenize_raw(mut self) -> Result<Vec<Token>, LexError> {
        self.collect_until_eof(Self::raw_next_token)
    }

    fn collect_until_eof(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Result<Token, LexError>,
    ) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = next(self)?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream {
        TokenStream::new(Arc::new(SourceFile::from_string("test.glo", text)))
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        stream(text)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_syntax_tokens() {
        assert_eq!(
            kinds("var x = (1 + y) * 2;"),
            vec![
                TokenKind::KwVar,
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::ParenLeft,
                TokenKind::IntegerLiteral,
                TokenKind::Plus,
                TokenKind::Name,
                TokenKind::ParenRight,
                TokenKind::Asterisk,
                TokenKind::IntegerLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_double_eq_before_assign() {
        assert_eq!(
            kinds("a == b = c"),
            vec![
                TokenKind::Name,
                TokenKind::DoubleEq,
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::Name,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_mode() {
        let mut s = stream(r#""a b\"" x"#);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::DblQuote);
        assert_eq!(s.mode(), Mode::StringLiteral);

        let a = s.next_token().unwrap();
        assert_eq!((a.kind, a.content.as_str()), (TokenKind::StringChar, "a"));
        // spaces inside strings are content, not whitespace
        let space = s.next_token().unwrap();
        assert_eq!((space.kind, space.content.as_str()), (TokenKind::StringChar, " "));
        assert_eq!(s.next_token().unwrap().kind, TokenKind::StringChar);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::EscapedDblQuote);
        assert_eq!(s.mode(), Mode::StringLiteral);

        assert_eq!(s.next_token().unwrap().kind, TokenKind::DblQuote);
        assert_eq!(s.mode(), Mode::Syntax);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Name);
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_comment_mode() {
        let mut s = stream("a // skip (this) @\nb");
        assert_eq!(s.next_token().unwrap().content, "a");
        let b = s.next_token().unwrap();
        assert_eq!(b.content, "b");
        assert_eq!(b.pos, SourcePos::new(2, 1));
        assert_eq!(s.mode(), Mode::Syntax);
    }

    #[test]
    fn test_raw_tokens_include_trivia() {
        let raw: Vec<TokenKind> = stream("a //c\n")
            .tokenize_raw()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            raw,
            vec![
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::DoubleSlash,
                TokenKind::CommentChar,
                TokenKind::Eol,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = stream("var x\n  = 1").tokenize().unwrap();
        let positions: Vec<SourcePos> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(
            positions,
            vec![
                SourcePos::new(1, 1),
                SourcePos::new(1, 5),
                SourcePos::new(2, 3),
                SourcePos::new(2, 5),
                SourcePos::new(2, 6),
            ]
        );
        assert_eq!(tokens[1].span, Span::from_usize(4, 5));
    }

    #[test]
    fn test_eof_repeats() {
        let mut s = stream("  ");
        assert!(s.next_token().unwrap().is_eof());
        assert!(s.next_token().unwrap().is_eof());
        assert!(s.at_eof().unwrap());
    }

    #[test]
    fn test_unexpected_character() {
        let mut s = stream("a\n  @");
        assert_eq!(s.next_token().unwrap().kind, TokenKind::Name);
        match s.next_token().unwrap_err() {
            LexError::UnexpectedCharacter { pos, ch, span, file } => {
                assert_eq!(pos, SourcePos::new(2, 3));
                assert_eq!(ch, '@');
                assert_eq!(span, Span::from_usize(4, 5));
                assert_eq!(file, "test.glo");
            }
            other => panic!("expected unexpected character, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_restore() {
        let mut s = stream("\"ab\" c");
        s.next_token().unwrap();
        let snapshot = s.state();
        assert_eq!(snapshot, s.state());

        s.next_token().unwrap();
        s.next_token().unwrap();
        s.next_token().unwrap();
        assert_eq!(s.mode(), Mode::Syntax);

        s.restore(snapshot);
        assert_eq!(s.state(), snapshot);
        assert_eq!(s.mode(), Mode::StringLiteral);
        assert_eq!(s.next_token().unwrap().content, "a");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut s = stream("x y");
        let before = s.state();
        assert_eq!(s.peek_token().unwrap().content, "x");
        assert_eq!(s.state(), before);
        assert_eq!(s.next_token().unwrap().content, "x");
    }

    #[test]
    fn test_load_resets_state() {
        let mut s = stream("\"abc");
        s.next_token().unwrap();
        s.next_token().unwrap();
        assert_ne!(s.state(), ScanState::START);

        s.load(Arc::new(SourceFile::from_string("other.glo", "y")));
        assert_eq!(s.state(), ScanState::START);
        assert_eq!(s.source().name(), "other.glo");
        assert_eq!(s.next_token().unwrap().content, "y");
    }

    #[test]
    fn test_with_matcher_checks_coverage() {
        let source = Arc::new(SourceFile::from_string("t.glo", ""));
        let partial = Arc::new(TokenMatcher::new().literal(TokenKind::Plus, "+"));
        assert!(matches!(
            TokenStream::with_matcher(partial, Arc::clone(&source)),
            Err(TokenError::MissingPattern(_))
        ));
        assert!(TokenStream::with_matcher(TokenMatcher::glow(), source).is_ok());
    }
}
