//! Token definitions for Glow.

use std::fmt;
use std::sync::Arc;

use glow_common::{SourceFile, SourcePos, Span};

/// A token with its kind, text and position.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact matched text.
    pub content: String,
    /// Position of the first character.
    pub pos: SourcePos,
    pub span: Span,
    /// The file the token was scanned from.
    pub source: Arc<SourceFile>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        content: impl Into<String>,
        pos: SourcePos,
        span: Span,
        source: Arc<SourceFile>,
    ) -> Self {
        Self {
            kind,
            content: content.into(),
            pos,
            span,
            source,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// How the token reads in a message: quoted content, or the kind for
    /// tokens without visible text.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Eol => "end of line".to_string(),
            _ => format!("`{}`", self.content),
        }
    }
}

// Two tokens are the same token if they are the same text at the same place.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.content == other.content
            && self.pos == other.pos
            && self.span == other.span
            && self.source.name() == other.source.name()
    }
}

impl Eq for Token {}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// A symbol such as a variable or function name.
    Name,

    // String tokens
    /// Any single character inside a string literal.
    StringChar,
    EscapedDblQuote, // \"

    // Comment tokens
    DoubleSlash, // //
    /// Any single character inside a comment.
    CommentChar,

    // Special
    Eol, // \n
    Eof,
    Whitespace,

    // Delimiters
    DblQuote,         // "
    CurlyBraceRight,  // }
    CurlyBraceLeft,   // {
    SquareBrackRight, // ]
    SquareBrackLeft,  // [
    ParenRight,       // )
    ParenLeft,        // (

    // Operators and punctuation
    Assign,    // =
    DoubleEq,  // ==
    Colon,     // :
    Semicolon, // ;
    Asterisk,  // *
    Plus,      // +
    Minus,     // -
    Div,       // /

    // Literals
    IntegerLiteral,

    // Keywords
    KwVar,
    KwConst,
    KwFunc,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: &'static [TokenKind] = &[
        TokenKind::Name,
        TokenKind::StringChar,
        TokenKind::EscapedDblQuote,
        TokenKind::DoubleSlash,
        TokenKind::CommentChar,
        TokenKind::Eol,
        TokenKind::Eof,
        TokenKind::Whitespace,
        TokenKind::DblQuote,
        TokenKind::CurlyBraceRight,
        TokenKind::CurlyBraceLeft,
        TokenKind::SquareBrackRight,
        TokenKind::SquareBrackLeft,
        TokenKind::ParenRight,
        TokenKind::ParenLeft,
        TokenKind::Assign,
        TokenKind::DoubleEq,
        TokenKind::Colon,
        TokenKind::Semicolon,
        TokenKind::Asterisk,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Div,
        TokenKind::IntegerLiteral,
        TokenKind::KwVar,
        TokenKind::KwConst,
        TokenKind::KwFunc,
    ];

    /// The identifier-style name of the kind, e.g. `ParenRight`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Name => "Name",
            TokenKind::StringChar => "StringChar",
            TokenKind::EscapedDblQuote => "EscapedDblQuote",
            TokenKind::DoubleSlash => "DoubleSlash",
            TokenKind::CommentChar => "CommentChar",
            TokenKind::Eol => "Eol",
            TokenKind::Eof => "Eof",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::DblQuote => "DblQuote",
            TokenKind::CurlyBraceRight => "CurlyBraceRight",
            TokenKind::CurlyBraceLeft => "CurlyBraceLeft",
            TokenKind::SquareBrackRight => "SquareBrackRight",
            TokenKind::SquareBrackLeft => "SquareBrackLeft",
            TokenKind::ParenRight => "ParenRight",
            TokenKind::ParenLeft => "ParenLeft",
            TokenKind::Assign => "Assign",
            TokenKind::DoubleEq => "DoubleEq",
            TokenKind::Colon => "Colon",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Div => "Div",
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::KwVar => "KwVar",
            TokenKind::KwConst => "KwConst",
            TokenKind::KwFunc => "KwFunc",
        }
    }

    /// The fixed spelling of the kind, if it has exactly one.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            TokenKind::EscapedDblQuote => Some("\\\""),
            TokenKind::DoubleSlash => Some("//"),
            TokenKind::DblQuote => Some("\""),
            TokenKind::CurlyBraceRight => Some("}"),
            TokenKind::CurlyBraceLeft => Some("{"),
            TokenKind::SquareBrackRight => Some("]"),
            TokenKind::SquareBrackLeft => Some("["),
            TokenKind::ParenRight => Some(")"),
            TokenKind::ParenLeft => Some("("),
            TokenKind::Assign => Some("="),
            TokenKind::DoubleEq => Some("=="),
            TokenKind::Colon => Some(":"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Asterisk => Some("*"),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Div => Some("/"),
            TokenKind::KwVar => Some("var"),
            TokenKind::KwConst => Some("const"),
            TokenKind::KwFunc => Some("func"),
            _ => None,
        }
    }

    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::KwVar | TokenKind::KwConst | TokenKind::KwFunc)
    }

    /// Returns true for tokens the grammar never sees: whitespace, line
    /// breaks and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Eol | TokenKind::DoubleSlash | TokenKind::CommentChar
        )
    }

    /// How the kind reads in an "expected ..." message.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Name => "name".to_string(),
            TokenKind::IntegerLiteral => "integer literal".to_string(),
            TokenKind::StringChar => "string character".to_string(),
            TokenKind::CommentChar => "comment character".to_string(),
            TokenKind::Whitespace => "whitespace".to_string(),
            TokenKind::Eol => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("`{}`", self.text().unwrap_or(self.name())),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
