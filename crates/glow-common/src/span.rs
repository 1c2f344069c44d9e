//! Byte spans into a source file, and the line/column positions shown to users.
//! 源文件中的字节范围，以及展示给用户的行/列位置。

use std::fmt;

/// Byte offset into a source file's contents.
/// 源文件内容中的字节偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BytePos(pub u32);

impl From<usize> for BytePos {
    fn from(pos: usize) -> Self {
        BytePos(pos as u32)
    }
}

impl From<BytePos> for usize {
    fn from(pos: BytePos) -> Self {
        pos.0 as usize
    }
}

/// Half-open byte range of a token or match.
/// token 或匹配所覆盖的半开字节区间。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position. / 起始位置。
    pub start: BytePos,
    /// End position (exclusive). / 结束位置（不包含）。
    pub end: BytePos,
}

impl Span {
    /// Placeholder for diagnostics that have no location in the source.
    /// 用于没有源码位置的诊断的占位范围。
    pub const DUMMY: Span = Span {
        start: BytePos(0),
        end: BytePos(0),
    };

    pub fn from_usize(start: usize, end: usize) -> Self {
        Span {
            start: BytePos::from(start),
            end: BytePos::from(end),
        }
    }

    /// Smallest span covering both `self` and `other`, e.g. the first and
    /// last token of a match.
    /// 覆盖 `self` 和 `other` 的最小范围，例如匹配的首尾 token。
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }

    /// Byte range into the source contents, as ariadne labels take it.
    /// 源码内容中的字节区间，供 ariadne 标签使用。
    pub fn range(&self) -> std::ops::Range<usize> {
        usize::from(self.start)..usize::from(self.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

/// A human-facing line/column position, both 1-based.
/// 面向用户的行/列位置，均从 1 开始。
///
/// Columns count characters, not bytes.
/// 列按字符计数，而不是字节。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub const START: SourcePos = SourcePos { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        SourcePos { line, column }
    }
}

impl Default for SourcePos {
    fn default() -> Self {
        SourcePos::START
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
