//! Source files loaded for scanning.
//! 供扫描使用的源文件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::SourcePos;

/// A loaded source file with normalized line endings.
/// 已加载的源文件，行尾已统一。
///
/// The contents only ever contain `\n` line breaks; `\r\n` is rewritten on load.
/// 内容中只包含 `\n` 换行符；`\r\n` 会在加载时被改写。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: Option<PathBuf>,
    name: String,
    contents: String,
    /// Byte offset of the first character of every line.
    /// 每一行第一个字符的字节偏移。
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Read a source file from disk.
    /// 从磁盘读取源文件。
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut file = Self::from_string(name, contents);
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Build a source file from in-memory text.
    /// 从内存中的文本构建源文件。
    pub fn from_string(name: impl Into<String>, contents: impl Into<String>) -> Self {
        let contents = contents.into().replace("\r\n", "\n");
        let line_starts = std::iter::once(0)
            .chain(contents.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            path: None,
            name: name.into(),
            contents,
            line_starts,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the text of a 1-based line, without its line break.
    /// 获取从 1 开始编号的某一行文本，不包含换行符。
    pub fn line(&self, number: usize) -> Option<&str> {
        let start = *self.line_starts.get(number.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(number)
            .map(|next| next - 1)
            .unwrap_or(self.contents.len());
        self.contents.get(start..end)
    }

    /// Convert a byte offset into a line/column position.
    /// 将字节偏移转换为行/列位置。
    ///
    /// The offset one past the last byte is the end-of-file position.
    /// 最后一个字节之后的偏移即文件末尾位置。
    pub fn pos_at(&self, offset: usize) -> Option<SourcePos> {
        if offset > self.contents.len() || !self.contents.is_char_boundary(offset) {
            return None;
        }

        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self.contents[line_start..offset].chars().count() + 1;

        Some(SourcePos::new(line_index as u32 + 1, column as u32))
    }
}
