//! Common utilities and data structures for Glow.
//!
//! This crate provides foundational types used across the Glow front end:
//! - `Span`: Byte range tracking
//! - `SourcePos`: Line/column positions
//! - `SourceFile`: Loaded source text with normalized line endings

mod source;
mod span;

pub use source::SourceFile;
pub use span::{BytePos, SourcePos, Span};
