//! Glow workspace root.
//! Glow 工作区根。
//!
//! Re-exports the front-end crates so the integration tests under `tests/`
//! can reach the whole pipeline from one place.

pub use glow_common as common;
pub use glow_diagnostic as diagnostic;
pub use glow_lexer as lexer;
pub use glow_parser as parser;
