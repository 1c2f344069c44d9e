//! CLI command implementations.

pub mod grammar;
pub mod parse;
pub mod tokens;

use std::sync::Arc;

use glow_common::SourceFile;

/// Load a source file, with the error message every command uses.
fn load(file: &str) -> Result<Arc<SourceFile>, String> {
    SourceFile::load(file)
        .map(Arc::new)
        .map_err(|e| format!("cannot read file '{}': {}", file, e))
}
