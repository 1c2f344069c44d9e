//! The `glow tokens` command.
//! `glow tokens` 命令。

use glow_diagnostic::emit;
use glow_lexer::TokenStream;

use crate::output;

/// Print the token stream of a file.
/// 打印文件的 token 流。
pub fn run(file: &str, raw: bool, verbose: bool) -> Result<(), String> {
    let source = super::load(file)?;
    let stream = TokenStream::new(source.clone());

    let result = if raw { stream.tokenize_raw() } else { stream.tokenize() };
    let tokens = match result {
        Ok(tokens) => tokens,
        Err(err) => {
            emit(source.contents(), source.name(), &err.to_diagnostic());
            return Err("lexical error".to_string());
        }
    };

    for token in &tokens {
        println!("{}", output::token_line(token));
    }

    if verbose {
        output::info(&format!("{} token(s)", tokens.len()));
    }
    Ok(())
}
