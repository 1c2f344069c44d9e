//! The `glow grammar` command.
//! `glow grammar` 命令。

use glow_parser::glow_grammar;

use crate::output;

/// Print the built-in grammar and check it.
/// 打印内置语法并进行检查。
pub fn run(quiet: bool) -> Result<(), String> {
    let grammar = glow_grammar();
    for rule in grammar.rules() {
        println!("{rule}");
    }

    grammar.validate().map_err(|e| e.to_string())?;
    if !quiet {
        output::success(&format!("OK - {} rules, grammar is valid", grammar.len()));
    }
    Ok(())
}
