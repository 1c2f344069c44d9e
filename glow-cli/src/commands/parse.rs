//! The `glow parse` command.
//! `glow parse` 命令。

use glow_diagnostic::emit;
use glow_parser::{MatchOptions, Parser};
use tracing::debug;

use crate::output;

/// Parse a file with the built-in grammar and print the match tree.
/// 使用内置语法解析文件并打印匹配树。
pub fn run(file: &str, rule: &str, options: MatchOptions, json: bool, quiet: bool) -> Result<(), String> {
    let source = super::load(file)?;
    let parser = Parser::glow().with_options(options);

    if !parser.grammar().contains(rule) {
        return Err(format!("unknown rule '{rule}'"));
    }

    debug!(file, rule, max_recursion = options.max_recursion, "parsing");
    let found = match parser.parse(source.clone(), rule) {
        Ok(found) => found,
        Err(err) => {
            emit(source.contents(), source.name(), &err.to_diagnostic());
            return Err("parse error".to_string());
        }
    };

    if json {
        let rendered = serde_json::to_string_pretty(&output::match_json(&found))
            .map_err(|e| format!("cannot render match tree: {e}"))?;
        println!("{rendered}");
    } else {
        print!("{}", output::match_tree(&found));
        if !quiet {
            output::success("OK - parsed without errors");
        }
    }
    Ok(())
}
