//! Glow CLI - command line access to the Glow front end.
//! Glow CLI - Glow 前端的命令行界面。

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "glow")]
#[command(author, version, about = "Glow - tokenize and parse Glow source files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output. / 抑制输出。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a file. / 打印文件的 token。
    Tokens {
        /// The file to tokenize. / 要进行词法分析的文件。
        file: String,

        /// Include whitespace, line breaks and comments. / 包含空白、换行和注释。
        #[arg(long)]
        raw: bool,
    },

    /// Parse a file and print the match tree. / 解析文件并打印匹配树。
    Parse {
        /// The file to parse. / 要解析的文件。
        file: String,

        /// Start rule. / 起始规则。
        #[arg(long, short, default_value = glow_parser::GLOW_START)]
        rule: String,

        /// Maximum rule attempts nested without consuming a token. / 不消耗 token 时规则尝试的最大嵌套数。
        #[arg(long, default_value_t = 256)]
        max_recursion: usize,

        /// Accept input left over after the start rule. / 接受起始规则之后剩余的输入。
        #[arg(long)]
        allow_trailing: bool,

        /// Print the match tree as JSON. / 以 JSON 格式打印匹配树。
        #[arg(long)]
        json: bool,
    },

    /// Show the built-in grammar. / 显示内置语法。
    Grammar,
}

/// Send library logs to stderr. `GLOW_LOG` takes precedence over `--verbose`.
/// 将库日志输出到 stderr。`GLOW_LOG` 优先于 `--verbose`。
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("GLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Tokens { file, raw } => commands::tokens::run(&file, raw, cli.verbose),
        Commands::Parse {
            file,
            rule,
            max_recursion,
            allow_trailing,
            json,
        } => {
            let options = glow_parser::MatchOptions::new()
                .max_recursion(max_recursion)
                .require_eof(!allow_trailing);
            commands::parse::run(&file, &rule, options, json, cli.quiet)
        }
        Commands::Grammar => commands::grammar::run(cli.quiet),
    };

    if let Err(e) = result {
        if !cli.quiet {
            output::error(&e);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["glow", "grammar", "--verbose", "--quiet"]).is_err());
        assert!(Cli::try_parse_from(["glow", "grammar", "--quiet"]).is_ok());
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["glow", "parse", "main.glow"]).unwrap();
        let Commands::Parse {
            rule,
            max_recursion,
            allow_trailing,
            ..
        } = cli.command
        else {
            panic!("expected the parse command");
        };
        assert_eq!(rule, glow_parser::GLOW_START);
        assert_eq!(max_recursion, glow_parser::MatchOptions::default().max_recursion);
        assert!(!allow_trailing);
    }
}
