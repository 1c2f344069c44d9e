//! Error codes for Glow diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    TrailingInput,
    RecursionLimit,

    // Grammar configuration errors (E0200 - E0299)
    UnknownRule,
    DanglingReference,
    LeftRecursion,
    MissingTokenPattern,
    InvalidTokenPattern,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::TrailingInput => "E0101",
            ErrorCode::RecursionLimit => "E0102",

            // Grammar
            ErrorCode::UnknownRule => "E0200",
            ErrorCode::DanglingReference => "E0201",
            ErrorCode::LeftRecursion => "E0202",
            ErrorCode::MissingTokenPattern => "E0203",
            ErrorCode::InvalidTokenPattern => "E0204",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "unexpected character in input",

            // Parser
            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::TrailingInput => "input continues after a complete match",
            ErrorCode::RecursionLimit => "rule attempts nested too deep without consuming input",

            // Grammar
            ErrorCode::UnknownRule => "grammar rule does not exist",
            ErrorCode::DanglingReference => "pattern references an undefined rule",
            ErrorCode::LeftRecursion => "rule can reach itself without consuming a token",
            ErrorCode::MissingTokenPattern => "token kind has no registered pattern",
            ErrorCode::InvalidTokenPattern => "token pattern is not a valid regular expression",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::RecursionLimit => {
                Some("a rule reaches itself without consuming a token; check the grammar for left recursion")
            }
            ErrorCode::LeftRecursion => {
                Some("consume a token before referencing the rule again")
            }
            ErrorCode::DanglingReference => Some("define the referenced rule or fix its name"),
            _ => None,
        }
    }
}
