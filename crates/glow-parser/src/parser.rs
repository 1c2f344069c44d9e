//! The top-level parse driver.

use std::sync::Arc;

use glow_common::SourceFile;
use glow_lexer::TokenStream;
use tracing::debug;

use crate::glow::glow_grammar;
use crate::{FailureRecord, Grammar, GrammarError, MatchOptions, ParseError, RuleMatch, RuleMatcher};

/// A validated grammar plus matching options.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Grammar,
    options: MatchOptions,
}

impl Parser {
    /// Create a parser, rejecting grammars with undefined rule references or
    /// left recursion.
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        Ok(Self {
            grammar,
            options: MatchOptions::default(),
        })
    }

    /// A parser for the built-in Glow grammar.
    pub fn glow() -> Self {
        let grammar = glow_grammar();
        debug_assert!(grammar.validate().is_ok(), "built-in grammar must validate");
        Self {
            grammar,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Parse `source` starting from the rule called `start`.
    pub fn parse(&self, source: Arc<SourceFile>, start: &str) -> Result<RuleMatch<'_>, ParseError> {
        let mut stream = TokenStream::new(source);
        self.parse_stream(&mut stream, start)
    }

    /// Parse from the stream's current position. On success the stream is
    /// left right after the match.
    pub fn parse_stream(&self, stream: &mut TokenStream, start: &str) -> Result<RuleMatch<'_>, ParseError> {
        let mut record = FailureRecord::new();
        let matcher = RuleMatcher::new(&self.grammar).with_options(self.options);

        let Some(found) = matcher.attempt_rule_match(start, stream, 0, &mut record)? else {
            debug!(rule = start, deepest = ?record.max_depth(), "no match");
            return Err(ParseError::NoMatch {
                rule: start.to_string(),
                at: stream.peek_token()?,
                failures: record.into_attempts(),
            });
        };

        stream.restore(found.end_state());
        if self.options.require_eof {
            let next = stream.peek_token()?;
            if !next.is_eof() {
                let got_further = record.max_depth().is_some_and(|deepest| deepest > found.depth());
                return Err(ParseError::TrailingInput {
                    rule: start.to_string(),
                    token: next,
                    failures: if got_further { record.into_attempts() } else { Vec::new() },
                });
            }
        }
        Ok(found)
    }

    /// Parse in-memory text.
    pub fn parse_str(&self, name: &str, text: &str, start: &str) -> Result<RuleMatch<'_>, ParseError> {
        self.parse(Arc::new(SourceFile::from_string(name, text)), start)
    }
}
