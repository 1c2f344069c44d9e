//! The backtracking rule matcher.
//!
//! Matching is a depth-first search over the grammar: alternatives are tried
//! in order, components left to right, and the first complete pattern wins.
//! Every attempt starts from a snapshot of the token stream and puts the
//! stream back where it found it, so a successful match is reported through
//! its [`RuleMatch::end_state`] rather than by leaving the stream advanced.
//!
//! Nesting that makes progress is only bounded by the call stack. The
//! recursion limit counts rule attempts nested at one stream offset, which
//! only grows when a rule reaches itself without consuming a token.

use std::collections::BTreeMap;
use std::ptr;

use glow_common::Span;
use glow_lexer::{ScanState, Token, TokenStream};
use tracing::{debug, trace};

use crate::{CaptureError, Component, FailureAttempt, FailureRecord, Grammar, MatchError, Pattern, Rule};

/// Matching limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Maximum number of rule attempts nested at the same stream offset.
    pub max_recursion: usize,
    /// Whether a top-level parse must consume all significant input.
    pub require_eof: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_recursion: 256,
            require_eof: true,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_recursion(mut self, limit: usize) -> Self {
        self.max_recursion = limit;
        self
    }

    pub fn require_eof(mut self, require: bool) -> Self {
        self.require_eof = require;
        self
    }
}

/// A captured component of a match.
#[derive(Debug, Clone)]
pub enum Capture<'g> {
    Token(Token),
    Rule(RuleMatch<'g>),
}

/// A successful rule match: which pattern matched, what it captured, and
/// where the stream stands after it.
#[derive(Debug, Clone)]
pub struct RuleMatch<'g> {
    rule: &'g Rule,
    pattern: &'g Pattern,
    captures: BTreeMap<String, Capture<'g>>,
    span: Option<Span>,
    end_state: ScanState,
    depth: usize,
}

impl<'g> RuleMatch<'g> {
    pub fn rule(&self) -> &'g Rule {
        self.rule
    }

    pub fn rule_name(&self) -> &'g str {
        self.rule.name()
    }

    pub fn pattern(&self) -> &'g Pattern {
        self.pattern
    }

    /// Index of the matched pattern among the rule's alternatives.
    pub fn alternative(&self) -> usize {
        self.rule
            .patterns()
            .iter()
            .position(|p| ptr::eq(p, self.pattern))
            .unwrap_or_default()
    }

    /// Labeled captures, ordered by label.
    pub fn captures(&self) -> impl Iterator<Item = (&str, &Capture<'g>)> {
        self.captures.iter().map(|(label, capture)| (label.as_str(), capture))
    }

    pub fn capture(&self, label: &str) -> Result<&Capture<'g>, CaptureError> {
        self.captures
            .get(label)
            .ok_or_else(|| CaptureError::NoSuchCapture {
                rule: self.rule_name().to_string(),
                label: label.to_string(),
            })
    }

    pub fn has_capture(&self, label: &str) -> bool {
        self.captures.contains_key(label)
    }

    /// The token captured under `label`.
    pub fn token(&self, label: &str) -> Result<&Token, CaptureError> {
        match self.capture(label)? {
            Capture::Token(token) => Ok(token),
            Capture::Rule(_) => Err(self.wrong_kind(label, "token")),
        }
    }

    /// The sub-match captured under `label`.
    pub fn sub_match(&self, label: &str) -> Result<&RuleMatch<'g>, CaptureError> {
        match self.capture(label)? {
            Capture::Rule(sub) => Ok(sub),
            Capture::Token(_) => Err(self.wrong_kind(label, "rule match")),
        }
    }

    fn wrong_kind(&self, label: &str, expected: &'static str) -> CaptureError {
        CaptureError::WrongKind {
            rule: self.rule_name().to_string(),
            label: label.to_string(),
            expected,
        }
    }

    /// Source covered by the tokens this match consumed, labeled or not.
    /// `None` for a match of an empty pattern.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Stream position right after the match.
    pub fn end_state(&self) -> ScanState {
        self.end_state
    }

    /// Failure depth reached by the end of the match.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Captured tokens in source order, walking sub-matches.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens.sort_by_key(|t| t.span.start);
        tokens
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for capture in self.captures.values() {
            match capture {
                Capture::Token(token) => out.push(token),
                Capture::Rule(sub) => sub.collect_tokens(out),
            }
        }
    }
}

/// The rule attempt a nested attempt is made from.
#[derive(Debug, Clone, Copy)]
struct Frame {
    offset: usize,
    /// Enclosing attempts that started at `offset`.
    stalled: usize,
}

impl Frame {
    fn enter(parent: Option<Frame>, offset: usize) -> Frame {
        let stalled = match parent {
            Some(parent) if parent.offset == offset => parent.stalled + 1,
            _ => 0,
        };
        Frame { offset, stalled }
    }
}

/// What a completed pattern produced.
struct Matched<'g> {
    captures: BTreeMap<String, Capture<'g>>,
    span: Option<Span>,
    depth: usize,
}

/// Matches grammar rules against a token stream.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatcher<'g> {
    grammar: &'g Grammar,
    options: MatchOptions,
}

impl<'g> RuleMatcher<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Try to match the rule called `name` at the stream's position.
    ///
    /// Returns `Ok(None)` if no alternative matches; failed token comparisons
    /// are offered to `record`. The stream is left where it was.
    pub fn attempt_rule_match(
        &self,
        name: &str,
        stream: &mut TokenStream,
        depth: usize,
        record: &mut FailureRecord,
    ) -> Result<Option<RuleMatch<'g>>, MatchError> {
        self.match_rule(name, stream, depth, None, record)
    }

    /// Try to match a single pattern of `rule` at the stream's position.
    pub fn attempt_pattern_match(
        &self,
        rule: &'g Rule,
        pattern: &'g Pattern,
        stream: &mut TokenStream,
        depth: usize,
        record: &mut FailureRecord,
    ) -> Result<Option<RuleMatch<'g>>, MatchError> {
        let frame = Frame::enter(None, stream.state().offset);
        self.match_pattern(rule, pattern, stream, depth, frame, record)
    }

    fn match_rule(
        &self,
        name: &str,
        stream: &mut TokenStream,
        depth: usize,
        parent: Option<Frame>,
        record: &mut FailureRecord,
    ) -> Result<Option<RuleMatch<'g>>, MatchError> {
        let frame = Frame::enter(parent, stream.state().offset);
        if frame.stalled >= self.options.max_recursion {
            return Err(MatchError::RecursionLimit {
                rule: name.to_string(),
                limit: self.options.max_recursion,
            });
        }
        let rule = self.grammar.rule(name)?;

        // No rule matches at end of input, not even one with an empty pattern.
        if stream.peek_token()?.is_eof() {
            trace!(rule = name, "end of input, not attempting rule");
            return Ok(None);
        }

        trace!(rule = name, pos = %stream.pos(), depth, "attempting rule");
        for pattern in rule.patterns() {
            if let Some(found) = self.match_pattern(rule, pattern, stream, depth, frame, record)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn match_pattern(
        &self,
        rule: &'g Rule,
        pattern: &'g Pattern,
        stream: &mut TokenStream,
        depth: usize,
        frame: Frame,
        record: &mut FailureRecord,
    ) -> Result<Option<RuleMatch<'g>>, MatchError> {
        let initial = stream.state();
        let result = self.match_components(rule, pattern, stream, depth, frame, record);
        let end_state = stream.state();
        stream.restore(initial);

        let outcome = match result? {
            Some(matched) => Some(RuleMatch {
                rule,
                pattern,
                captures: matched.captures,
                span: matched.span,
                end_state,
                depth: matched.depth,
            }),
            None => None,
        };
        match &outcome {
            Some(_) => debug!(rule = rule.name(), %pattern, "pattern matched"),
            None => debug!(rule = rule.name(), %pattern, "pattern failed"),
        }
        Ok(outcome)
    }

    /// Match components left to right, advancing `stream`. The caller restores
    /// the stream afterwards.
    fn match_components(
        &self,
        rule: &'g Rule,
        pattern: &'g Pattern,
        stream: &mut TokenStream,
        mut depth: usize,
        frame: Frame,
        record: &mut FailureRecord,
    ) -> Result<Option<Matched<'g>>, MatchError> {
        let mut captures = BTreeMap::new();
        let mut span: Option<Span> = None;

        for component in pattern.components() {
            match component {
                Component::Token { kind, label } => {
                    let token = stream.next_token()?;
                    if token.kind != *kind {
                        record.add_attempt(FailureAttempt {
                            rule: rule.name().to_string(),
                            offending: token,
                            expected: *kind,
                            depth,
                        });
                        return Ok(None);
                    }
                    cover(&mut span, token.span);
                    if let Some(label) = label {
                        captures.insert(label.clone(), Capture::Token(token));
                    }
                    depth += 1;
                }
                Component::Rule { name, label } => {
                    let Some(sub) = self.match_rule(name, stream, depth, Some(frame), record)? else {
                        return Ok(None);
                    };
                    stream.restore(sub.end_state);
                    if let Some(covered) = sub.span {
                        cover(&mut span, covered);
                    }
                    depth = sub.depth;
                    if let Some(label) = label {
                        captures.insert(label.clone(), Capture::Rule(sub));
                    }
                }
            }
        }

        Ok(Some(Matched {
            captures,
            span,
            depth,
        }))
    }
}

fn cover(span: &mut Option<Span>, covered: Span) {
    *span = Some(span.map_or(covered, |s| s.merge(covered)));
}
