//! Grammar rules and patterns.
//!
//! A rule is a named list of alternative patterns; a pattern is a sequence of
//! components, each either a token kind or a reference to another rule:
//!
//! ```text
//! paren: ParenLeft [expr:body] ParenRight
//! ```
//!
//! Alternatives are tried in declaration order and the first one that matches
//! completely wins.

use std::collections::{HashMap, HashSet};
use std::fmt;

use glow_lexer::TokenKind;

use crate::GrammarError;

/// One element of a pattern, optionally labeled for later retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Token {
        kind: TokenKind,
        label: Option<String>,
    },
    Rule {
        name: String,
        label: Option<String>,
    },
}

/// A component matching a single token of `kind`.
pub fn token(kind: TokenKind) -> Component {
    Component::Token { kind, label: None }
}

/// A component matching the rule called `name`.
pub fn rule(name: impl Into<String>) -> Component {
    Component::Rule {
        name: name.into(),
        label: None,
    }
}

impl Component {
    /// Name this component's match so it can be looked up in the result.
    pub fn label(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Component::Token { label, .. } | Component::Rule { label, .. } => {
                *label = Some(name.into());
            }
        }
        self
    }

    pub fn label_name(&self) -> Option<&str> {
        match self {
            Component::Token { label, .. } | Component::Rule { label, .. } => label.as_deref(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Token { kind, label: None } => write!(f, "{kind}"),
            Component::Token {
                kind,
                label: Some(label),
            } => write!(f, "{kind}:{label}"),
            Component::Rule { name, label: None } => write!(f, "[{name}]"),
            Component::Rule {
                name,
                label: Some(label),
            } => write!(f, "[{name}:{label}]"),
        }
    }
}

/// An ordered sequence of components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    components: Vec<Component>,
}

impl Pattern {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("()");
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// A named rule with ordered alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    patterns: Vec<Pattern>,
}

impl Rule {
    pub fn new(name: impl Into<String>, patterns: Vec<Pattern>) -> Self {
        Self {
            name: name.into(),
            patterns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Rule names referenced by any pattern of this rule.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .flat_map(|p| p.components())
            .filter_map(|c| match c {
                Component::Rule { name, .. } => Some(name.as_str()),
                Component::Token { .. } => None,
            })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            write!(f, " {pattern}")?;
        }
        Ok(())
    }
}

/// A set of named rules, kept in definition order.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule from its alternatives. Redefining a name replaces the
    /// earlier rule in place.
    pub fn define_rule(
        &mut self,
        name: impl Into<String>,
        alternatives: Vec<Vec<Component>>,
    ) -> &mut Self {
        let rule = Rule::new(name, alternatives.into_iter().map(Pattern::new).collect());
        match self.index.get(rule.name()) {
            Some(&i) => self.rules[i] = rule,
            None => {
                self.index.insert(rule.name.clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
        self
    }

    pub fn rule(&self, name: &str) -> Result<&Rule, GrammarError> {
        self.index
            .get(name)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| GrammarError::UnknownRule(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if every rule reference names a defined rule.
    pub fn verify(&self) -> bool {
        self.dangling_reference().is_none()
    }

    /// Check everything the matcher relies on: closed rule references and no
    /// left recursion.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if let Some((rule, target)) = self.dangling_reference() {
            return Err(GrammarError::DanglingReference {
                rule: rule.to_string(),
                target: target.to_string(),
            });
        }
        if let Some(cycle) = self.left_recursion() {
            return Err(GrammarError::LeftRecursion { cycle });
        }
        Ok(())
    }

    fn dangling_reference(&self) -> Option<(&str, &str)> {
        self.rules.iter().find_map(|rule| {
            rule.references()
                .find(|target| !self.contains(target))
                .map(|target| (rule.name(), target))
        })
    }

    /// Rules that can match without consuming a token.
    pub fn nullable_rules(&self) -> HashSet<&str> {
        let mut nullable = HashSet::new();
        loop {
            let mut changed = false;
            for rule in &self.rules {
                if nullable.contains(rule.name()) {
                    continue;
                }
                let is_nullable = rule.patterns().iter().any(|pattern| {
                    pattern.components().iter().all(|c| match c {
                        Component::Rule { name, .. } => nullable.contains(name.as_str()),
                        Component::Token { .. } => false,
                    })
                });
                if is_nullable {
                    nullable.insert(rule.name());
                    changed = true;
                }
            }
            if !changed {
                return nullable;
            }
        }
    }

    /// Find a cycle of rules that reach each other before consuming a token.
    /// The cycle starts and ends with the same rule name.
    pub fn left_recursion(&self) -> Option<Vec<String>> {
        let nullable = self.nullable_rules();

        let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
        for rule in &self.rules {
            let targets = edges.entry(rule.name()).or_default();
            for pattern in rule.patterns() {
                for component in pattern.components() {
                    match component {
                        Component::Token { .. } => break,
                        Component::Rule { name, .. } => {
                            targets.push(name.as_str());
                            if !nullable.contains(name.as_str()) {
                                break;
                            }
                        }
                    }
                }
            }
        }

        let mut visits = HashMap::new();
        let mut path = Vec::new();
        self.rules
            .iter()
            .find_map(|rule| find_cycle(rule.name(), &edges, &mut visits, &mut path))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn find_cycle<'g>(
    node: &'g str,
    edges: &HashMap<&'g str, Vec<&'g str>>,
    visits: &mut HashMap<&'g str, Visit>,
    path: &mut Vec<&'g str>,
) -> Option<Vec<String>> {
    match visits.get(node) {
        Some(Visit::Done) => return None,
        Some(Visit::InProgress) => {
            let start = path.iter().position(|n| *n == node)?;
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(node.to_string());
            return Some(cycle);
        }
        None => {}
    }

    visits.insert(node, Visit::InProgress);
    path.push(node);
    for &next in edges.get(node).into_iter().flatten() {
        if let Some(cycle) = find_cycle(next, edges, visits, path) {
            return Some(cycle);
        }
    }
    path.pop();
    visits.insert(node, Visit::Done);
    None
}
