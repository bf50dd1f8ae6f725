//! Declarative constraint source
//!
//! Constraints are either loaded as serde data or parsed from a small
//! line-oriented language:
//!
//! ```text
//! # comment
//! a after b, q
//! e before b
//! s early
//! t late; u
//! ```
//!
//! Statements are separated by newlines or `;`. A bare name only declares
//! the handler.

use crate::domain::errors::ConstraintParseError;
use crate::domain::value_objects::SchedulingPreference;
use crate::ports::outbound::HandlerMetadata;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

const RESERVED: [&str; 4] = ["before", "after", "early", "late"];

/// Constraints declared by one handler
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub handler: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<SchedulingPreference>,
}

/// Metadata source over named handlers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclaredConstraints {
    declarations: Vec<Declaration>,
}

impl DeclaredConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the constraint language
    pub fn parse(source: &str) -> Result<Self, ConstraintParseError> {
        let mut constraints = Self::new();
        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let content = line.split('#').next().unwrap_or_default();
            for statement in content.split(';') {
                constraints.apply_statement(line_no, statement)?;
            }
        }
        Ok(constraints)
    }

    fn apply_statement(&mut self, line: usize, statement: &str) -> Result<(), ConstraintParseError> {
        let statement = statement.trim();
        if statement.is_empty() {
            return Ok(());
        }

        let (handler, rest) = match statement.split_once(char::is_whitespace) {
            Some((handler, rest)) => (handler, rest.trim()),
            None => (statement, ""),
        };
        if RESERVED.contains(&handler.to_ascii_lowercase().as_str()) || handler.contains(',') {
            return Err(ConstraintParseError::MissingHandler { line });
        }
        self.declare(handler);
        if rest.is_empty() {
            return Ok(());
        }

        let (verb, args) = match rest.split_once(char::is_whitespace) {
            Some((verb, args)) => (verb, args),
            None => (rest, ""),
        };
        let targets: Vec<&str> = args
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        match verb.to_ascii_lowercase().as_str() {
            relation @ ("before" | "after") => {
                if targets.is_empty() {
                    return Err(ConstraintParseError::MissingTargets {
                        line,
                        verb: relation.to_string(),
                    });
                }
                for target in &targets {
                    self.declare(target);
                }
                if relation == "before" {
                    self.before(handler, targets);
                } else {
                    self.after(handler, targets);
                }
            }
            "early" if targets.is_empty() => {
                self.set_preference(handler, SchedulingPreference::Early);
            }
            "late" if targets.is_empty() => {
                self.set_preference(handler, SchedulingPreference::Late);
            }
            _ => {
                return Err(ConstraintParseError::UnknownVerb {
                    line,
                    verb: verb.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Declaration for `handler`, created if missing
    pub fn declare(&mut self, handler: &str) -> &mut Declaration {
        let index = match self.declarations.iter().position(|d| d.handler == handler) {
            Some(index) => index,
            None => {
                self.declarations.push(Declaration {
                    handler: handler.to_string(),
                    ..Default::default()
                });
                self.declarations.len() - 1
            }
        };
        &mut self.declarations[index]
    }

    pub fn before<I, S>(&mut self, handler: &str, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declaration = self.declare(handler);
        declaration.before.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn after<I, S>(&mut self, handler: &str, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declaration = self.declare(handler);
        declaration.after.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn set_preference(&mut self, handler: &str, preference: SchedulingPreference) -> &mut Self {
        self.declare(handler).preference = Some(preference);
        self
    }

    pub fn declaration(&self, handler: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.handler == handler)
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Every named handler (declared or referenced) in first-seen order
    pub fn handlers(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut handlers = Vec::new();
        for declaration in &self.declarations {
            let names = std::iter::once(&declaration.handler)
                .chain(&declaration.before)
                .chain(&declaration.after);
            for name in names {
                if seen.insert(name.as_str()) {
                    handlers.push(name.clone());
                }
            }
        }
        handlers
    }
}

impl FromStr for DeclaredConstraints {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl HandlerMetadata<String> for DeclaredConstraints {
    fn runs_before(&self, handler: &String) -> Vec<String> {
        self.declaration(handler)
            .map(|d| d.before.clone())
            .unwrap_or_default()
    }

    fn runs_after(&self, handler: &String) -> Vec<String> {
        self.declaration(handler)
            .map(|d| d.after.clone())
            .unwrap_or_default()
    }

    fn scheduling_preference(&self, handler: &String) -> Option<SchedulingPreference> {
        self.declaration(handler).and_then(|d| d.preference)
    }
}
