//! Core types shared by the engine, the host and the output writers.

pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{Error, Result, ResultExt};

/// 1-based line/column position in a source file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range covered by a syntax node
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a single position
    pub fn at(line: u32, column: u32) -> Self {
        let position = Position::new(line, column);
        Self::new(position, position)
    }
}

/// The three checks the analyzer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Non-void unit with observable parameters: could be either a command or a query
    AmbiguousShape,
    /// Assignment to a field, property or other non-local symbol
    IllegalWrite,
    /// Discarded call whose target is a void (command-shaped) callable
    SuspiciousDelegatedCall,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::AmbiguousShape,
        RuleId::IllegalWrite,
        RuleId::SuspiciousDelegatedCall,
    ];

    /// Stable identifier used in output and configuration
    pub fn code(&self) -> &'static str {
        match self {
            Self::AmbiguousShape => "CQS001",
            Self::IllegalWrite => "CQS002",
            Self::SuspiciousDelegatedCall => "CQS003",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::AmbiguousShape => "Can't determine if method should be command or query",
            Self::IllegalWrite => "Query writes to state outside its own scope",
            Self::SuspiciousDelegatedCall => "Discarded call invokes a command",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AmbiguousShape => "ambiguous_shape",
            Self::IllegalWrite => "illegal_write",
            Self::SuspiciousDelegatedCall => "suspicious_delegated_call",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single reported violation.
///
/// Severity is decided when the finding is created and never changes
/// afterwards; findings are plain values owned by whoever receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: &'static str,
    pub span: Span,
    /// Written symbol or invoked callable, when one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Finding {
    pub fn new(rule: RuleId, severity: Severity, span: Span) -> Self {
        Self {
            rule,
            severity,
            message: rule.message(),
            span,
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}
