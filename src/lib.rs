// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod host;
pub mod io;
pub mod observability;
pub mod semantic;
pub mod syntax;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{Finding, Position, RuleId, Severity, Span};

pub use crate::core::errors::{Error, Result};

pub use crate::analyzers::{CqsRule, FindingSink, REGISTERED_KINDS};

pub use crate::config::{load_config, CqsConfig, RuleSettings};

pub use crate::host::{AnalysisDriver, AnalysisReport, CancellationToken, Snapshot};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::semantic::{SemanticModel, Symbol, SymbolKind};

pub use crate::syntax::{CallableUnit, CompilationUnit, UnitKind};
