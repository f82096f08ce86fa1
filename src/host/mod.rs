//! Reference host for the analyzer.
//!
//! Loads syntax snapshots written by an external front end, discovers the
//! callable units the rule is registered for and runs the rule over them.

pub mod driver;
pub mod snapshot;

pub use driver::{AnalysisDriver, AnalysisReport, CancellationToken, ReportedFinding};
pub use snapshot::{Snapshot, SnapshotModel, SymbolBinding};
