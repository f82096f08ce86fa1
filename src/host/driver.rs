//! Parallel analysis driver for snapshots.

use super::snapshot::Snapshot;
use crate::analyzers::CqsRule;
use crate::config::CqsConfig;
use crate::core::{Error, Finding, Result, Severity};
use crate::syntax::{walk, CallableUnit};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, info_span};

/// Shared stop flag checked between units
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A finding together with the file it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedFinding {
    pub path: PathBuf,
    #[serde(flatten)]
    pub finding: Finding,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub files_analyzed: usize,
    pub units_analyzed: usize,
    pub findings: Vec<ReportedFinding>,
}

impl AnalysisReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.finding.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisDriver {
    rule: CqsRule,
    min_severity: Severity,
}

impl AnalysisDriver {
    pub fn new(config: &CqsConfig) -> Self {
        Self {
            rule: CqsRule::new(config.rules),
            min_severity: config.report.min_severity,
        }
    }

    /// Analyze every registered unit of the snapshot on the current rayon pool.
    ///
    /// Output order is file order, then source pre-order of units, then
    /// statement order within a unit, independent of scheduling.
    pub fn run(&self, snapshot: &Snapshot, cancel: &CancellationToken) -> Result<AnalysisReport> {
        let _span = info_span!("analyze_snapshot", files = snapshot.files.len()).entered();

        let model = snapshot.semantic_model();
        let registered = self.rule.registered_kinds();
        let units: Vec<(&Path, CallableUnit<'_>)> = snapshot
            .files
            .iter()
            .flat_map(|file| {
                walk::callable_units(file)
                    .into_iter()
                    .map(move |unit| (file.path.as_path(), unit))
            })
            .filter(|(_, unit)| registered.contains(&unit.kind()))
            .collect();

        let per_unit: Vec<Option<Vec<ReportedFinding>>> = units
            .par_iter()
            .map(|(path, unit)| {
                if cancel.is_cancelled() {
                    return None;
                }
                let findings = self
                    .rule
                    .findings(*unit, &model)
                    .into_iter()
                    .filter(|finding| finding.severity >= self.min_severity)
                    .map(|finding| ReportedFinding {
                        path: path.to_path_buf(),
                        finding,
                    })
                    .collect();
                Some(findings)
            })
            .collect();

        let findings = per_unit
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::Cancelled)?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        info!(
            units = units.len(),
            findings = findings.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            files_analyzed: snapshot.files.len(),
            units_analyzed: units.len(),
            findings,
        })
    }
}
